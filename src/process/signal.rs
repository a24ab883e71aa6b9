/*!
 * Completion Signal
 * Single-slot cell carrying a process's terminal result from its waiter to pollers
 */

use super::types::ExitRecord;
use std::sync::OnceLock;
use tokio::sync::Notify;

/// Written once by the waiter, readable any number of times afterwards.
///
/// Reads never consume the value, so every poll after completion observes the
/// same record.
#[derive(Debug, Default)]
pub struct CompletionSignal {
    slot: OnceLock<ExitRecord>,
    notify: Notify,
}

impl CompletionSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish the terminal result. Returns false if one was already published.
    pub fn fulfill(&self, record: ExitRecord) -> bool {
        let published = self.slot.set(record).is_ok();
        if published {
            self.notify.notify_waiters();
        }
        published
    }

    /// Non-blocking read of the terminal result
    pub fn peek(&self) -> Option<&ExitRecord> {
        self.slot.get()
    }

    pub fn is_fulfilled(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Wait until the terminal result is published
    pub async fn wait(&self) -> ExitRecord {
        loop {
            // Register before checking so a concurrent fulfill is not missed
            let notified = self.notify.notified();
            if let Some(record) = self.slot.get() {
                return record.clone();
            }
            notified.await;
        }
    }
}
