/*!
 * Process Table
 * Concurrent PID -> completion signal registry shared by launcher and poller
 */

use super::signal::CompletionSignal;
use super::types::ExitRecord;
use crate::core::types::Pid;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

/// Tracking unit for one launched process
#[derive(Debug, Clone)]
pub struct ProcessHandle {
    pid: Pid,
    signal: Arc<CompletionSignal>,
}

impl ProcessHandle {
    pub fn new(pid: Pid) -> Self {
        Self {
            pid,
            signal: Arc::new(CompletionSignal::new()),
        }
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn signal(&self) -> &CompletionSignal {
        &self.signal
    }

    /// Non-blocking read of the terminal result
    pub fn try_result(&self) -> Option<ExitRecord> {
        self.signal.peek().cloned()
    }

    /// Wait for the process to exit
    pub async fn exited(&self) -> ExitRecord {
        self.signal.wait().await
    }
}

/// Registry of launched processes; entries are never removed
#[derive(Debug, Clone, Default)]
pub struct ProcessTable {
    entries: Arc<DashMap<Pid, ProcessHandle>>,
}

impl ProcessTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handle under its PID
    pub fn insert(&self, handle: ProcessHandle) {
        let pid = handle.pid();
        if let Some(previous) = self.entries.insert(pid, handle) {
            // The OS only reuses a PID once the earlier child has been reaped
            debug!(
                pid = pid,
                previous_exited = previous.signal().is_fulfilled(),
                "PID reused, replacing tracked process"
            );
        }
    }

    pub fn get(&self, pid: Pid) -> Option<ProcessHandle> {
        self.entries.get(&pid).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.entries.contains_key(&pid)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
