/*!
 * Process Poller
 * Non-blocking status queries against the process table
 */

use super::table::ProcessTable;
use super::types::{PollOutcome, StatusRequest, StatusResult};
use crate::core::types::{Pid, WirePid};
use tracing::debug;

/// Answers status queries without ever waiting on a child
#[derive(Debug, Clone)]
pub struct Poller {
    table: ProcessTable,
}

impl Poller {
    pub fn new(table: ProcessTable) -> Self {
        Self { table }
    }

    pub fn poll(&self, pid: Pid) -> PollOutcome {
        let Some(handle) = self.table.get(pid) else {
            debug!(pid = pid, "Status requested for unknown PID");
            return PollOutcome::Unknown;
        };

        match handle.try_result() {
            Some(record) => PollOutcome::Exited(record),
            None => PollOutcome::Running,
        }
    }

    /// Poll by wire PID; values outside the PID range are unknown
    pub fn poll_wire(&self, pid: WirePid) -> PollOutcome {
        match Pid::try_from(pid) {
            Ok(pid) => self.poll(pid),
            Err(_) => {
                debug!(pid = pid, "Status requested for out-of-range PID");
                PollOutcome::Unknown
            }
        }
    }

    pub fn status(&self, request: StatusRequest) -> StatusResult {
        self.poll_wire(request.pid).into()
    }
}
