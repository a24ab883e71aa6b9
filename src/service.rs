/*!
 * Execution Service
 * Owns the process table and wires the launcher and poller around it
 */

use crate::core::config::ServiceConfig;
use crate::core::types::Pid;
use crate::process::{
    LaunchRequest, LaunchResult, Launcher, PollOutcome, Poller, ProcessTable, StatusRequest,
    StatusResult,
};
use tracing::info;

/// Launch and status entry points sharing one process table
#[derive(Debug, Clone)]
pub struct ExecService {
    table: ProcessTable,
    launcher: Launcher,
    poller: Poller,
}

impl ExecService {
    pub fn new(config: &ServiceConfig) -> Self {
        Self::with_table(ProcessTable::new(), config)
    }

    /// Build the service around an existing table
    pub fn with_table(table: ProcessTable, config: &ServiceConfig) -> Self {
        info!(shell = %config.shell.display(), "Execution service initialized");
        Self {
            launcher: Launcher::new(table.clone(), config.shell.clone()),
            poller: Poller::new(table.clone()),
            table,
        }
    }

    pub fn launch(&self, request: LaunchRequest) -> LaunchResult {
        self.launcher.launch(request)
    }

    pub fn status(&self, request: StatusRequest) -> StatusResult {
        self.poller.status(request)
    }

    pub fn poll(&self, pid: Pid) -> PollOutcome {
        self.poller.poll(pid)
    }

    pub fn launcher(&self) -> &Launcher {
        &self.launcher
    }

    pub fn poller(&self) -> &Poller {
        &self.poller
    }

    pub fn table(&self) -> &ProcessTable {
        &self.table
    }
}

impl Default for ExecService {
    fn default() -> Self {
        Self::new(&ServiceConfig::default())
    }
}
