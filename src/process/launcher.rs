/*!
 * Process Launcher
 * Starts OS processes and registers them for background reaping
 */

use super::table::{ProcessHandle, ProcessTable};
use super::types::{LaunchRequest, LaunchResult};
use super::waiter;
use crate::core::errors::ExecError;
use crate::core::types::ExecResult;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tokio::runtime::Handle;
use tracing::{error, info};

/// Spawns child processes and hands back their PIDs without waiting on them
#[derive(Debug, Clone)]
pub struct Launcher {
    table: ProcessTable,
    shell: PathBuf,
}

impl Launcher {
    pub fn new(table: ProcessTable, shell: impl Into<PathBuf>) -> Self {
        Self {
            table,
            shell: shell.into(),
        }
    }

    pub fn table(&self) -> &ProcessTable {
        &self.table
    }

    /// Launch a process, reporting failure through the sentinel PID
    pub fn launch(&self, request: LaunchRequest) -> LaunchResult {
        match self.spawn(request) {
            Ok(handle) => LaunchResult::started(handle.pid()),
            Err(e) => {
                error!(error = %e, "Launch failed");
                LaunchResult::failed()
            }
        }
    }

    /// Start a process and register it in the table.
    ///
    /// Must run inside a tokio runtime (no I/O driver needed); the returned
    /// handle's result is published by a background waiter once the child exits.
    pub fn spawn(&self, request: LaunchRequest) -> ExecResult<ProcessHandle> {
        let runtime = Handle::try_current().map_err(|_| ExecError::NoRuntime)?;

        let mut cmd = self.build_command(&request);
        let program = self.program_name(&request);

        let child = cmd
            .spawn()
            .map_err(|e| ExecError::spawn_failed(program.clone(), &e))?;
        let pid = child.id();

        info!(
            pid = pid,
            program = %program,
            capture = request.capture_output,
            "Spawned process"
        );

        let handle = ProcessHandle::new(pid);
        self.table.insert(handle.clone());
        waiter::spawn(&runtime, handle.clone(), child, request.input, request.capture_output);

        Ok(handle)
    }

    fn build_command(&self, request: &LaunchRequest) -> Command {
        let mut cmd = match request.program() {
            Some(path) => {
                let mut cmd = Command::new(path);
                cmd.args(&request.args);
                cmd
            }
            None => {
                // No command string is supplied to the shell
                let mut cmd = Command::new(&self.shell);
                cmd.arg("-c");
                cmd
            }
        };

        if request.input.is_some() {
            cmd.stdin(Stdio::piped());
        } else {
            cmd.stdin(Stdio::null());
        }

        if request.capture_output {
            cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        } else {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }

        cmd
    }

    fn program_name(&self, request: &LaunchRequest) -> String {
        match request.program() {
            Some(path) => path.to_string(),
            None => self.shell.display().to_string(),
        }
    }
}
