/*!
 * Process Types
 * Requests, terminal results, and status values for launched processes
 */

use crate::core::serde::is_none;
use crate::core::types::{Pid, WirePid};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as};

/// What to run and how to wire its standard streams
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchRequest {
    /// Executable to run; without one the configured shell is invoked
    pub path: Option<String>,
    /// Arguments, only used together with `path`
    pub args: Vec<String>,
    /// Bytes fed to the child's stdin
    pub input: Option<Vec<u8>>,
    /// Capture stdout and stderr into memory
    pub capture_output: bool,
}

impl LaunchRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Default::default()
        }
    }

    /// Request that falls back to the shell
    pub fn shell() -> Self {
        Self::default()
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_input(mut self, input: impl Into<Vec<u8>>) -> Self {
        self.input = Some(input.into());
        self
    }

    pub fn with_capture(mut self, capture: bool) -> Self {
        self.capture_output = capture;
        self
    }

    /// Explicit executable path, treating an empty string as absent
    pub fn program(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.is_empty())
    }
}

/// Status query for a previously launched process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRequest {
    pub pid: WirePid,
}

/// Output drained from a child's stdout and stderr
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: Bytes,
    pub stderr: Bytes,
}

impl CapturedOutput {
    pub fn new(stdout: impl Into<Bytes>, stderr: impl Into<Bytes>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }
}

/// Terminal result published once per process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitRecord {
    pub exit_code: i32,
    /// Present only when capture was requested at launch
    pub output: Option<CapturedOutput>,
}

/// Result of a non-blocking status check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// No process with this PID was ever launched here
    Unknown,
    Running,
    Exited(ExitRecord),
}

impl PollOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PollOutcome::Running)
    }
}

/// Reply to a launch request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchResult {
    pub pid: WirePid,
}

impl LaunchResult {
    /// Sentinel PID reported when the process could not be started
    pub const FAILED_PID: WirePid = -1;

    pub fn started(pid: Pid) -> Self {
        Self {
            pid: WirePid::from(pid),
        }
    }

    pub fn failed() -> Self {
        Self {
            pid: Self::FAILED_PID,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.pid < 0
    }

    /// PID usable as a table key, if the launch succeeded
    pub fn pid(&self) -> Option<Pid> {
        Pid::try_from(self.pid).ok()
    }
}

/// Reply to a status request
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResult {
    pub exited: bool,
    #[serde(skip_serializing_if = "is_none")]
    pub exitcode: Option<i32>,
    #[serde_as(as = "Option<Base64>")]
    #[serde(rename = "out-data", skip_serializing_if = "is_none")]
    pub out_data: Option<Bytes>,
    #[serde_as(as = "Option<Base64>")]
    #[serde(rename = "err-data", skip_serializing_if = "is_none")]
    pub err_data: Option<Bytes>,
}

impl StatusResult {
    pub fn running() -> Self {
        Self::default()
    }

    /// Exit code, zero when not reported
    pub fn exit_code(&self) -> i32 {
        self.exitcode.unwrap_or(0)
    }
}

impl From<ExitRecord> for StatusResult {
    fn from(record: ExitRecord) -> Self {
        let (out_data, err_data) = match record.output {
            Some(output) => (Some(output.stdout), Some(output.stderr)),
            None => (None, None),
        };
        Self {
            exited: true,
            exitcode: Some(record.exit_code),
            out_data,
            err_data,
        }
    }
}

impl From<PollOutcome> for StatusResult {
    fn from(outcome: PollOutcome) -> Self {
        match outcome {
            // Unknown PIDs read as finished, with nothing to report
            PollOutcome::Unknown => Self {
                exited: true,
                exitcode: Some(0),
                ..Default::default()
            },
            PollOutcome::Running => Self::running(),
            PollOutcome::Exited(record) => record.into(),
        }
    }
}
