/*!
 * Exec Service Library
 * Launch external programs asynchronously and poll their status without blocking
 */

pub mod api;
pub mod core;
pub mod monitoring;
pub mod process;
pub mod service;

// Re-exports
pub use crate::core::{ExecError, ExecResult, Pid, ServiceConfig};
pub use monitoring::init_tracing;
pub use process::{
    ExitRecord, LaunchRequest, LaunchResult, Launcher, PollOutcome, Poller, ProcessHandle,
    ProcessTable, StatusRequest, StatusResult,
};
pub use service::ExecService;
