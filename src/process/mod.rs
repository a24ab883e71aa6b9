/*!
 * Process Module
 * Process launching, background reaping, and status polling
 */

pub mod launcher;
pub mod poller;
pub mod signal;
pub mod table;
pub mod types;
mod waiter;

// Re-export for convenience
pub use launcher::Launcher;
pub use poller::Poller;
pub use signal::CompletionSignal;
pub use table::{ProcessHandle, ProcessTable};
pub use types::{
    CapturedOutput, ExitRecord, LaunchRequest, LaunchResult, PollOutcome, StatusRequest,
    StatusResult,
};
