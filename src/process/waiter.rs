/*!
 * Process Waiter
 * Blocking-pool task that reaps one child and publishes its terminal result
 */

use super::table::ProcessHandle;
use super::types::{CapturedOutput, ExitRecord};
use crate::core::types::{Pid, ABNORMAL_EXIT_CODE};
use std::io::{self, ErrorKind, Write};
use std::process::{Child, ChildStdin, Output};
use std::thread;
use tokio::runtime::Handle;
use tracing::{debug, error, info};

/// Spawn the waiter for a freshly started child
pub(crate) fn spawn(
    runtime: &Handle,
    handle: ProcessHandle,
    child: Child,
    input: Option<Vec<u8>>,
    capture_output: bool,
) {
    runtime.spawn_blocking(move || run(handle, child, input, capture_output));
}

fn run(handle: ProcessHandle, mut child: Child, input: Option<Vec<u8>>, capture_output: bool) {
    let pid = handle.pid();
    let stdin = child.stdin.take();

    // Stdin is fed while the outputs drain, so a child that echoes
    // large input back cannot fill its pipes and stall
    let waited = thread::scope(|scope| {
        if let (Some(stdin), Some(input)) = (stdin, input) {
            let feeder = thread::Builder::new()
                .name(format!("exec-stdin-{}", pid))
                .spawn_scoped(scope, move || feed_stdin(pid, stdin, &input));
            if let Err(e) = feeder {
                // The stdin pipe was moved into the failed closure and is closed
                error!(pid = pid, error = %e, "Failed to start input feeder");
            }
        }
        child.wait_with_output()
    });

    publish(&handle, exit_record(pid, waited, capture_output));
}

/// Build the terminal result from the outcome of waiting on the child
pub(crate) fn exit_record(pid: Pid, waited: io::Result<Output>, capture_output: bool) -> ExitRecord {
    match waited {
        Ok(output) => {
            let exit_code = output.status.code().unwrap_or(ABNORMAL_EXIT_CODE);
            info!(pid = pid, exit_code = exit_code, "Process exited");
            ExitRecord {
                exit_code,
                output: capture_output.then(|| CapturedOutput::new(output.stdout, output.stderr)),
            }
        }
        Err(e) => {
            error!(pid = pid, error = %e, "Error waiting for process");
            ExitRecord {
                exit_code: ABNORMAL_EXIT_CODE,
                output: capture_output.then(CapturedOutput::default),
            }
        }
    }
}

/// Publish the terminal result; returns false if one was already published
pub(crate) fn publish(handle: &ProcessHandle, record: ExitRecord) -> bool {
    let published = handle.signal().fulfill(record);
    if !published {
        error!(pid = handle.pid(), "Terminal result already published");
    }
    published
}

fn feed_stdin(pid: Pid, mut stdin: ChildStdin, input: &[u8]) {
    if let Err(e) = stdin.write_all(input) {
        if e.kind() == ErrorKind::BrokenPipe {
            debug!(pid = pid, "Process closed stdin before reading all input");
        } else {
            error!(pid = pid, error = %e, "Failed to write process input");
        }
    }
    // Dropping stdin closes the pipe and delivers EOF
}
