/*!
 * Launch Tests
 * Spawning, stdin wiring, output capture, and exit codes
 */

use exec_service::{ExecService, LaunchRequest, StatusRequest, StatusResult};
use pretty_assertions::assert_eq;
use std::time::{Duration, Instant};
use tokio::time::sleep;

async fn wait_for_exit(service: &ExecService, pid: i64) -> StatusResult {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        let status = service.status(StatusRequest { pid });
        if status.exited {
            return status;
        }
        assert!(Instant::now() < deadline, "process {} did not exit in time", pid);
        sleep(Duration::from_millis(10)).await;
    }
}

fn sh(script: &str) -> LaunchRequest {
    LaunchRequest::new("/bin/sh").with_args(["-c", script])
}

#[tokio::test]
async fn test_captured_stdout() {
    let service = ExecService::default();
    let result = service.launch(sh("printf hi").with_capture(true));
    assert!(!result.is_failure());
    assert!(result.pid > 0);

    let status = wait_for_exit(&service, result.pid).await;
    assert!(status.exited);
    assert_eq!(status.exitcode, Some(0));
    assert_eq!(status.out_data.as_deref(), Some(&b"hi"[..]));
    assert_eq!(status.err_data.as_deref(), Some(&b""[..]));
}

#[tokio::test]
async fn test_stderr_captured_separately() {
    let service = ExecService::default();
    let result = service.launch(sh("printf out; printf err >&2").with_capture(true));

    let status = wait_for_exit(&service, result.pid).await;
    assert_eq!(status.out_data.as_deref(), Some(&b"out"[..]));
    assert_eq!(status.err_data.as_deref(), Some(&b"err"[..]));
}

#[tokio::test]
async fn test_explicit_exit_code() {
    let service = ExecService::default();
    for code in [0, 1, 7, 42, 255] {
        let result = service.launch(sh(&format!("exit {}", code)));
        let status = wait_for_exit(&service, result.pid).await;
        assert_eq!(status.exit_code(), code, "exit {}", code);
    }
}

#[tokio::test]
async fn test_signal_terminated_process() {
    let service = ExecService::default();
    let result = service.launch(sh("kill -9 $$"));

    let status = wait_for_exit(&service, result.pid).await;
    assert!(status.exited);
    assert_eq!(status.exit_code(), -1);
}

#[tokio::test]
async fn test_nonexistent_executable() {
    let service = ExecService::default();
    let result = service.launch(LaunchRequest::new("/nonexistent/path/to/binary"));

    assert!(result.is_failure());
    assert_eq!(result.pid, -1);
    assert!(service.table().is_empty());
}

#[tokio::test]
async fn test_input_is_fed_to_stdin() {
    let service = ExecService::default();
    let result = service.launch(
        LaunchRequest::new("cat")
            .with_input(b"hello\nworld\n".to_vec())
            .with_capture(true),
    );

    let status = wait_for_exit(&service, result.pid).await;
    assert_eq!(status.exit_code(), 0);
    assert_eq!(status.out_data.as_deref(), Some(&b"hello\nworld\n"[..]));
}

#[tokio::test]
async fn test_large_input_round_trips_through_cat() {
    let service = ExecService::default();
    let input: Vec<u8> = (0..1024 * 1024).map(|i| (i % 251) as u8).collect();
    let result = service.launch(
        LaunchRequest::new("cat")
            .with_input(input.clone())
            .with_capture(true),
    );

    let status = wait_for_exit(&service, result.pid).await;
    assert_eq!(status.exit_code(), 0);
    assert_eq!(status.out_data.map(|b| b.len()), Some(input.len()));
}

#[tokio::test]
async fn test_no_input_means_empty_stdin() {
    let service = ExecService::default();
    let result = service.launch(LaunchRequest::new("cat").with_capture(true));

    let status = wait_for_exit(&service, result.pid).await;
    assert_eq!(status.exit_code(), 0);
    assert_eq!(status.out_data.as_deref(), Some(&b""[..]));
}

#[tokio::test]
async fn test_input_ignored_by_child() {
    let service = ExecService::default();
    let result = service.launch(sh("exit 3").with_input(vec![b'x'; 256 * 1024]));

    let status = wait_for_exit(&service, result.pid).await;
    assert_eq!(status.exit_code(), 3);
}

#[tokio::test]
async fn test_without_capture_has_no_data() {
    let service = ExecService::default();
    let result = service.launch(sh("echo discarded"));

    let status = wait_for_exit(&service, result.pid).await;
    assert_eq!(status.exit_code(), 0);
    assert_eq!(status.out_data, None);
    assert_eq!(status.err_data, None);
}

#[tokio::test]
async fn test_shell_fallback_matches_direct_invocation() {
    let expected = std::process::Command::new("/bin/sh")
        .arg("-c")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .expect("run /bin/sh")
        .code();

    let service = ExecService::default();
    // Arguments are only used with an explicit path
    let result = service.launch(
        LaunchRequest::shell()
            .with_args(["echo", "ignored"])
            .with_capture(true),
    );
    assert!(!result.is_failure());

    let status = wait_for_exit(&service, result.pid).await;
    assert_eq!(status.exitcode, expected);
    assert_eq!(status.out_data.as_deref(), Some(&b""[..]));
}

#[tokio::test]
async fn test_empty_path_uses_shell_fallback() {
    let service = ExecService::default();
    let result = service.launch(LaunchRequest::new(""));
    assert!(!result.is_failure());

    let status = wait_for_exit(&service, result.pid).await;
    assert!(status.exited);
}

#[tokio::test]
async fn test_awaiting_spawned_handle() {
    let service = ExecService::default();
    let handle = service
        .launcher()
        .spawn(sh("printf done; exit 5").with_capture(true))
        .expect("spawn sh");

    let record = handle.exited().await;
    assert_eq!(record.exit_code, 5);
    assert_eq!(record.output.map(|o| o.stdout.to_vec()), Some(b"done".to_vec()));
}
