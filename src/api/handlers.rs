/*!
 * Request Handlers
 * Routes wire messages to the launcher and poller
 */

use super::types::{Message, Response};
use crate::monitoring::span_request;
use crate::service::ExecService;
use tracing::{info, warn};

/// Handle one parsed message
pub fn dispatch(service: &ExecService, message: Message) -> Response {
    let span = span_request(message.name());
    let _guard = span.enter();

    match message {
        Message::Exec(args) => {
            info!(
                path = args.path.as_deref().unwrap_or(""),
                args = args.arg.len(),
                capture = args.capture_output,
                trace_id = %span.trace_id(),
                "Launching process"
            );
            let result = service.launch(args.into());
            span.record_status(if result.is_failure() { "failed" } else { "ok" });
            result.into()
        }
        Message::ExecStatus(args) => {
            let result = service.status(args.into());
            span.record_status(if result.exited { "exited" } else { "running" });
            result.into()
        }
    }
}

/// Parse and handle one request line
pub fn handle_line(service: &ExecService, line: &str) -> Response {
    match Message::parse(line) {
        Ok(message) => dispatch(service, message),
        Err(e) => {
            warn!(error = %e, "Rejected malformed request");
            Response::error(&e)
        }
    }
}
