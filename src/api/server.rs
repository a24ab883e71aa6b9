/*!
 * Request Server
 * Line-delimited JSON over TCP, one task per connection
 */

use super::handlers::handle_line;
use super::types::Response;
use crate::core::errors::ExecError;
use crate::core::types::ExecResult;
use crate::service::ExecService;
use std::future::Future;
use std::io::{self, ErrorKind};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info, warn};

/// Longest accepted request line; `input-data` travels inline as base64
pub const MAX_REQUEST_LINE_BYTES: usize = 8 * 1024 * 1024;

/// Pause after a listener error such as fd exhaustion before accepting again
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Bind a listener for the service
pub async fn bind(addr: SocketAddr) -> ExecResult<TcpListener> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Request server listening");
    Ok(listener)
}

/// Accept connections for as long as the returned future is polled
pub async fn serve(listener: TcpListener, service: ExecService) {
    let listener = &listener;
    accept_loop(move || listener.accept(), service).await
}

/// Accept failures never stop the loop: per-connection errors are skipped,
/// anything else backs off and retries
pub(crate) async fn accept_loop<F, Fut>(mut accept: F, service: ExecService)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = io::Result<(TcpStream, SocketAddr)>>,
{
    loop {
        let (stream, peer) = match accept().await {
            Ok(conn) => conn,
            Err(e) if is_connection_error(&e) => {
                debug!(error = %e, "Connection failed during accept");
                continue;
            }
            Err(e) => {
                error!(error = %e, backoff_ms = ACCEPT_BACKOFF.as_millis() as u64, "Failed to accept connection");
                tokio::time::sleep(ACCEPT_BACKOFF).await;
                continue;
            }
        };

        debug!(peer = %peer, "Connection accepted");
        let service = service.clone();
        tokio::spawn(async move {
            let (reader, writer) = stream.into_split();
            match handle_connection(reader, writer, &service, MAX_REQUEST_LINE_BYTES).await {
                Ok(()) => debug!(peer = %peer, "Connection closed"),
                Err(e) => warn!(peer = %peer, error = %e, "Connection closed with error"),
            }
        });
    }
}

fn is_connection_error(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        ErrorKind::ConnectionRefused
            | ErrorKind::ConnectionAborted
            | ErrorKind::ConnectionReset
            | ErrorKind::Interrupted
    )
}

enum RequestLine {
    Complete(String),
    TooLong,
    Eof,
}

/// Read one newline-terminated line of at most `limit` bytes
async fn read_request_line<R>(reader: &mut R, limit: usize) -> io::Result<RequestLine>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let read = (&mut *reader)
        .take(limit as u64 + 1)
        .read_until(b'\n', &mut buf)
        .await?;

    if read == 0 {
        return Ok(RequestLine::Eof);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
    } else if buf.len() > limit {
        return Ok(RequestLine::TooLong);
    }

    Ok(RequestLine::Complete(String::from_utf8_lossy(&buf).into_owned()))
}

pub(crate) async fn handle_connection<R, W>(
    reader: R,
    mut writer: W,
    service: &ExecService,
    limit: usize,
) -> ExecResult<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut reader = BufReader::new(reader);

    loop {
        let line = match read_request_line(&mut reader, limit).await? {
            RequestLine::Complete(line) => line,
            RequestLine::Eof => break,
            RequestLine::TooLong => {
                // No way to find the next message boundary, so the connection ends here
                let err = ExecError::InvalidRequest(format!("request line exceeds {} bytes", limit));
                warn!(limit = limit, "Rejected oversized request");
                writer.write_all(Response::error(&err).to_line()?.as_bytes()).await?;
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = handle_line(service, line);
        let payload = match response.to_line() {
            Ok(payload) => payload,
            Err(e) => Response::error(&e).to_line()?,
        };
        writer.write_all(payload.as_bytes()).await?;
    }

    writer.shutdown().await?;
    Ok(())
}
