/*!
 * Request Server Tests
 * Line protocol round trips over a live TCP listener
 */

use exec_service::{api, ExecService};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::time::sleep;

struct Client {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

impl Client {
    async fn connect(service: ExecService) -> Self {
        let listener = api::bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(api::serve(listener, service));

        let stream = TcpStream::connect(addr).await.unwrap();
        let (reader, writer) = stream.into_split();
        Self {
            lines: BufReader::new(reader).lines(),
            writer,
        }
    }

    async fn request_raw(&mut self, line: &str) -> Value {
        self.writer.write_all(line.as_bytes()).await.unwrap();
        self.writer.write_all(b"\n").await.unwrap();
        let reply = self.lines.next_line().await.unwrap().expect("reply line");
        serde_json::from_str(&reply).unwrap()
    }

    async fn request(&mut self, message: Value) -> Value {
        self.request_raw(&message.to_string()).await
    }

    async fn wait_for_exit(&mut self, pid: i64) -> Value {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            let reply = self
                .request(json!({"execute": "guest-exec-status", "arguments": {"pid": pid}}))
                .await;
            if reply["return"]["exited"] == json!(true) {
                return reply["return"].clone();
            }
            assert!(Instant::now() < deadline, "process {} did not exit in time", pid);
            sleep(Duration::from_millis(10)).await;
        }
    }
}

#[tokio::test]
async fn test_exec_and_status_round_trip() {
    let mut client = Client::connect(ExecService::default()).await;

    let reply = client
        .request(json!({
            "execute": "guest-exec",
            "arguments": {
                "path": "/bin/cat",
                "input-data": "aGk=",
                "capture-output": true
            }
        }))
        .await;
    let pid = reply["return"]["pid"].as_i64().expect("pid");
    assert!(pid > 0);

    let status = client.wait_for_exit(pid).await;
    assert_eq!(
        status,
        json!({"exited": true, "exitcode": 0, "out-data": "aGk=", "err-data": ""})
    );
}

#[tokio::test]
async fn test_launch_failure_over_wire() {
    let mut client = Client::connect(ExecService::default()).await;

    let reply = client
        .request(json!({"execute": "guest-exec", "arguments": {"path": "/no/such/program"}}))
        .await;
    assert_eq!(reply, json!({"return": {"pid": -1}}));
}

#[tokio::test]
async fn test_running_status_over_wire() {
    let mut client = Client::connect(ExecService::default()).await;

    let reply = client
        .request(json!({
            "execute": "guest-exec",
            "arguments": {"path": "sleep", "arg": ["0.5"]}
        }))
        .await;
    let pid = reply["return"]["pid"].as_i64().expect("pid");

    let reply = client
        .request(json!({"execute": "guest-exec-status", "arguments": {"pid": pid}}))
        .await;
    assert_eq!(reply, json!({"return": {"exited": false}}));

    let status = client.wait_for_exit(pid).await;
    assert_eq!(status, json!({"exited": true, "exitcode": 0}));
}

#[tokio::test]
async fn test_malformed_request_keeps_connection_open() {
    let mut client = Client::connect(ExecService::default()).await;

    let reply = client.request_raw("{not json").await;
    assert_eq!(reply["error"]["class"], json!("InvalidParameter"));

    let reply = client
        .request(json!({"execute": "guest-exec-status", "arguments": {"pid": 1}}))
        .await;
    assert_eq!(reply["return"]["exited"], json!(true));
}
