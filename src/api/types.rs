/*!
 * API Types
 * Wire messages for the line-delimited JSON protocol
 */

use crate::core::errors::ExecError;
use crate::core::serde::{is_empty_vec, is_false, is_none};
use crate::core::types::WirePid;
use crate::process::{LaunchRequest, LaunchResult, StatusRequest, StatusResult};
use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as};

/// Arguments of a `guest-exec` message
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ExecArgs {
    #[serde(default, skip_serializing_if = "is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "is_empty_vec")]
    pub arg: Vec<String>,
    #[serde_as(as = "Option<Base64>")]
    #[serde(skip_serializing_if = "is_none")]
    pub input_data: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub capture_output: bool,
}

impl From<ExecArgs> for LaunchRequest {
    fn from(args: ExecArgs) -> Self {
        LaunchRequest {
            path: args.path,
            args: args.arg,
            input: args.input_data,
            capture_output: args.capture_output,
        }
    }
}

/// Arguments of a `guest-exec-status` message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusArgs {
    pub pid: WirePid,
}

impl From<StatusArgs> for StatusRequest {
    fn from(args: StatusArgs) -> Self {
        StatusRequest { pid: args.pid }
    }
}

/// Incoming request message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "execute", content = "arguments")]
pub enum Message {
    #[serde(rename = "guest-exec")]
    Exec(ExecArgs),
    #[serde(rename = "guest-exec-status")]
    ExecStatus(StatusArgs),
}

impl Message {
    pub fn parse(line: &str) -> Result<Self, ExecError> {
        Ok(serde_json::from_str(line)?)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Message::Exec(_) => "guest-exec",
            Message::ExecStatus(_) => "guest-exec-status",
        }
    }
}

/// Successful reply payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReturnValue {
    Launch(LaunchResult),
    Status(StatusResult),
}

/// Error reply payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub class: String,
    pub desc: String,
}

/// Outgoing reply message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Response {
    Return(ReturnValue),
    Error(ErrorBody),
}

impl Response {
    pub fn error(err: &ExecError) -> Self {
        Response::Error(ErrorBody {
            class: err.class().to_string(),
            desc: err.to_string(),
        })
    }

    pub fn to_line(&self) -> Result<String, ExecError> {
        let mut line = serde_json::to_string(self).map_err(|e| ExecError::Io(e.to_string()))?;
        line.push('\n');
        Ok(line)
    }
}

impl From<LaunchResult> for Response {
    fn from(result: LaunchResult) -> Self {
        Response::Return(ReturnValue::Launch(result))
    }
}

impl From<StatusResult> for Response {
    fn from(result: StatusResult) -> Self {
        Response::Return(ReturnValue::Status(result))
    }
}
