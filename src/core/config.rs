/*!
 * Service Configuration
 *
 * Runtime configuration loaded from the environment
 */

use super::errors::ExecError;
use super::types::ExecResult;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:7400";
pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Address the request server listens on
    pub listen_addr: SocketAddr,
    /// Shell invoked when a launch request carries no executable path
    pub shell: PathBuf,
    /// Emit JSON-formatted logs
    pub trace_json: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 7400)),
            shell: PathBuf::from(DEFAULT_SHELL),
            trace_json: false,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from the process environment
    ///
    /// Environment variables:
    /// - EXEC_LISTEN_ADDR: TCP listen address (default: 127.0.0.1:7400)
    /// - EXEC_SHELL: fallback shell (default: /bin/sh)
    /// - EXEC_TRACE_JSON: JSON log output (default: false)
    pub fn from_env() -> ExecResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> ExecResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = lookup("EXEC_LISTEN_ADDR") {
            config.listen_addr = addr.parse().map_err(|e| {
                ExecError::Config(format!("EXEC_LISTEN_ADDR={:?}: {}", addr, e))
            })?;
        }

        if let Some(shell) = lookup("EXEC_SHELL") {
            if shell.trim().is_empty() {
                return Err(ExecError::Config("EXEC_SHELL is empty".to_string()));
            }
            config.shell = PathBuf::from(shell);
        }

        if let Some(flag) = lookup("EXEC_TRACE_JSON") {
            config.trace_json = parse_flag(&flag).ok_or_else(|| {
                ExecError::Config(format!("EXEC_TRACE_JSON={:?} is not a boolean", flag))
            })?;
        }

        Ok(config)
    }

    pub fn with_shell(mut self, shell: impl Into<PathBuf>) -> Self {
        self.shell = shell.into();
        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
