/*!
 * Core Types
 * Common types used across the service
 */

/// OS-assigned process ID, the key of the process table
pub type Pid = u32;

/// PID as it travels over the wire (negative values are sentinels)
pub type WirePid = i64;

/// Exit code reported for processes that did not exit normally
pub const ABNORMAL_EXIT_CODE: i32 = -1;

/// Common result type for service operations
pub type ExecResult<T> = Result<T, super::errors::ExecError>;
