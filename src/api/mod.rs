/*!
 * API Module
 * Wire protocol for launch and status requests
 */

pub mod handlers;
pub mod server;
pub mod types;

pub use handlers::{dispatch, handle_line};
pub use server::{bind, serve};
pub use types::{ErrorBody, ExecArgs, Message, Response, ReturnValue, StatusArgs};
