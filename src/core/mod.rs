/*!
 * Core Module
 * Fundamental service types, configuration, and error handling
 */

pub mod config;
pub mod errors;
pub mod serde;
pub mod types;

// Re-export for convenience
pub use config::ServiceConfig;
pub use errors::*;
pub use types::*;
