//! Error handling for reflectguard.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod query_error;

pub use config_error::ConfigError;
pub use error_code::ErrorCode;
pub use query_error::QueryError;
