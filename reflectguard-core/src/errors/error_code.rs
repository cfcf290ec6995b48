//! Machine-readable error codes, shared across subsystem error enums.

/// An error that can report a stable, machine-readable code.
///
/// Separate from `Display` (human text via `thiserror`): the code is for
/// log aggregation and the observer seam, the message is for humans.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;
}

pub const QUERY_ERROR: &str = "RG-QUERY";
pub const CONFIG_ERROR: &str = "RG-CONFIG";
