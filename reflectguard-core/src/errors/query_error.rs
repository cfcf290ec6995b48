//! Abstention reasons for call-precedence queries.
//!
//! The checker's public contract never raises these as exceptions — every
//! query is total and returns `(called, ok)`. `QueryError` exists only for
//! the observer/logging seam: it lets a caller see *why* `ok` came back
//! `false` without the core depending on a diagnostics layer.

use super::error_code::{self, ErrorCode};

/// Why a call-precedence query abstained instead of proving or disproving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("block is nil")]
    NilBlock,

    #[error("instruction index out of range")]
    IndexOutOfRange,

    #[error("no methods supplied to match against")]
    EmptyMethodSet,

    #[error("instruction at (block, index) does not produce a value of the receiver type")]
    ReceiverTypeMismatch,

    #[error("receiver has escaped local reasoning (returned, passed as an argument, or ignored)")]
    EscapedReceiver,
}

impl ErrorCode for QueryError {
    fn error_code(&self) -> &'static str {
        error_code::QUERY_ERROR
    }
}
