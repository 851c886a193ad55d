
use thiserror::Error;

use crate::var::Kind;

#[derive(Error, Debug)]
pub enum DynamicError {
    #[error("invalid {op} operation on {kind}")]
    InvalidOperation { op: &'static str, kind: Kind },
    #[error("[{index}] out of range in vector of length {len}")]
    OutOfRange { index: i64, len: usize },
    #[error("[{key}] not found in map")]
    NotFound { key: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, DynamicError>;
