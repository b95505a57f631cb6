//! Shared error type for metric registration and updates.

use thiserror::Error;

/// Stable error codes (useful for assertions and logs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed numeric input, negative counter delta, bad name, duplicate info key.
    InvalidArgument,
    /// Wrong number of label values for a family.
    LabelArityMismatch,
    /// Family (or one of its sample names) already registered.
    DuplicateName,
    /// Stateset value outside the declared states.
    UnknownState,
}

impl ErrorKind {
    /// String representation used in logs and tests.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "INVALID_ARGUMENT",
            ErrorKind::LabelArityMismatch => "LABEL_ARITY_MISMATCH",
            ErrorKind::DuplicateName => "DUPLICATE_NAME",
            ErrorKind::UnknownState => "UNKNOWN_STATE",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Errors surfaced synchronously to the caller. A failed call never leaves
/// a partial update behind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricsError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("label arity mismatch: expected {expected} values, got {got}")]
    LabelArityMismatch { expected: usize, got: usize },
    #[error("duplicate metric name: {0}")]
    DuplicateName(String),
    #[error("unknown state: {0}")]
    UnknownState(String),
}

impl MetricsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MetricsError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            MetricsError::LabelArityMismatch { .. } => ErrorKind::LabelArityMismatch,
            MetricsError::DuplicateName(_) => ErrorKind::DuplicateName,
            MetricsError::UnknownState(_) => ErrorKind::UnknownState,
        }
    }
}
