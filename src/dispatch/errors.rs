use super::input::Operation;
use crate::algorithms::ExecutionError;
use thiserror::Error;

/// Rejections raised while validating raw input, before any algorithm runs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("invalid number in {field}: \"{token}\"")]
    InvalidNumber { field: &'static str, token: String },

    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("no operation selected")]
    MissingOperation,

    #[error("unknown operation '{name}'")]
    UnknownOperation { name: String },

    #[error("operation '{operation}' is not supported by {algorithm}")]
    UnsupportedOperation {
        algorithm: &'static str,
        operation: Operation,
    },

    #[error("operation '{operation}' needs a value")]
    MissingOperand { operation: Operation },

    #[error("malformed {what} \"{entry}\", expected {expected}")]
    Malformed {
        what: &'static str,
        entry: String,
        expected: &'static str,
    },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("need at least {min} dimensions, got {got}")]
    TooFewDimensions { min: usize, got: usize },

    #[error("{algorithm} expects {expected} input, got {got}")]
    KindMismatch {
        algorithm: &'static str,
        expected: super::InputKind,
        got: super::InputKind,
    },
}

/// Why a run produced no result
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("unknown algorithm '{0}'")]
    UnknownAlgorithm(String),

    #[error("invalid input: {0}")]
    Input(#[from] InputError),

    #[error("execution failed: {0}")]
    Execution(#[from] ExecutionError),
}
