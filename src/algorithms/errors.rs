use thiserror::Error;

/// Failures raised while an algorithm is recording its trace
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    #[error("{structure} node {id} is referenced but missing from the node table")]
    DanglingNode { structure: &'static str, id: usize },

    #[error("{algorithm} requires {requirement}")]
    InvalidInput {
        algorithm: &'static str,
        requirement: String,
    },

    #[error("{algorithm} overflowed a 64-bit integer computing {what}")]
    Overflow {
        algorithm: &'static str,
        what: String,
    },

    #[error("algorithm panicked: {message}")]
    Panicked { message: String },
}

pub type ExecResult<T> = Result<T, ExecutionError>;
