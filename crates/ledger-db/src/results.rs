use thiserror::Error as ThisError;

/// Model errors
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum QueryError {
    #[error("Not found")]
    NotFound,
    #[error("Ambiguous results ({0:?}) for query")]
    Ambiguous(usize),
}
