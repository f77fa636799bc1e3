use dreamdiary_core::error::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}
