use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Dream not found: {id}")]
    NotFound { id: String },

    #[error("Ambiguous dream ID prefix '{prefix}': {matches} matches")]
    AmbiguousId { prefix: String, matches: usize },

    #[error("Invalid snapshot: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}
