use thiserror::Error;

/// Failures a caller of the squad store can observe.
///
/// Persistence problems are not in here: the in-memory state stays
/// authoritative and write failures surface as warnings instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SquadError {
    /// Import payload is malformed or missing required fields
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Snapshot not found: {id}")]
    NotFound { id: u64 },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for SquadError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            SquadError::Validation(err.to_string())
        } else {
            SquadError::Serialization(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, SquadError>;
