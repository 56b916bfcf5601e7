use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Unknown wager status: '{0}'")]
    UnknownStatus(String),

    #[error("Invalid timestamp: '{0}'")]
    InvalidTimestamp(String),
}
