use thiserror::Error;

/// Errors raised while syncing form state with the URL fragment
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    #[error("No element with id '{0}'")]
    MissingElement(String),
    #[error("Browser error: {0}")]
    Browser(String),
    #[error("Configuration error: {0}")]
    Config(String),
}
