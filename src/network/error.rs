use thiserror::Error;

use crate::storage::StorageError;

/// Errors from talking to the chat API.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unauthorized")]
    Unauthorized,

    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("local storage error: {0}")]
    Storage(#[from] StorageError),
}
