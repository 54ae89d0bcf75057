//! Error types for the state layer.

use thiserror::Error;

use auction_client::ApiError;

/// Errors surfaced by the stores and state objects.
///
/// Reads from local storage never produce an error; corrupt or missing
/// records degrade to empty values. Writes and remote calls do fail.
#[derive(Error, Debug)]
pub enum StateError {
    /// Local persistence write failure.
    #[error("storage error: {0}")]
    Storage(String),

    /// Remote call failure, as reported by the API client.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl StateError {
    /// Whether the underlying failure was an HTTP 401.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_unauthorized())
    }
}
