//! Token pair model.

use serde::{Deserialize, Serialize};

/// Access + refresh credential bundle returned by `POST /api/token/` and
/// `POST /api/token/refresh/`, and persisted as a single record.
///
/// The two tokens always travel together; storing one without the other is
/// not representable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenPair {
    /// Short-lived bearer token attached to authenticated requests
    pub access: String,
    /// Long-lived token used to obtain a fresh pair
    pub refresh: String,
}

impl TokenPair {
    /// Create a new token pair.
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self { access: access.into(), refresh: refresh.into() }
    }
}
