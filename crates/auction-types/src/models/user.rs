//! User and registration models.

use serde::{Deserialize, Serialize};

use crate::serde_util::lenient_f64;

/// Role attached to a profile in `GET /api/auth/me/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Role {
    pub id: i64,
    pub name: String,
    /// Stable machine-readable code (e.g. `"seller"`)
    pub code: String,
}

/// Locally cached representation of the authenticated account.
///
/// The authoritative copy lives server-side; this struct is refreshed
/// wholesale from `GET /api/auth/me/` and persisted for fast app start.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionUser {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// Account balance; the backend emits this as a number or a decimal string
    #[serde(default, deserialize_with = "lenient_f64")]
    pub balance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl SessionUser {
    /// Minimal placeholder seeded right after login, before the
    /// authoritative profile fetch fills in the rest.
    pub fn minimal(username: impl Into<String>) -> Self {
        Self {
            id: 0,
            username: username.into(),
            name: String::new(),
            email: String::new(),
            balance: 0.0,
            role: None,
        }
    }

    /// Check whether the account carries the given role code.
    pub fn has_role(&self, code: &str) -> bool {
        self.role.as_ref().is_some_and(|r| r.code == code)
    }
}

/// Request body for `POST /api/auth/register/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterPayload {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passport_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<i64>,
}

impl RegisterPayload {
    /// Payload with only the required fields set.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            phone_number: None,
            passport_number: None,
            role_id: None,
        }
    }
}

/// Response from `POST /api/auth/register/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Request body for `POST /api/auth/balance/top-up/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopUpPayload {
    pub amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_with_string_balance() {
        let json = r#"{
            "id": 7,
            "username": "alice",
            "name": "Alice",
            "email": "alice@example.com",
            "balance": "1500.50",
            "role": {"id": 1, "name": "Seller", "code": "seller"}
        }"#;
        let user: SessionUser = serde_json::from_str(json).expect("profile should parse");
        assert_eq!(user.balance, 1500.50);
        assert!(user.has_role("seller"));
        assert!(!user.has_role("admin"));
    }

    #[test]
    fn test_profile_without_role() {
        let json = r#"{"id": 1, "username": "bob", "email": "b@e.com", "balance": 0}"#;
        let user: SessionUser = serde_json::from_str(json).expect("sparse profile should parse");
        assert_eq!(user.role, None);
        assert_eq!(user.name, "");
    }

    #[test]
    fn test_register_payload_skips_absent_optionals() {
        let payload = RegisterPayload::new("carol", "c@e.com", "hunter2");
        let json = serde_json::to_value(&payload).expect("serialize");
        assert!(json.get("phone_number").is_none());
        assert!(json.get("role_id").is_none());
    }
}
