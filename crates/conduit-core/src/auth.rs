use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::payload::text_field;

/// Credentials sent to the auth service to create an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub agree_to_terms: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marketing_opt_in: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invite_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remember_me: Option<bool>,
}

/// Identity returned by the auth service after registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthIdentity {
    pub user_id: String,
    pub email: Option<String>,
    pub username: Option<String>,
}

impl AuthIdentity {
    /// Identity from a registration reply; `None` without a usable `userId`.
    #[must_use]
    pub fn from_payload(payload: &Value) -> Option<Self> {
        Some(Self {
            user_id: text_field(payload, "userId")?,
            email: text_field(payload, "email"),
            username: text_field(payload, "username"),
        })
    }
}
