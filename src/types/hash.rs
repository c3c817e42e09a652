//! Token Hash Types
//!
//! Persistable and OAuth2-response shapes of a token.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Token type reported in OAuth2-shaped output.
pub const BEARER_TOKEN_TYPE: &str = "bearer";

/// Persistable token mapping, consumed again by `Token::from_hash`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenHash<S = Value> {
    /// Raw token value.
    pub token: String,
    /// Expiration as RFC 3339 text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    /// Opaque scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<S>,
    /// Nested refresh token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<Box<TokenHash<S>>>,
}

impl<S> TokenHash<S> {
    /// Hash of a bare, non-expiring value.
    pub fn from_value(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            expiration_date: None,
            scope: None,
            refresh_token: None,
        }
    }
}

/// Bearer token issuance response body. Output only.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OAuthTokenResponse<S = Value> {
    /// Access token.
    pub access_token: String,
    /// Always `"bearer"`.
    pub token_type: String,
    /// Seconds until expiration, `null` when the token never expires.
    pub expires_in: Option<f64>,
    /// Scope, passed through unchanged.
    pub scope: Option<S>,
    /// Refresh fields, omitted entirely without a refresh token.
    #[serde(flatten)]
    pub refresh: Option<OAuthRefreshFields>,
}

/// Refresh token part of an OAuth2 response.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OAuthRefreshFields {
    /// Raw refresh token value.
    pub refresh_token: String,
    /// Seconds until the refresh token expires, `null` when it never does.
    pub refresh_token_expires_in: Option<f64>,
}
