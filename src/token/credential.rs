//! Token
//!
//! The credential value type: construction rules, time-based predicates and
//! validation gates.

use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::fmt;

use crate::builders::TokenBuilder;
use crate::error::{ArgumentError, TokenError, TokenResult};
use crate::types::expiration::{duration_secs, expiration_after};
use crate::types::{ExpirationDate, RefreshToken};

/// Optional construction inputs for [`Token::new`].
#[derive(Clone, Debug)]
pub struct TokenParams<S = Value> {
    /// Absolute expiration. Conflicts with `expires_in_seconds`.
    pub expiration_date: Option<ExpirationDate>,
    /// Expiration relative to construction time. Conflicts with `expiration_date`.
    pub expires_in_seconds: Option<f64>,
    /// Opaque scope.
    pub scope: Option<S>,
    /// Refresh credential.
    pub refresh_token: Option<RefreshToken<S>>,
}

impl<S> Default for TokenParams<S> {
    fn default() -> Self {
        Self {
            expiration_date: None,
            expires_in_seconds: None,
            scope: None,
            refresh_token: None,
        }
    }
}

/// Expirable, refreshable access credential.
///
/// Immutable once built. Expiration state is recomputed against the wall
/// clock on every call, so the same token moves from valid to expired
/// without being touched.
#[derive(Clone)]
pub struct Token<S = Value> {
    value: SecretString,
    expiration_date: Option<DateTime<Utc>>,
    scope: Option<S>,
    refresh_token: Option<Box<Token<S>>>,
}

impl<S> Token<S> {
    /// Create a token, rejecting conflicting or unreadable expiration inputs.
    pub fn new(value: impl Into<String>, params: TokenParams<S>) -> TokenResult<Self> {
        let TokenParams {
            expiration_date,
            expires_in_seconds,
            scope,
            refresh_token,
        } = params;

        let expiration_date = match (expiration_date, expires_in_seconds) {
            (Some(_), Some(_)) => return Err(reject(ArgumentError::ConflictingExpiration)),
            (Some(date), None) => Some(date.resolve().map_err(reject)?),
            (None, Some(seconds)) => Some(expiration_after(Utc::now(), seconds).map_err(reject)?),
            (None, None) => None,
        };

        Ok(Self {
            value: SecretString::new(value.into()),
            expiration_date,
            scope,
            refresh_token: refresh_token.map(|refresh| Box::new(refresh.into_token())),
        })
    }

    /// Create a token that never expires.
    pub fn non_expiring(value: impl Into<String>) -> Self {
        Self {
            value: SecretString::new(value.into()),
            expiration_date: None,
            scope: None,
            refresh_token: None,
        }
    }

    /// Create a token expiring `seconds` from now.
    pub fn expiring_in(value: impl Into<String>, seconds: f64) -> TokenResult<Self> {
        Self::new(
            value,
            TokenParams {
                expires_in_seconds: Some(seconds),
                ..Default::default()
            },
        )
    }

    /// Start a fluent builder.
    pub fn builder(value: impl Into<String>) -> TokenBuilder<S> {
        TokenBuilder::new(value)
    }

    /// Raw token value.
    pub fn value(&self) -> &str {
        self.value.expose_secret()
    }

    /// Absolute expiration, `None` when the token never expires.
    pub fn expiration_date(&self) -> Option<DateTime<Utc>> {
        self.expiration_date
    }

    /// Opaque scope.
    pub fn scope(&self) -> Option<&S> {
        self.scope.as_ref()
    }

    /// Nested refresh token.
    pub fn refresh_token(&self) -> Option<&Token<S>> {
        self.refresh_token.as_deref()
    }

    /// Check if an expiration is set at all.
    pub fn expires(&self) -> bool {
        self.expiration_date.is_some()
    }

    /// Check if the expiration lies strictly in the past.
    pub fn expired(&self) -> bool {
        self.expiration_date
            .map(|exp| exp < Utc::now())
            .unwrap_or(false)
    }

    /// Check if the token can be used.
    ///
    /// The value is always present, so this is "not expired".
    pub fn valid(&self) -> bool {
        !self.expired()
    }

    /// Negation of [`Token::valid`].
    pub fn invalid(&self) -> bool {
        !self.valid()
    }

    /// Check if the refresh token is currently valid.
    ///
    /// Only looks one level down.
    pub fn refreshable(&self) -> bool {
        self.refresh_token
            .as_deref()
            .map(|refresh| refresh.valid())
            .unwrap_or(false)
    }

    /// Signed time left before expiration, negative once expired.
    pub fn time_until_expiration(&self) -> Option<Duration> {
        self.expiration_date.map(|exp| exp - Utc::now())
    }

    /// Signed seconds left before expiration, negative once expired.
    pub fn seconds_until_expiration(&self) -> Option<f64> {
        self.time_until_expiration().map(duration_secs)
    }

    /// Check if token expires within `threshold` (or already has).
    pub fn is_expiring_soon(&self, threshold: std::time::Duration) -> bool {
        self.expiration_date
            .map(|exp| {
                Duration::from_std(threshold)
                    .ok()
                    .and_then(|threshold| Utc::now().checked_add_signed(threshold))
                    .map(|limit| exp <= limit)
                    .unwrap_or(true)
            })
            .unwrap_or(false)
    }

    /// Fail with [`TokenError::InvalidToken`] unless the token is valid.
    pub fn validate(&self) -> TokenResult<()> {
        if self.valid() {
            return Ok(());
        }

        tracing::debug!(
            expired_at = ?self.expiration_date,
            "token failed validation"
        );
        Err(TokenError::InvalidToken {
            expired_at: self.expiration_date,
        })
    }

    /// Fail with [`TokenError::NotRefreshable`] unless the token is refreshable.
    pub fn validate_refreshable(&self) -> TokenResult<()> {
        if self.refreshable() {
            return Ok(());
        }

        tracing::debug!(
            has_refresh_token = self.refresh_token.is_some(),
            "token is not refreshable"
        );
        Err(TokenError::NotRefreshable)
    }

    /// Format as Authorization header value.
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.value.expose_secret())
    }
}

/// Log and wrap a rejected construction input.
pub(crate) fn reject(error: ArgumentError) -> TokenError {
    tracing::debug!(reason = %error, "rejected token construction");
    TokenError::InvalidArgument(error)
}

impl<S> fmt::Display for Token<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value.expose_secret())
    }
}

impl<S: fmt::Debug> fmt::Debug for Token<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("value", &"[REDACTED]")
            .field("expiration_date", &self.expiration_date)
            .field("scope", &self.scope)
            .field("refresh_token", &self.refresh_token)
            .finish()
    }
}

impl<S: PartialEq> PartialEq for Token<S> {
    fn eq(&self, other: &Self) -> bool {
        self.value.expose_secret() == other.value.expose_secret()
            && self.expiration_date == other.expiration_date
            && self.scope == other.scope
            && self.refresh_token == other.refresh_token
    }
}
