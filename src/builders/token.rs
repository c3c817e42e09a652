//! Token Builder
//!
//! Fluent builder for tokens.

use serde_json::Value;
use std::time::Duration;

use crate::error::TokenResult;
use crate::token::{Token, TokenParams};
use crate::types::{ExpirationDate, RefreshToken};

/// Token builder.
///
/// Inputs are checked together in [`TokenBuilder::build`], so setting both an
/// absolute and a relative expiration fails there.
pub struct TokenBuilder<S = Value> {
    value: String,
    params: TokenParams<S>,
}

impl<S> TokenBuilder<S> {
    /// Create new token builder.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            params: TokenParams::default(),
        }
    }

    /// Set absolute expiration.
    pub fn expiration_date(mut self, expiration_date: impl Into<ExpirationDate>) -> Self {
        self.params.expiration_date = Some(expiration_date.into());
        self
    }

    /// Set expiration relative to build time.
    pub fn expires_in_seconds(mut self, seconds: f64) -> Self {
        self.params.expires_in_seconds = Some(seconds);
        self
    }

    /// Set expiration relative to build time.
    pub fn expires_in(self, lifetime: Duration) -> Self {
        self.expires_in_seconds(lifetime.as_secs_f64())
    }

    /// Set scope.
    pub fn scope(mut self, scope: S) -> Self {
        self.params.scope = Some(scope);
        self
    }

    /// Set refresh token from a token or a raw value.
    pub fn refresh_token(mut self, refresh_token: impl Into<RefreshToken<S>>) -> Self {
        self.params.refresh_token = Some(refresh_token.into());
        self
    }

    /// Build the token.
    pub fn build(self) -> TokenResult<Token<S>> {
        Token::new(self.value, self.params)
    }
}

/// Create a new token builder.
pub fn token_builder<S>(value: impl Into<String>) -> TokenBuilder<S> {
    TokenBuilder::new(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ArgumentError, TokenError};
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn test_builder_defaults() {
        let token: Token = token_builder("abc").build().unwrap();
        assert_eq!(token.value(), "abc");
        assert!(!token.expires());
        assert!(token.scope().is_none());
        assert!(token.refresh_token().is_none());
    }

    #[test]
    fn test_builder_all_fields() {
        let refresh: Token = Token::builder("r1").expires_in_seconds(1200.0).build().unwrap();
        let token: Token = Token::builder("abc")
            .expires_in(Duration::from_secs(600))
            .scope(json!(["read"]))
            .refresh_token(refresh)
            .build()
            .unwrap();

        assert!(token.expires());
        assert!(token.valid());
        assert!(token.refreshable());
        assert_eq!(token.scope(), Some(&json!(["read"])));
        assert!(token.refresh_token().unwrap().expires());
    }

    #[test]
    fn test_builder_conflicting_expiration() {
        let result: TokenResult<Token> = Token::builder("abc")
            .expiration_date(Utc::now())
            .expires_in_seconds(60.0)
            .build();

        assert_eq!(
            result.unwrap_err(),
            TokenError::InvalidArgument(ArgumentError::ConflictingExpiration)
        );
    }

    #[test]
    fn test_builder_expiration_text() {
        let token: Token = Token::builder("abc")
            .expiration_date("1999-12-31T23:59:59Z")
            .refresh_token("r1")
            .build()
            .unwrap();

        assert!(token.expired());
        assert!(token.refreshable());
    }
}
