//! Refresh Token Input
//!
//! Accepted shapes for the nested refresh credential.

use serde_json::Value;

use crate::token::Token;

/// Refresh credential supplied at construction.
#[derive(Clone, Debug)]
pub enum RefreshToken<S = Value> {
    /// Already-constructed token, kept as is.
    Token(Token<S>),
    /// Raw value, promoted to a non-expiring token.
    Value(String),
}

impl<S> RefreshToken<S> {
    /// Convert into the token that will be owned by the parent.
    pub fn into_token(self) -> Token<S> {
        match self {
            Self::Token(token) => token,
            Self::Value(value) => {
                tracing::trace!("promoting raw refresh value to a non-expiring token");
                Token::non_expiring(value)
            }
        }
    }
}

impl<S> From<Token<S>> for RefreshToken<S> {
    fn from(token: Token<S>) -> Self {
        Self::Token(token)
    }
}

impl<S> From<String> for RefreshToken<S> {
    fn from(value: String) -> Self {
        Self::Value(value)
    }
}

impl<S> From<&str> for RefreshToken<S> {
    fn from(value: &str) -> Self {
        Self::Value(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_value_is_promoted() {
        let token: Token = RefreshToken::from("r1").into_token();
        assert_eq!(token.value(), "r1");
        assert!(!token.expires());
        assert!(token.scope().is_none());
        assert!(token.refresh_token().is_none());
    }

    #[test]
    fn test_existing_token_is_kept() {
        let original: Token = Token::expiring_in("r1", 60.0).unwrap();
        let kept = RefreshToken::from(original.clone()).into_token();
        assert_eq!(kept, original);
    }
}
