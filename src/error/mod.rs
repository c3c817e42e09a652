//! Token Error Types
//!
//! Error hierarchy for token construction, deserialization and validation gates.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Root error type for token operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TokenError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ArgumentError),

    #[error("Token is invalid{}", expired_suffix(.expired_at))]
    InvalidToken { expired_at: Option<DateTime<Utc>> },

    #[error("Token is not refreshable")]
    NotRefreshable,

    #[error("Serialization failed: {message}")]
    Serialization { message: String },
}

fn expired_suffix(expired_at: &Option<DateTime<Utc>>) -> String {
    match expired_at {
        Some(at) => format!(" (expired at {})", at.to_rfc3339()),
        None => String::new(),
    }
}

impl TokenError {
    /// Get error code for telemetry.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "TOKEN_INVALID_ARGUMENT",
            Self::InvalidToken { .. } => "TOKEN_INVALID",
            Self::NotRefreshable => "TOKEN_NOT_REFRESHABLE",
            Self::Serialization { .. } => "TOKEN_SERIALIZATION",
        }
    }

    /// Check if error came from rejected construction inputs.
    pub fn is_argument_error(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Check if error requires re-authentication.
    pub fn needs_reauth(&self) -> bool {
        matches!(self, Self::InvalidToken { .. } | Self::NotRefreshable)
    }
}

/// Rejected construction input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArgumentError {
    #[error("token value must be a string, got {found}")]
    NonStringValue { found: String },

    #[error("provide expiration_date or expires_in_seconds, not both")]
    ConflictingExpiration,

    #[error("cannot parse expiration date: {input:?}")]
    UnparseableExpiration { input: String },

    #[error("expiration date is outside the representable range")]
    ExpirationOutOfRange,

    #[error("expiration date must be a timestamp string, got {found}")]
    UnsupportedExpirationType { found: String },

    #[error("expires_in_seconds out of range: {seconds}")]
    InvalidExpiresIn { seconds: f64 },

    #[error("refresh token must be a token or a string, got {found}")]
    InvalidRefreshToken { found: String },

    #[error("scope does not match the expected type: {message}")]
    InvalidScope { message: String },

    #[error("malformed token hash: {message}")]
    InvalidHash { message: String },
}

/// Result type for token operations.
pub type TokenResult<T> = Result<T, TokenError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            TokenError::from(ArgumentError::ConflictingExpiration).error_code(),
            "TOKEN_INVALID_ARGUMENT"
        );
        assert_eq!(
            TokenError::InvalidToken { expired_at: None }.error_code(),
            "TOKEN_INVALID"
        );
        assert_eq!(TokenError::NotRefreshable.error_code(), "TOKEN_NOT_REFRESHABLE");
        assert_eq!(
            TokenError::Serialization {
                message: "boom".to_string()
            }
            .error_code(),
            "TOKEN_SERIALIZATION"
        );
    }

    #[test]
    fn test_needs_reauth() {
        assert!(TokenError::NotRefreshable.needs_reauth());
        assert!(TokenError::InvalidToken { expired_at: None }.needs_reauth());
        assert!(!TokenError::from(ArgumentError::ConflictingExpiration).needs_reauth());
        assert!(TokenError::from(ArgumentError::ConflictingExpiration).is_argument_error());
    }

    #[test]
    fn test_display_messages() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let error = TokenError::InvalidToken {
            expired_at: Some(at),
        };
        assert_eq!(
            error.to_string(),
            "Token is invalid (expired at 2024-01-02T03:04:05+00:00)"
        );

        let error = TokenError::from(ArgumentError::ConflictingExpiration);
        assert_eq!(
            error.to_string(),
            "Invalid argument: provide expiration_date or expires_in_seconds, not both"
        );
    }
}
