//! Credential Token
//!
//! Protocol-independent access token with expiration, opaque scope and a
//! nested refresh token.
//!
//! # Features
//!
//! - Absolute (`expiration_date`) or relative (`expires_in_seconds`) expiration
//! - Validity, expiry and refreshability predicates against the wall clock
//! - Validation gates returning distinct invalid / not-refreshable errors
//! - Persistable hash round trip (`to_hash` / `from_hash`)
//! - Bearer token response shape (RFC 6749 Section 5.1) via `to_oauth_hash`
//!
//! # Example
//!
//! ```rust
//! use credential_token::{Token, TokenParams};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), credential_token::TokenError> {
//! let token: Token = Token::new(
//!     "access-value",
//!     TokenParams {
//!         expires_in_seconds: Some(3600.0),
//!         scope: Some(json!("openid profile")),
//!         refresh_token: Some("refresh-value".into()),
//!         ..Default::default()
//!     },
//! )?;
//!
//! token.validate()?;
//! assert!(token.refreshable());
//!
//! let restored: Token = Token::from_hash(token.to_hash())?;
//! assert_eq!(restored, token);
//!
//! let body = token.to_oauth_json_value()?;
//! assert_eq!(body["token_type"], "bearer");
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - `types`: expiration and refresh-token inputs, hash shapes
//! - `error`: error hierarchy
//! - `token`: the token value type and its serialization
//! - `builders`: fluent token builder

pub mod builders;
pub mod error;
pub mod token;
pub mod types;

// Re-export the token
pub use token::{Token, TokenParams};

// Re-export builders
pub use builders::{token_builder, TokenBuilder};

// Re-export errors
pub use error::{ArgumentError, TokenError, TokenResult};

// Re-export types
pub use types::{
    // Expiration
    format_expiration, parse_expiration, ExpirationDate,
    // Refresh
    RefreshToken,
    // Hash shapes
    OAuthRefreshFields, OAuthTokenResponse, TokenHash, BEARER_TOKEN_TYPE,
};
