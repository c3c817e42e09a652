//! Token Serialization
//!
//! Persistable hash round trip, the untyped JSON boundary, and the one-way
//! OAuth2 response shape.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ArgumentError, TokenError, TokenResult};
use crate::token::credential::{reject, Token, TokenParams};
use crate::types::{
    format_expiration, ExpirationDate, OAuthRefreshFields, OAuthTokenResponse, RefreshToken,
    TokenHash, BEARER_TOKEN_TYPE,
};

impl<S: Clone> Token<S> {
    /// Persistable form, nesting the refresh token's own hash.
    pub fn to_hash(&self) -> TokenHash<S> {
        TokenHash {
            token: self.value().to_string(),
            expiration_date: self.expiration_date().as_ref().map(format_expiration),
            scope: self.scope().cloned(),
            refresh_token: self
                .refresh_token()
                .map(|refresh| Box::new(refresh.to_hash())),
        }
    }

    /// Bearer token issuance response.
    pub fn to_oauth_hash(&self) -> OAuthTokenResponse<S> {
        OAuthTokenResponse {
            access_token: self.value().to_string(),
            token_type: BEARER_TOKEN_TYPE.to_string(),
            expires_in: self.seconds_until_expiration(),
            scope: self.scope().cloned(),
            refresh: self.refresh_token().map(|refresh| OAuthRefreshFields {
                refresh_token: refresh.value().to_string(),
                refresh_token_expires_in: refresh.seconds_until_expiration(),
            }),
        }
    }
}

impl<S> Token<S> {
    /// Rebuild a token from its persistable form.
    ///
    /// The refresh token is rebuilt first so it keeps its own expiration and
    /// nested refresh token.
    pub fn from_hash(hash: TokenHash<S>) -> TokenResult<Self> {
        let TokenHash {
            token,
            expiration_date,
            scope,
            refresh_token,
        } = hash;

        let refresh_token = refresh_token
            .map(|nested| Token::from_hash(*nested))
            .transpose()?
            .map(RefreshToken::Token);

        Token::new(
            token,
            TokenParams {
                expiration_date: expiration_date.map(ExpirationDate::Text),
                expires_in_seconds: None,
                scope,
                refresh_token,
            },
        )
    }
}

impl<S: DeserializeOwned> Token<S> {
    /// Rebuild a token from an untyped JSON mapping.
    ///
    /// A bare string under `refresh_token` is promoted to a non-expiring token.
    pub fn from_json_value(value: &Value) -> TokenResult<Self> {
        let hash = hash_from_value(value).map_err(reject)?;
        Self::from_hash(hash)
    }

    /// Rebuild a token from JSON text.
    pub fn from_json(text: &str) -> TokenResult<Self> {
        let value: Value = serde_json::from_str(text).map_err(|e| {
            reject(ArgumentError::InvalidHash {
                message: e.to_string(),
            })
        })?;
        Self::from_json_value(&value)
    }
}

impl<S: Serialize + Clone> Token<S> {
    /// Persistable form as a JSON value.
    pub fn to_json_value(&self) -> TokenResult<Value> {
        serde_json::to_value(self.to_hash()).map_err(serialization_error)
    }

    /// Persistable form as JSON text.
    pub fn to_json(&self) -> TokenResult<String> {
        serde_json::to_string(&self.to_hash()).map_err(serialization_error)
    }

    /// OAuth2 response as a JSON value.
    pub fn to_oauth_json_value(&self) -> TokenResult<Value> {
        serde_json::to_value(self.to_oauth_hash()).map_err(serialization_error)
    }
}

fn serialization_error(error: serde_json::Error) -> TokenError {
    tracing::debug!(reason = %error, "token serialization failed");
    TokenError::Serialization {
        message: error.to_string(),
    }
}

fn hash_from_value<S: DeserializeOwned>(value: &Value) -> Result<TokenHash<S>, ArgumentError> {
    let map = value.as_object().ok_or_else(|| ArgumentError::InvalidHash {
        message: format!("expected a mapping, got {}", value_kind(value)),
    })?;

    let token = match map.get("token") {
        Some(Value::String(token)) => token.clone(),
        other => {
            return Err(ArgumentError::NonStringValue {
                found: value_kind(other.unwrap_or(&Value::Null)).to_string(),
            })
        }
    };

    let expiration_date = match present(map, "expiration_date") {
        None => None,
        Some(Value::String(text)) => Some(text.clone()),
        Some(other) => {
            return Err(ArgumentError::UnsupportedExpirationType {
                found: value_kind(other).to_string(),
            })
        }
    };

    let scope = present(map, "scope")
        .map(|raw| serde_json::from_value(raw.clone()))
        .transpose()
        .map_err(|e| ArgumentError::InvalidScope {
            message: e.to_string(),
        })?;

    let refresh_token = match present(map, "refresh_token") {
        None => None,
        Some(Value::String(raw)) => Some(Box::new(TokenHash::from_value(raw.clone()))),
        Some(nested @ Value::Object(_)) => Some(Box::new(hash_from_value(nested)?)),
        Some(other) => {
            return Err(ArgumentError::InvalidRefreshToken {
                found: value_kind(other).to_string(),
            })
        }
    };

    Ok(TokenHash {
        token,
        expiration_date,
        scope,
        refresh_token,
    })
}

/// Field value, treating `null` as absent.
fn present<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|value| !value.is_null())
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
