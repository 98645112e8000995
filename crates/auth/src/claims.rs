use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JWT claims model (transport-agnostic).
///
/// Tokens carry the username and an admin flag. `iat`/`exp` are optional
/// Unix timestamps; a token without `exp` never expires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub username: String,

    /// Missing flag means a regular (non-admin) user.
    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token signature or encoding is invalid: {0}")]
    Malformed(String),

    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (exp <= iat)")]
    InvalidTimeWindow,
}

/// Deterministically validate the time-related claims against `now`.
///
/// Signature verification happens in [`crate::jwt`]; this only looks at the
/// decoded payload.
pub fn validate_claims(claims: &JwtClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    let now = now.timestamp();
    if let (Some(iat), Some(exp)) = (claims.iat, claims.exp) {
        if exp <= iat {
            return Err(TokenValidationError::InvalidTimeWindow);
        }
    }
    if claims.iat.is_some_and(|iat| now < iat) {
        return Err(TokenValidationError::NotYetValid);
    }
    if claims.exp.is_some_and(|exp| now >= exp) {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}
