//! Unverified inspection of the JWT payload.
//!
//! The client never validates signatures; the claims are read only to learn
//! who the caller is (for `profile show` without an id) and whether the
//! token has obviously expired.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use carebridge_core::{AppError, ErrorKind};
use carebridge_core::result::AppResult;
use carebridge_core::types::UserId;

/// Claims the backend puts in its tokens.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    /// Subject user id (`id`, `userId` or `_id`, depending on the issuer).
    #[serde(default, alias = "userId", alias = "_id")]
    pub id: Option<String>,
    /// Role at issuance.
    #[serde(default)]
    pub role: Option<String>,
    /// Expiry as seconds since the epoch.
    #[serde(default)]
    pub exp: Option<i64>,
}

impl TokenClaims {
    /// Decode the payload segment of a JWT without checking its signature.
    pub fn decode_unverified(token: &str) -> AppResult<Self> {
        let payload = token
            .split('.')
            .nth(1)
            .ok_or_else(|| AppError::validation("Token is not a JWT"))?;
        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| {
                AppError::with_source(ErrorKind::Validation, "Token payload is not base64", e)
            })?;
        serde_json::from_slice(&bytes).map_err(AppError::from)
    }

    /// The subject as a typed user id.
    pub fn user_id(&self) -> Option<UserId> {
        self.id.as_deref().map(UserId::from)
    }

    /// When the token expires, if it says.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }

    /// Check whether the expiry claim is in the past.
    pub fn is_expired(&self) -> bool {
        self.expires_at().is_some_and(|exp| exp <= Utc::now())
    }
}
