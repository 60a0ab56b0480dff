//! Bearer-token claim decoding
//!
//! The platform issues HS256 JWTs. The client only reads the claims to check
//! expiry before a request goes out; signature verification stays with the
//! server, which is the sole authority on token validity.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims carried by a platform token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Expiry as a Unix timestamp; absent means non-expiring
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Subject (user id)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Platform role
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Claims {
    /// Whether the token has expired as of `now`
    ///
    /// A token whose expiry equals the current instant counts as expired.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.exp.is_some_and(|exp| exp <= now.timestamp())
    }
}

/// Token claim decode failure (malformed token)
#[derive(Error, Debug)]
#[error("token decode failed: {0}")]
pub struct DecodeError(#[source] jsonwebtoken::errors::Error);

/// Decode the claims of a token without verifying its signature
///
/// # Errors
///
/// Returns [`DecodeError`] when the token is not a structurally valid JWT.
pub fn decode_claims(token: &str) -> Result<Claims, DecodeError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims = HashSet::new();

    let data = jsonwebtoken::decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map_err(DecodeError)?;
    Ok(data.claims)
}
