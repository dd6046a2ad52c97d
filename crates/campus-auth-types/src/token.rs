//! Session JWT validation.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
#[cfg(any(feature = "ISSUER_ONLY", test))]
use serde::Serialize;
use uuid::Uuid;

/// Session-token lifetime in seconds (4 hours).
pub const SESSION_TTL: u64 = 14400;

/// Caller identity extracted from a validated session token.
#[derive(Debug, Clone)]
pub struct SessionIdentity {
    pub account_id: Uuid,
    pub email: String,
    pub role: u8,
}

/// Errors returned by [`validate_session`].
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// JWT claims payload shared by token minting (market service) and
/// validation (everything else).
///
/// | Field | JWT claim | Rust type | Meaning |
/// |-------|-----------|-----------|---------|
/// | `sub` | `sub` | UUID string | account ID |
/// | `email` | custom | normalized identity | mailbox the session belongs to |
/// | `role` | custom | `u8` wire value | see [`campus_domain::role::AccountRole`] |
/// | `exp` | `exp` | seconds since epoch | token expiration |
///
/// [`Deserialize`] is always available. [`Serialize`] requires the
/// **`ISSUER_ONLY`** cargo feature; only the market service enables it
/// because it is the sole token issuer.
#[derive(Debug, Deserialize)]
#[cfg_attr(any(feature = "ISSUER_ONLY", test), derive(Serialize))]
pub struct SessionClaims {
    /// Account ID (UUID string).
    pub sub: String,
    /// Normalized email identity.
    pub email: String,
    /// Account role as `u8` wire value.
    pub role: u8,
    /// Expiration timestamp (seconds since UNIX epoch).
    pub exp: u64,
}

/// Decode and validate a session JWT, returning raw claims.
///
/// Validation: HS256, exp checked, required claims: `exp` + `sub`.
/// Default leeway = 60s tolerates clock skew between services.
fn decode_jwt(token: &str, secret: &str) -> Result<SessionClaims, TokenError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature
        | jsonwebtoken::errors::ErrorKind::InvalidEcdsaKey
        | jsonwebtoken::errors::ErrorKind::InvalidRsaKey(_) => TokenError::InvalidSignature,
        _ => TokenError::Malformed,
    })?;

    Ok(data.claims)
}

/// Validate a bearer token value, returning the parsed caller identity.
///
/// Every authenticated route goes through this on every request.
pub fn validate_session(token: &str, secret: &str) -> Result<SessionIdentity, TokenError> {
    let claims = decode_jwt(token, secret)?;
    let account_id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| TokenError::Malformed)?;
    Ok(SessionIdentity {
        account_id,
        email: claims.email,
        role: claims.role,
    })
}
