//! RS256 JWT validation against a per-user stored public key.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access-token lifetime in seconds (2 days).
pub const ACCESS_TOKEN_EXP: u64 = 172_800;

/// Refresh-token lifetime in seconds (7 days).
pub const REFRESH_TOKEN_EXP: u64 = 604_800;

/// User identity extracted from a validated token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub user_id: Uuid,
    pub email: String,
    pub exp: u64,
}

/// Errors returned by [`validate_token`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// JWT claims payload shared by token creation (access service) and
/// validation (protected-route middleware and the refresh flow).
///
/// | Field   | JWT claim | Rust type   | Meaning                          |
/// |---------|-----------|-------------|----------------------------------|
/// | `sub`   | `sub`     | UUID string | user ID                          |
/// | `email` | custom    | `String`    | user email at issuance time      |
/// | `exp`   | `exp`     | seconds     | token expiration (since epoch)   |
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    /// User ID (UUID string).
    pub sub: String,
    /// User email.
    pub email: String,
    /// Expiration timestamp (seconds since UNIX epoch).
    pub exp: u64,
}

/// Decode and validate a token against the user's stored RSA public key
/// (SPKI PEM), returning parsed identity.
///
/// Validation: RS256 only, exp checked, required claims `exp` + `sub`.
/// The default 60s leeway tolerates clock skew between host and clients.
pub fn validate_token(token: &str, public_key_pem: &str) -> Result<TokenInfo, AuthError> {
    let key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
        .map_err(|_| AuthError::InvalidSignature)?;

    let mut validation = Validation::new(jsonwebtoken::Algorithm::RS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<JwtClaims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature
        | jsonwebtoken::errors::ErrorKind::InvalidAlgorithm
        | jsonwebtoken::errors::ErrorKind::InvalidRsaKey(_) => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    let user_id = data
        .claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| AuthError::Malformed)?;

    Ok(TokenInfo {
        user_id,
        email: data.claims.email,
        exp: data.claims.exp,
    })
}
