use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, Header, Validation};

use super::claims::BackendClaims;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::state::security_config::SecurityConfig;

/// Access token lifetime in seconds
pub const ACCESS_TOKEN_TTL_SECS: i64 = 15 * 60;

/// Only algorithm accepted when verifying caller tokens
pub const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

/// Mint an access token for `sub` with an optional role claim.
pub fn mint_access_token(
    sub: &str,
    role: Option<&str>,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal(ErrorCode::Internal, "Failed to get current time"))?
        .as_secs() as i64;

    let claims = BackendClaims {
        sub: sub.to_string(),
        role: role.map(str::to_string),
        iat,
        exp: iat + ACCESS_TOKEN_TTL_SECS,
    };

    encode(
        &Header::new(JWT_ALGORITHM),
        &claims,
        &security.encoding_key(),
    )
    .map_err(|e| AppError::internal(ErrorCode::Internal, format!("Failed to encode JWT: {e}")))
}

/// Verify a token and return its claims.
///
/// Expired tokens map to `UNAUTHORIZED_EXPIRED_JWT`; any other decode
/// failure (bad signature, malformed, wrong algorithm) to `UNAUTHORIZED_INVALID_JWT`.
pub fn verify_access_token(
    token: &str,
    security: &SecurityConfig,
) -> Result<BackendClaims, AppError> {
    let validation = Validation::new(JWT_ALGORITHM);

    decode::<BackendClaims>(token, &security.decoding_key(), &validation)
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::unauthorized_expired_jwt(),
        _ => AppError::unauthorized_invalid_jwt(),
    })
}
