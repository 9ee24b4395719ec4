//! Claims carried by caller tokens and inserted into request extensions.

use serde::{Deserialize, Serialize};

/// Claims of a verified access token.
///
/// `role` is optional; only the literal `"admin"` grants elevated rights.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BackendClaims {
    /// Caller identifier
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}
