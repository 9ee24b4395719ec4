//! JWT helpers for tests

use std::time::{Duration, SystemTime};

use tycoon_backend::auth::jwt::mint_access_token;
use tycoon_backend::state::security_config::SecurityConfig;

pub const TEST_JWT_SECRET: &[u8] = b"test_secret_key_for_testing_purposes_only";

pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(TEST_JWT_SECRET)
}

/// Mint a token for `sub`; `role` goes into the `role` claim when set.
pub fn mint_test_token(sub: &str, role: Option<&str>, sec: &SecurityConfig) -> String {
    mint_access_token(sub, role, SystemTime::now(), sec).expect("should mint token successfully")
}

/// Full Authorization header value including "Bearer "
pub fn bearer_header(sub: &str, role: Option<&str>, sec: &SecurityConfig) -> String {
    format!("Bearer {}", mint_test_token(sub, role, sec))
}

pub fn player_bearer(sec: &SecurityConfig) -> String {
    bearer_header("player-sub", None, sec)
}

pub fn admin_bearer(sec: &SecurityConfig) -> String {
    bearer_header("admin-sub", Some("admin"), sec)
}

/// A token issued two hours ago, well past its TTL
pub fn mint_expired_token(sub: &str, sec: &SecurityConfig) -> String {
    let past = SystemTime::now()
        .checked_sub(Duration::from_secs(7200))
        .unwrap();
    mint_access_token(sub, None, past, sec).expect("should mint expired token successfully")
}
