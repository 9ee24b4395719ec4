use tracing::warn;

use crate::trace_ctx;

/// Log a rejected or unverifiable bearer token.
pub fn auth_failed(reason: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_AUTH_FAILED",
        %trace_id,
        reason,
        "Authentication failure"
    );
}

/// Log a change refused for lack of privilege.
pub fn permission_denied(sub: &str, game_id: i64, detail: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_PERMISSION_DENIED",
        %trace_id,
        sub,
        game_id,
        detail,
        "Privileged change refused"
    );
}
