//! Trace id of the request being served.
//!
//! `RequestTrace` scopes it task-locally. Error bodies and database/security
//! logs read it back, so the id a client sees matches the server logs.

use std::fmt;
use std::future::Future;

use tokio::task_local;
use uuid::Uuid;

/// Reported when no request is in scope (startup, background work).
pub const NO_TRACE_ID: &str = "unknown";

/// Per-request id. Also stored in the request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceId(String);

impl TraceId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

task_local! {
    static CURRENT: TraceId;
}

/// Trace id of the current task, or [`NO_TRACE_ID`].
pub fn trace_id() -> String {
    CURRENT
        .try_with(|id| id.0.clone())
        .unwrap_or_else(|_| NO_TRACE_ID.to_string())
}

pub async fn with_trace_id<F: Future>(id: TraceId, future: F) -> F::Output {
    CURRENT.scope(id, future).await
}
