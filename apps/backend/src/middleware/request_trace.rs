//! Per-request tracing.
//!
//! Every request gets a fresh [`TraceId`]. It is put in the request
//! extensions, scoped task-locally for error bodies, and echoed in the
//! `x-trace-id` header. The handler runs inside a `request` span with the id,
//! method, path and, on game routes, the game id. One `request_completed`
//! event per request is levelled by status class.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::http::{Method, StatusCode};
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, field, info, info_span, warn, Instrument};

use crate::trace_ctx::{self, TraceId};

const TRACE_ID_HEADER: &str = "x-trace-id";
const GAMES_PREFIX: &str = "/api/games/";

pub struct RequestTrace;

impl<S, B> Transform<S, ServiceRequest> for RequestTrace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestTraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTraceMiddleware { service }))
    }
}

pub struct RequestTraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestTraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let trace_id = TraceId::generate();
        let method = req.method().clone();
        let path = req.path().to_string();

        let span = info_span!(
            "request",
            trace_id = %trace_id,
            method = %method,
            path = %path,
            game_id = field::Empty,
        );
        if let Some(game_id) = game_id_from_path(&path) {
            span.record("game_id", game_id);
        }

        req.extensions_mut().insert(trace_id.clone());
        let header = HeaderValue::from_str(trace_id.as_str()).ok();
        let fut = self.service.call(req).instrument(span.clone());

        Box::pin(trace_ctx::with_trace_id(trace_id, async move {
            let result = fut.await;

            let status = match &result {
                Ok(res) => res.status(),
                Err(err) => err.as_response_error().status_code(),
            };
            let duration_us = start.elapsed().as_micros() as u64;
            span.in_scope(|| log_completion(&method, &path, status, duration_us));

            let mut res = result?;
            if let Some(value) = header {
                res.headers_mut()
                    .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
            }
            Ok(res)
        }))
    }
}

fn log_completion(method: &Method, path: &str, status: StatusCode, duration_us: u64) {
    let trace_id = trace_ctx::trace_id();
    let code = status.as_u16();
    if status.is_server_error() {
        error!(http.method = %method, url.path = %path, http.status_code = code, duration_us, %trace_id, "request_completed");
    } else if status.is_client_error() {
        warn!(http.method = %method, url.path = %path, http.status_code = code, duration_us, %trace_id, "request_completed");
    } else {
        info!(http.method = %method, url.path = %path, http.status_code = code, duration_us, %trace_id, "request_completed");
    }
}

/// Numeric id in `/api/games/{id}/...`, if any.
fn game_id_from_path(path: &str) -> Option<i64> {
    path.strip_prefix(GAMES_PREFIX)?
        .split('/')
        .next()?
        .parse()
        .ok()
}
