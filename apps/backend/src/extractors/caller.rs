use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::auth::claims::BackendClaims;
use crate::domain::CallerRole;
use crate::error::AppError;

/// Authenticated caller, built from the claims `JwtExtract` stored in the
/// request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub sub: String,
    pub role: CallerRole,
}

impl FromRequest for Caller {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let caller = req
            .extensions()
            .get::<BackendClaims>()
            .map(|claims| Caller {
                sub: claims.sub.clone(),
                role: CallerRole::from_claim(claims.role.as_deref()),
            })
            .ok_or_else(AppError::unauthorized);
        ready(caller)
    }
}
