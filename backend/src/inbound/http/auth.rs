//! Bearer-token authentication for HTTP handlers.
//!
//! Handlers take an [`AuthenticatedUser`] argument; the extractor validates
//! the `Authorization: Bearer <token>` header once, before the handler runs.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use super::state::HttpState;
use crate::domain::{AuthenticatedUser, Error};

const BEARER_PREFIX: &str = "Bearer ";

fn bearer_token(req: &HttpRequest) -> Result<&str, Error> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing authorization header"))?;
    let value = header
        .to_str()
        .map_err(|_| Error::unauthorized("invalid authorization header"))?;
    value
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::unauthorized("authorization header must use the Bearer scheme"))
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("http state is not configured"))?;
    let token = bearer_token(req)?;
    let claims = state.tokens.validate(token).map_err(|error| {
        debug!(%error, "bearer token rejected");
        Error::unauthorized("invalid or expired token")
    })?;
    Ok(claims.into())
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
