//! HTTP inbound adapter exposing the REST endpoints.

pub mod auth;
pub mod error;
pub mod health;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod todos;
pub mod users;
pub mod validation;

use actix_web::web;
use tracing::debug;

use crate::domain::Error;

/// JSON extractor settings: undecodable bodies become `invalid_request`
/// errors with the usual JSON error body.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejected request body");
        Error::invalid_request(format!("invalid request body: {err}")).into()
    })
}

/// Register every `/api/v1` route on `cfg`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use taskboard::inbound::http::configure_api;
///
/// let app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(users::signup)
        .service(users::login)
        .service(users::get_profile)
        .service(todos::create_todo)
        .service(todos::list_todos)
        .service(todos::update_todo)
        .service(todos::delete_todo);
}
