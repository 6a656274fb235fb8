//! OpenAPI documentation.
//!
//! [`ApiDoc`] registers every handler under `inbound::http` together with
//! the request/response schemas and a bearer security scheme. Swagger UI
//! serves it at `/docs` in debug builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, Task, TaskPriority, TaskStatus, UserProfile};
use crate::inbound::http::health::ProbeStatus;
use crate::inbound::http::todos::{
    ListTodosBody, MessageResponse, TaskFieldsRequest, TaskListResponse,
};
use crate::inbound::http::users::{LoginRequest, LoginResponse, SignupRequest};

/// Name of the bearer security scheme referenced by protected paths.
pub const BEARER_SCHEME: &str = "bearer";

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token issued by POST /api/v1/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Taskboard API",
        description = "Accounts and per-user task lists behind bearer-token authentication."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::signup,
        crate::inbound::http::users::login,
        crate::inbound::http::users::get_profile,
        crate::inbound::http::todos::create_todo,
        crate::inbound::http::todos::list_todos,
        crate::inbound::http::todos::update_todo,
        crate::inbound::http::todos::delete_todo,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Task,
        TaskPriority,
        TaskStatus,
        UserProfile,
        SignupRequest,
        LoginRequest,
        LoginResponse,
        TaskFieldsRequest,
        ListTodosBody,
        TaskListResponse,
        MessageResponse,
        ProbeStatus,
    )),
    tags(
        (name = "users", description = "Signup, login and profile"),
        (name = "todos", description = "The caller's tasks"),
        (name = "health", description = "Probes")
    )
)]
pub struct ApiDoc;
