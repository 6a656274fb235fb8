//! Taskboard backend library: a multi-user task tracker served over HTTP.
//!
//! - [`domain`]: entities, services and ports
//! - [`inbound`]: HTTP handlers
//! - [`outbound`]: PostgreSQL, Redis, in-memory and credential adapters
//! - [`middleware`]: request tracing

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
