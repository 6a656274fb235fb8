//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel ORM
//! - **memory**: process-local repositories for tests and local runs
//! - **cache**: Redis and in-memory profile caches
//! - **credentials**: bcrypt digests and HS256 access tokens
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business rules.

pub mod cache;
pub mod credentials;
pub mod memory;
pub mod persistence;
