//! In-memory task and user stores.
//!
//! These back the service when no database URL is configured and drive the
//! integration tests. They follow the same contracts as the Diesel adapters:
//! sequential task ids, newest-first listing, case-insensitive email
//! uniqueness.

mod task_store;
mod user_store;

pub use task_store::InMemoryTaskRepository;
pub use user_store::InMemoryUserRepository;
