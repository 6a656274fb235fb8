//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, cache, credential codec) describe what the
//! services need from infrastructure; driving ports describe the use-cases
//! inbound adapters may call. Each driven port exposes a typed error enum so
//! adapters map failures into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod account;
mod credentials;
mod task_repository;
mod todo_commands;
mod user_cache;
mod user_repository;

#[cfg(test)]
pub use account::{MockAccountCommand, MockProfileQuery};
pub use account::{AccountCommand, ProfileQuery};
#[cfg(test)]
pub use credentials::{MockPasswordHasher, MockTokenCodec};
pub use credentials::{CredentialError, PasswordHasher, TokenCodec};
#[cfg(test)]
pub use task_repository::MockTaskRepository;
pub use task_repository::{TaskRepository, TaskRepositoryError};
#[cfg(test)]
pub use todo_commands::{MockTodoCommand, MockTodoQuery};
pub use todo_commands::{TodoCommand, TodoQuery};
#[cfg(test)]
pub use user_cache::MockUserCache;
pub use user_cache::{UserCache, UserCacheError, UserCacheKey};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
