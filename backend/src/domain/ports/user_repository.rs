//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{DeadlineExceeded, EmailAddress, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another account already uses this email.
        DuplicateEmail { email: String } => "email {email} is already registered",
        /// No matching user.
        NotFound => "user not found",
        /// The call outlived the request deadline.
        Timeout { message: String } => "user repository timed out: {message}",
    }
}

impl From<DeadlineExceeded> for UserRepositoryError {
    fn from(value: DeadlineExceeded) -> Self {
        Self::timeout(value.to_string())
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user; email uniqueness is case-insensitive.
    async fn create(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Fetch a user by identifier.
    async fn get_by_id(&self, id: &UserId) -> Result<User, UserRepositoryError>;

    /// Fetch a user, including the password digest, by email.
    async fn get_by_email(&self, email: &EmailAddress) -> Result<User, UserRepositoryError>;
}
