//! Driving ports for account use-cases: signup, login and profile reads.

use async_trait::async_trait;

use crate::domain::{
    AccessToken, Error, LoginCredentials, ProfileSource, SignUpDetails, UserId, UserProfile,
};

/// Account creation and authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Register a new account.
    async fn sign_up(&self, details: SignUpDetails) -> Result<UserProfile, Error>;

    /// Exchange credentials for an access token.
    async fn login(&self, credentials: LoginCredentials) -> Result<AccessToken, Error>;
}

/// Profile reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileQuery: Send + Sync {
    /// Load a profile and report whether it came from the cache or the store.
    async fn get_profile(&self, user_id: &UserId) -> Result<(UserProfile, ProfileSource), Error>;
}
