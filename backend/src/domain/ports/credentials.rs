//! Credential codec ports: password digests and signed access tokens.

use async_trait::async_trait;

use crate::domain::{AccessToken, Claims, EmailAddress, PasswordDigest, UserId};

use super::define_port_error;

define_port_error! {
    /// Failures raised by credential adapters.
    pub enum CredentialError {
        /// Digest computation failed (entropy or system failure).
        Crypto { message: String } => "password hashing failed: {message}",
        /// Token could not be signed, or the signing key is empty.
        Signing { message: String } => "token signing failed: {message}",
        /// Token is malformed, expired or carries a bad signature.
        InvalidToken => "invalid token",
    }
}

/// One-way password digests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Produce a salted digest of `plaintext`.
    async fn hash(&self, plaintext: &str) -> Result<PasswordDigest, CredentialError>;

    /// Whether `plaintext` matches `digest`. Malformed digests never match.
    async fn verify(&self, plaintext: &str, digest: &PasswordDigest) -> bool;
}

/// Issues and validates signed access tokens.
#[cfg_attr(test, mockall::automock)]
pub trait TokenCodec: Send + Sync {
    /// Sign a token for the given identity.
    fn issue(&self, user_id: &UserId, email: &EmailAddress) -> Result<AccessToken, CredentialError>;

    /// Verify signature and expiry, returning the typed claims.
    fn validate(&self, token: &str) -> Result<Claims, CredentialError>;
}
