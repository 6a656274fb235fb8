//! bcrypt-backed `PasswordHasher`.
//!
//! Hashing is CPU bound, so both operations run on the blocking pool.

use async_trait::async_trait;
use tracing::debug;
use zeroize::Zeroizing;

use crate::domain::PasswordDigest;
use crate::domain::ports::{CredentialError, PasswordHasher};

/// Production work factor.
pub const DEFAULT_BCRYPT_COST: u32 = 12;
/// Lowest cost accepted; anything cheaper is clamped up.
pub const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

/// Salted bcrypt digests.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(MIN_BCRYPT_COST, MAX_BCRYPT_COST),
        }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, plaintext: &str) -> Result<PasswordDigest, CredentialError> {
        let cost = self.cost;
        let plaintext = Zeroizing::new(plaintext.to_owned());
        let digest = tokio::task::spawn_blocking(move || bcrypt::hash(plaintext.as_str(), cost))
            .await
            .map_err(|err| CredentialError::crypto(err.to_string()))?
            .map_err(|err| CredentialError::crypto(err.to_string()))?;
        PasswordDigest::new(digest).map_err(|err| CredentialError::crypto(err.to_string()))
    }

    async fn verify(&self, plaintext: &str, digest: &PasswordDigest) -> bool {
        let plaintext = Zeroizing::new(plaintext.to_owned());
        let digest = digest.as_str().to_owned();
        let outcome =
            tokio::task::spawn_blocking(move || bcrypt::verify(plaintext.as_str(), &digest)).await;
        match outcome {
            Ok(Ok(matches)) => matches,
            Ok(Err(error)) => {
                debug!(%error, "stored digest could not be verified");
                false
            }
            Err(error) => {
                debug!(%error, "verification task failed");
                false
            }
        }
    }
}
