//! Redis-backed `UserCache` implementation.
//!
//! Every Redis or pool failure is reported as
//! [`UserCacheError::Unavailable`]; callers treat that as a miss.

use std::time::Duration;

use async_trait::async_trait;
use bb8_redis::RedisConnectionManager;
use bb8_redis::bb8::Pool;
use bb8_redis::redis::AsyncCommands;
use tracing::debug;

use crate::domain::ports::{UserCache, UserCacheError, UserCacheKey};

/// Failure while building the Redis pool.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to build redis pool: {message}")]
pub struct RedisCacheError {
    message: String,
}

/// Profile cache stored in Redis.
#[derive(Clone)]
pub struct RedisUserCache {
    pool: Pool<RedisConnectionManager>,
}

impl RedisUserCache {
    /// Connect a pool to `redis_url`.
    pub async fn connect(redis_url: &str, max_size: u32) -> Result<Self, RedisCacheError> {
        let manager = RedisConnectionManager::new(redis_url).map_err(|err| RedisCacheError {
            message: err.to_string(),
        })?;
        let pool = Pool::builder()
            .max_size(max_size.max(1))
            .build(manager)
            .await
            .map_err(|err| RedisCacheError {
                message: err.to_string(),
            })?;
        Ok(Self { pool })
    }
}

fn unavailable(key: &UserCacheKey, operation: &'static str, error: impl ToString) -> UserCacheError {
    let message = error.to_string();
    debug!(%key, operation, %message, "redis operation failed");
    UserCacheError::unavailable(message)
}

/// Redis rejects a zero expiry; round sub-second TTLs up.
fn ttl_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

#[async_trait]
impl UserCache for RedisUserCache {
    async fn get(&self, key: &UserCacheKey) -> Result<Vec<u8>, UserCacheError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| unavailable(key, "checkout", err))?;
        let value: Option<Vec<u8>> = conn
            .get(key.as_str())
            .await
            .map_err(|err| unavailable(key, "get", err))?;
        value.ok_or(UserCacheError::Miss)
    }

    async fn set(
        &self,
        key: &UserCacheKey,
        value: Vec<u8>,
        ttl: Duration,
    ) -> Result<(), UserCacheError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| unavailable(key, "checkout", err))?;
        conn.set_ex::<_, _, ()>(key.as_str(), value, ttl_seconds(ttl))
            .await
            .map_err(|err| unavailable(key, "set_ex", err))
    }
}
