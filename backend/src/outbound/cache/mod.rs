//! User profile cache adapters.
//!
//! - [`RedisUserCache`]: Redis via a `bb8-redis` pool, `GET` and `SET EX`.
//! - [`InMemoryUserCache`]: process-local map with expiry, used when no
//!   Redis URL is configured and in tests.

mod memory_user_cache;
mod redis_user_cache;

pub use memory_user_cache::InMemoryUserCache;
pub use redis_user_cache::{RedisCacheError, RedisUserCache};
