//! Process-local `UserCache` with per-entry expiry.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::{Clock, DefaultClock};
use tokio::sync::RwLock;

use crate::domain::ports::{UserCache, UserCacheError, UserCacheKey};

struct Entry {
    value: Vec<u8>,
    expires_at: DateTime<Utc>,
}

/// In-memory profile cache. Expired entries read as misses and are
/// overwritten on the next `set`.
#[derive(Clone)]
pub struct InMemoryUserCache {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryUserCache {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl InMemoryUserCache {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }
}

#[async_trait]
impl UserCache for InMemoryUserCache {
    async fn get(&self, key: &UserCacheKey) -> Result<Vec<u8>, UserCacheError> {
        let now = self.clock.utc();
        let entries = self.entries.read().await;
        match entries.get(key.as_str()) {
            Some(entry) if entry.expires_at > now => Ok(entry.value.clone()),
            _ => Err(UserCacheError::Miss),
        }
    }

    async fn set(
        &self,
        key: &UserCacheKey,
        value: Vec<u8>,
        ttl: Duration,
    ) -> Result<(), UserCacheError> {
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|err| UserCacheError::unavailable(err.to_string()))?;
        let now = self.clock.utc();
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            key.as_str().to_owned(),
            Entry {
                value,
                expires_at: now + ttl,
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::{Local, TimeZone};
    use rstest::rstest;

    use super::*;
    use crate::domain::UserId;

    struct SteppingClock(Mutex<DateTime<Utc>>);

    impl SteppingClock {
        fn advance(&self, by: chrono::Duration) {
            let mut now = self.0.lock().expect("clock lock");
            *now += by;
        }
    }

    impl Clock for SteppingClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            *self.0.lock().expect("clock lock")
        }
    }

    fn clock() -> Arc<SteppingClock> {
        Arc::new(SteppingClock(Mutex::new(
            Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0)
                .single()
                .expect("valid timestamp"),
        )))
    }

    #[rstest]
    #[tokio::test]
    async fn entries_expire_after_ttl() {
        let clock = clock();
        let cache = InMemoryUserCache::new(clock.clone());
        let key = UserCacheKey::for_user(&UserId::random());

        assert_eq!(cache.get(&key).await, Err(UserCacheError::Miss));
        cache
            .set(&key, b"profile".to_vec(), Duration::from_secs(120))
            .await
            .expect("set succeeds");
        assert_eq!(cache.get(&key).await, Ok(b"profile".to_vec()));

        clock.advance(chrono::Duration::seconds(119));
        assert!(cache.get(&key).await.is_ok());

        clock.advance(chrono::Duration::seconds(1));
        assert_eq!(cache.get(&key).await, Err(UserCacheError::Miss));
    }

    #[rstest]
    #[tokio::test]
    async fn set_overwrites_existing_entry() {
        let cache = InMemoryUserCache::new(clock());
        let key = UserCacheKey::for_user(&UserId::random());
        cache
            .set(&key, b"old".to_vec(), Duration::from_secs(60))
            .await
            .expect("set succeeds");
        cache
            .set(&key, b"new".to_vec(), Duration::from_secs(60))
            .await
            .expect("set succeeds");
        assert_eq!(cache.get(&key).await, Ok(b"new".to_vec()));
    }
}
