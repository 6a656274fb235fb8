//! Composition root: turn settings into the port implementations behind
//! [`HttpState`].
//!
//! PostgreSQL and Redis adapters are used when their URLs are configured;
//! otherwise the in-memory adapters stand in so the service runs without
//! infrastructure.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use taskboard::domain::ports::{
    AccountCommand, PasswordHasher, ProfileQuery, TaskRepository, TodoCommand, TodoQuery,
    TokenCodec, UserCache, UserRepository,
};
use taskboard::domain::{AccountService, OperationDeadline, TodoService};
use taskboard::inbound::http::state::HttpState;
use taskboard::outbound::cache::{InMemoryUserCache, RedisCacheError, RedisUserCache};
use taskboard::outbound::credentials::{BcryptPasswordHasher, JwtTokenCodec};
use taskboard::outbound::memory::{InMemoryTaskRepository, InMemoryUserRepository};
use taskboard::outbound::persistence::{
    DbPool, DieselTaskRepository, DieselUserRepository, MigrationError, PoolConfig, PoolError,
    run_pending_migrations,
};
use tracing::info;

use super::config::{AppSettings, SettingsError};

const CACHE_POOL_SIZE: u32 = 8;

/// Failures while wiring adapters at startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Migrations(#[from] MigrationError),
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error(transparent)]
    Cache(#[from] RedisCacheError),
}

/// Services shared by every account adapter combination.
struct AccountDeps {
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenCodec>,
    deadline: OperationDeadline,
}

enum CacheBackend {
    Redis(Arc<RedisUserCache>),
    Memory(Arc<InMemoryUserCache>),
}

type AccountPorts = (Arc<dyn AccountCommand>, Arc<dyn ProfileQuery>);
type TodoPorts = (Arc<dyn TodoCommand>, Arc<dyn TodoQuery>);

fn todo_ports<R>(tasks: Arc<R>, deadline: OperationDeadline) -> TodoPorts
where
    R: TaskRepository + 'static,
{
    let service = Arc::new(TodoService::new(tasks, deadline));
    (
        service.clone() as Arc<dyn TodoCommand>,
        service as Arc<dyn TodoQuery>,
    )
}

fn account_ports<U, C>(users: Arc<U>, cache: Arc<C>, deps: &AccountDeps) -> AccountPorts
where
    U: UserRepository + 'static,
    C: UserCache + 'static,
{
    let service = Arc::new(
        AccountService::new(users, cache, deps.hasher.clone(), deps.tokens.clone())
            .with_deadline(deps.deadline),
    );
    (
        service.clone() as Arc<dyn AccountCommand>,
        service as Arc<dyn ProfileQuery>,
    )
}

fn account_ports_with_cache<U>(users: Arc<U>, cache: &CacheBackend, deps: &AccountDeps) -> AccountPorts
where
    U: UserRepository + 'static,
{
    match cache {
        CacheBackend::Redis(cache) => account_ports(users, cache.clone(), deps),
        CacheBackend::Memory(cache) => account_ports(users, cache.clone(), deps),
    }
}

async fn build_cache(
    settings: &AppSettings,
    clock: &Arc<dyn Clock>,
) -> Result<CacheBackend, StartupError> {
    match settings.redis_url.as_deref() {
        Some(url) => {
            let cache = RedisUserCache::connect(url, CACHE_POOL_SIZE).await?;
            info!("profile cache: redis");
            Ok(CacheBackend::Redis(Arc::new(cache)))
        }
        None => {
            info!("profile cache: in-memory");
            Ok(CacheBackend::Memory(Arc::new(InMemoryUserCache::new(
                clock.clone(),
            ))))
        }
    }
}

async fn build_pool(settings: &AppSettings, url: &str) -> Result<DbPool, StartupError> {
    if settings.run_migrations {
        run_pending_migrations(url).await?;
    }
    let config = PoolConfig::new(url).with_max_size(settings.db_max_connections());
    let pool = DbPool::new(config).await?;
    info!(max_connections = settings.db_max_connections(), "stores: postgres");
    Ok(pool)
}

/// Build the handler state from settings.
///
/// # Errors
/// Returns [`StartupError`] when a setting is invalid, migrations fail, or a
/// configured backend cannot be reached.
pub async fn build_http_state(settings: &AppSettings) -> Result<HttpState, StartupError> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let deadline = OperationDeadline::new(settings.request_timeout());
    let tokens: Arc<dyn TokenCodec> = Arc::new(JwtTokenCodec::new(
        settings.jwt_secret()?.to_vec(),
        clock.clone(),
    ));
    let deps = AccountDeps {
        hasher: Arc::new(BcryptPasswordHasher::new(settings.bcrypt_cost())),
        tokens: tokens.clone(),
        deadline,
    };
    let cache = build_cache(settings, &clock).await?;

    let ((todos, todos_query), (accounts, profiles)) = match settings.database_url.as_deref() {
        Some(url) => {
            let pool = build_pool(settings, url).await?;
            (
                todo_ports(Arc::new(DieselTaskRepository::new(pool.clone())), deadline),
                account_ports_with_cache(Arc::new(DieselUserRepository::new(pool)), &cache, &deps),
            )
        }
        None => {
            info!("stores: in-memory");
            (
                todo_ports(Arc::new(InMemoryTaskRepository::new(clock)), deadline),
                account_ports_with_cache(Arc::new(InMemoryUserRepository::new()), &cache, &deps),
            )
        }
    };

    Ok(HttpState::new(todos, todos_query, accounts, profiles, tokens))
}
