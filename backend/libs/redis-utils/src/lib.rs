use anyhow::{Context, Result};
use redis::aio::ConnectionManager;
use redis::{Client, RedisError};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{timeout, Duration};
use tracing::info;

/// Shared Redis connection manager guarded by a Tokio mutex.
pub type SharedConnectionManager = Arc<Mutex<ConnectionManager>>;

/// Upper bound for a single cache round trip.
const OPERATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Redis connection pool built around a reconnecting connection manager.
pub struct RedisPool {
    manager: SharedConnectionManager,
}

impl RedisPool {
    pub async fn connect(redis_url: &str) -> Result<Self> {
        let client =
            Client::open(redis_url).context("failed to parse REDIS_URL connection string")?;
        let connection_manager = ConnectionManager::new(client)
            .await
            .context("failed to initialize Redis connection manager")?;
        info!("Redis connection manager established");
        Ok(Self {
            manager: Arc::new(Mutex::new(connection_manager)),
        })
    }

    pub fn manager(&self) -> SharedConnectionManager {
        self.manager.clone()
    }
}

/// Run a Redis future under the default operation timeout.
///
/// An elapsed deadline surfaces as a plain IO-kind error, indistinguishable
/// from any other transport failure to the caller.
pub async fn with_timeout<F, T>(fut: F) -> Result<T, RedisError>
where
    F: Future<Output = Result<T, RedisError>>,
{
    with_deadline(fut, OPERATION_TIMEOUT).await
}

async fn with_deadline<F, T>(fut: F, deadline: Duration) -> Result<T, RedisError>
where
    F: Future<Output = Result<T, RedisError>>,
{
    match timeout(deadline, fut).await {
        Ok(result) => result,
        Err(_) => Err(RedisError::from((
            redis::ErrorKind::IoError,
            "redis operation timed out",
        ))),
    }
}

/// Store `value` under `key`, overwriting any existing entry.
///
/// The TTL starts fresh on every call; the entry disappears on its own once
/// the TTL elapses.
pub async fn set_with_ttl(
    manager: &SharedConnectionManager,
    key: &str,
    value: &str,
    ttl_secs: u64,
) -> Result<(), RedisError> {
    let mut conn = manager.lock().await.clone();
    with_timeout(async move {
        redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("EX")
            .arg(ttl_secs)
            .query_async::<_, ()>(&mut conn)
            .await
    })
    .await
}

/// Fetch the value stored under `key`; `None` when absent or expired.
pub async fn get(
    manager: &SharedConnectionManager,
    key: &str,
) -> Result<Option<String>, RedisError> {
    let mut conn = manager.lock().await.clone();
    with_timeout(async move { redis::cmd("GET").arg(key).query_async(&mut conn).await }).await
}

/// Key presence, derived from `get` so both read paths behave identically.
pub async fn exists(manager: &SharedConnectionManager, key: &str) -> Result<bool, RedisError> {
    Ok(get(manager, key).await?.is_some())
}
