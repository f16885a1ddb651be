/// Optional Redis cache with graceful degradation.
///
/// Every operation swallows Redis failures: reads return `None`, writes return
/// `false`, and a warning is logged. The catalog is always computable from the
/// in-memory record set, so a missing or broken Redis only costs recomputation.
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tracing::warn;

use crate::error::CommonError;

pub struct RedisCache {
    client: Option<redis::Client>,
}

impl RedisCache {
    /// Build a cache from an optional URL. An absent or unparsable URL yields a
    /// cache where every call is a no-op.
    pub fn new(url: Option<&str>) -> Self {
        let client = url.and_then(|u| {
            redis::Client::open(u)
                .inspect_err(|e| warn!(error = %e, url = u, "invalid redis url, cache disabled"))
                .ok()
        });
        Self { client }
    }

    /// A cache that never talks to Redis.
    pub fn disabled() -> Self {
        Self { client: None }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    async fn connection(&self) -> Result<MultiplexedConnection, CommonError> {
        let client = self.client.as_ref().ok_or(CommonError::RedisUnavailable)?;
        Ok(client.get_multiplexed_async_connection().await?)
    }

    /// Send a PING. Returns `true` if Redis answered.
    pub async fn is_available(&self) -> bool {
        let Ok(mut conn) = self.connection().await else {
            return false;
        };
        let pong: Result<String, _> = redis::cmd("PING").query_async(&mut conn).await;
        pong.is_ok()
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        let mut conn = match self.connection().await {
            Ok(conn) => conn,
            Err(CommonError::RedisUnavailable) => return None,
            Err(e) => {
                warn!(error = %e, "redis connection failed");
                return None;
            }
        };
        let value: Option<String> = conn
            .get(key)
            .await
            .inspect_err(|e| warn!(error = %e, key, "redis GET failed"))
            .ok()?;
        value
    }

    /// Store `value` under `key`, expiring after `ttl_secs`.
    pub async fn set_with_ttl(&self, key: &str, value: &str, ttl_secs: u64) -> bool {
        let mut conn = match self.connection().await {
            Ok(conn) => conn,
            Err(CommonError::RedisUnavailable) => return false,
            Err(e) => {
                warn!(error = %e, "redis connection failed");
                return false;
            }
        };
        conn.set_ex::<_, _, ()>(key, value, ttl_secs)
            .await
            .inspect_err(|e| warn!(error = %e, key, "redis SETEX failed"))
            .is_ok()
    }

    /// Read a JSON value. Undecodable entries are treated as misses.
    pub async fn get_json<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let json = self.get(key).await?;
        serde_json::from_str(&json)
            .inspect_err(|e| warn!(error = %e, key, "cache deserialization failed"))
            .ok()
    }

    pub async fn set_json<T: serde::Serialize>(&self, key: &str, value: &T, ttl_secs: u64) -> bool {
        match serde_json::to_string(value) {
            Ok(json) => self.set_with_ttl(key, &json, ttl_secs).await,
            Err(e) => {
                warn!(error = %e, key, "cache serialization failed");
                false
            }
        }
    }
}
