//! # Redis 캐시 클라이언트
//!
//! 단건 조회(`member:{id}`, `team:{id}`) 결과를 JSON으로 캐싱합니다.
//! Spring의 `RedisTemplate` + `@Cacheable` / `@CacheEvict` 조합에 해당합니다.
//!
//! 검색/페이징 결과는 조건 조합이 무한하므로 캐싱하지 않습니다.
//! 키 생성과 무효화는 `#[repository]` 매크로가 만드는
//! `cache_key` / `invalidate_cache` / `invalidate_pattern_cache`가 이 클라이언트의
//! `del`, `keys`, `del_multiple`을 호출해 처리합니다.

use log::info;
use redis::{AsyncCommands, Client};
use serde::{Serialize, de::DeserializeOwned};
use std::env;

/// 단건 엔티티 캐시 TTL (초)
pub const ENTITY_CACHE_TTL_SECONDS: usize = 600;

/// Redis 캐시 클라이언트 래퍼
///
/// 멀티플렉싱 연결을 사용하므로 `Clone`이 가볍고, `Arc<RedisClient>`로
/// 리포지토리에 주입됩니다.
///
/// ```rust,ignore
/// let redis = RedisClient::new().await?;
/// redis.set_with_expiry("member:65f0...", &member, 600).await?;
/// let cached: Option<Member> = redis.get("member:65f0...").await?;
/// ```
#[derive(Clone)]
pub struct RedisClient {
    client: Client,
}

impl RedisClient {
    /// `REDIS_URL`(기본값 `redis://localhost:6379`)로 연결하고 `PING`으로 검증합니다.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let redis_url = env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://localhost:6379".to_string());

        let client = Client::open(redis_url)?;

        let mut conn = client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<()>(&mut conn).await?;

        info!("✅ Redis 연결 성공");

        Ok(Self { client })
    }

    /// 키를 조회해 JSON을 역직렬화합니다. 키가 없으면 `Ok(None)`.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(key).await?;

        match value {
            Some(json) => {
                let deserialized = serde_json::from_str(&json)
                    .map_err(|e| redis::RedisError::from((redis::ErrorKind::TypeError, "Deserialization failed", e.to_string())))?;
                Ok(Some(deserialized))
            }
            None => Ok(None),
        }
    }

    /// `seconds` 초 후 만료되도록 저장합니다.
    pub async fn set_with_expiry<T: Serialize>(&self, key: &str, value: &T, seconds: usize) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let json = to_json(value)?;
        conn.set_ex(key, json, seconds as u64).await
    }

    pub async fn del(&self, key: &str) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del(key).await
    }

    /// 여러 키를 한 번의 `DEL`로 삭제합니다. 빈 목록이면 아무것도 하지 않습니다.
    pub async fn del_multiple(&self, keys: &[String]) -> Result<(), redis::RedisError> {
        if keys.is_empty() {
            return Ok(());
        }
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del(keys).await
    }

    /// `KEYS pattern`
    ///
    /// 블로킹 명령이므로 벌크 연산 후 무효화처럼 드문 경로에서만 사용합니다.
    pub async fn keys(&self, pattern: &str) -> Result<Vec<String>, redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.keys(pattern).await
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, redis::RedisError> {
    serde_json::to_string(value)
        .map_err(|e| redis::RedisError::from((redis::ErrorKind::TypeError, "Serialization failed", e.to_string())))
}

impl Default for RedisClient {
    /// 연결 검증 없이 클라이언트만 만듭니다. 실제 서버에서는 `RedisClient::new().await`를 사용하세요.
    fn default() -> Self {
        let redis_url = env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://localhost:6379".to_string());

        let client = Client::open(redis_url)
            .expect("Failed to create Redis client with default configuration");

        Self { client }
    }
}
