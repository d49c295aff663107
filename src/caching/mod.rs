//! 캐싱 계층 모듈
//!
//! Redis 기반 단건 엔티티 캐시를 제공합니다.
//!
//! ```rust,ignore
//! use crate::caching::redis::{RedisClient, ENTITY_CACHE_TTL_SECONDS};
//!
//! // 리포지토리 안에서
//! let key = self.cache_key(&id);                    // "member:{id}"
//! self.redis.set_with_expiry(&key, &member, ENTITY_CACHE_TTL_SECONDS).await?;
//! let cached: Option<Member> = self.redis.get(&key).await?;
//!
//! // 벌크 수정/삭제 후
//! self.invalidate_pattern_cache(&format!("{}:*", self.name())).await?;
//! ```
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
