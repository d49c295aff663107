//! # Configuration Module
//!
//! 환경 변수 기반 설정을 한곳에서 관리합니다.
//! Spring의 `application.yml` + `@Profile` 조합을 `.env` 파일 + [`Profile`]로 대신합니다.
//!
//! ## 환경 변수
//!
//! ```bash
//! PROFILE=local                # local | dev | prod (local 이면 샘플 데이터 적재)
//! HOST=127.0.0.1
//! PORT=8080
//! MONGODB_URI=mongodb://localhost:27017
//! DATABASE_NAME=member_search_dev
//! MONGODB_TRANSACTIONS=false   # 레플리카셋이면 true
//! REDIS_URL=redis://localhost:6379
//! DEFAULT_PAGE_SIZE=20
//! MAX_PAGE_SIZE=2000
//! RATE_LIMIT_PER_SECOND=100
//! RATE_LIMIT_BURST_SIZE=200
//! ```
//!
//! | Spring | 이 프로젝트 |
//! |--------|-------------|
//! | `spring.profiles.active` | `PROFILE` → [`Profile`] |
//! | `@Value("${server.port}")` | [`ServerConfig::port()`] |
//! | `spring.data.mongodb.uri` | [`DatabaseConfig::uri()`] |
//! | `spring.data.web.pageable.default-page-size` | [`PagingConfig::default_page_size()`] |

pub mod data_config;

pub use data_config::*;
