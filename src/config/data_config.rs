//! 데이터 및 서버 설정 관리 모듈
//!
//! 실행 프로파일, 데이터베이스, 서버 바인딩, 페이징 관련 설정을 환경 변수에서 읽습니다.

use std::env;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경
    Development,
    /// 테스트 환경
    Test,
    /// 스테이징 환경
    Staging,
    /// 프로덕션 환경
    Production,
}

impl Environment {
    /// `ENVIRONMENT` 환경 변수로 현재 실행 환경을 감지합니다.
    ///
    /// 설정되지 않은 경우 `Production`을 기본값으로 사용합니다.
    pub fn current() -> Self {
        Self::from_str(&env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string()))
    }

    /// 문자열에서 Environment를 생성합니다. 알 수 없는 값은 `Production`입니다.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

/// `.env` 파일 선택과 샘플 데이터 적재를 결정하는 실행 프로파일
///
/// Spring의 `spring.profiles.active`와 같은 역할이며 `PROFILE` 환경 변수로 지정합니다.
#[derive(Debug, Clone, PartialEq)]
pub enum Profile {
    /// `.env.local` 로드 + 기동 시 샘플 팀/회원 데이터 적재
    Local,
    /// `.env.dev` 로드 (기본값)
    Dev,
    /// `.env.prod` 로드
    Prod,
    /// 기본 `.env` 로드
    Other(String),
}

impl Profile {
    pub fn current() -> Self {
        Self::from_str(&env::var("PROFILE").unwrap_or_else(|_| "dev".to_string()))
    }

    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "local" => Profile::Local,
            "dev" => Profile::Dev,
            "prod" => Profile::Prod,
            other => Profile::Other(other.to_string()),
        }
    }

    /// 프로파일에 대응하는 env 파일 이름. `None`이면 기본 `.env`를 사용합니다.
    pub fn env_file(&self) -> Option<&'static str> {
        match self {
            Profile::Local => Some(".env.local"),
            Profile::Dev => Some(".env.dev"),
            Profile::Prod => Some(".env.prod"),
            Profile::Other(_) => None,
        }
    }

    /// 샘플 데이터 적재 여부
    pub fn is_local(&self) -> bool {
        matches!(self, Profile::Local)
    }
}

/// MongoDB 연결 설정
pub struct DatabaseConfig;

impl DatabaseConfig {
    /// `MONGODB_URI` (기본값: `mongodb://localhost:27017`)
    pub fn uri() -> String {
        env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string())
    }

    /// `DATABASE_NAME` (기본값: `member_search_dev`)
    pub fn name() -> String {
        env::var("DATABASE_NAME").unwrap_or_else(|_| "member_search_dev".to_string())
    }

    /// `MONGODB_TRANSACTIONS` - 다건 쓰기를 세션 트랜잭션으로 묶을지 여부
    ///
    /// MongoDB 트랜잭션은 레플리카셋/샤드 클러스터에서만 동작하므로 기본값은 `false`입니다.
    pub fn transactions_enabled() -> bool {
        env::var("MONGODB_TRANSACTIONS")
            .map(|v| parse_flag(&v))
            .unwrap_or(false)
    }
}

/// 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    /// `PORT` (기본값: 8080)
    pub fn port() -> u16 {
        env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080)
    }

    /// `HOST` (기본값: `127.0.0.1`)
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string())
    }

    /// `host:port` 형태의 바인딩 주소
    pub fn bind_address() -> String {
        format!("{}:{}", Self::host(), Self::port())
    }
}

/// 페이징 설정
///
/// Spring Data의 `spring.data.web.pageable.*` 기본값(20 / 2000)을 따릅니다.
pub struct PagingConfig;

impl PagingConfig {
    pub const DEFAULT_PAGE_SIZE: u64 = 20;
    pub const MAX_PAGE_SIZE: u64 = 2000;

    /// `DEFAULT_PAGE_SIZE` 환경 변수 또는 20
    pub fn default_page_size() -> u64 {
        env::var("DEFAULT_PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|size| *size > 0)
            .unwrap_or(Self::DEFAULT_PAGE_SIZE)
    }

    /// `MAX_PAGE_SIZE` 환경 변수 또는 2000
    pub fn max_page_size() -> u64 {
        env::var("MAX_PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|size| *size > 0)
            .unwrap_or(Self::MAX_PAGE_SIZE)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_string() {
        assert_eq!(Environment::from_str("development"), Environment::Development);
        assert_eq!(Environment::from_str("test"), Environment::Test);
        assert_eq!(Environment::from_str("STAGE"), Environment::Staging);
        assert_eq!(Environment::from_str("unknown"), Environment::Production);
    }

    #[test]
    fn test_profile_env_files() {
        assert_eq!(Profile::from_str("local").env_file(), Some(".env.local"));
        assert_eq!(Profile::from_str("dev").env_file(), Some(".env.dev"));
        assert_eq!(Profile::from_str("PROD").env_file(), Some(".env.prod"));
        assert_eq!(Profile::from_str("qa").env_file(), None);
    }

    #[test]
    fn test_only_local_profile_seeds_sample_data() {
        assert!(Profile::from_str(" local ").is_local());
        assert!(!Profile::from_str("dev").is_local());
        assert!(!Profile::from_str("prod").is_local());
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" ON "));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn test_server_config_defaults() {
        if env::var("PORT").is_err() {
            assert_eq!(ServerConfig::port(), 8080);
        }

        if env::var("HOST").is_err() {
            assert_eq!(ServerConfig::host(), "127.0.0.1");
        }
    }

    #[test]
    fn test_paging_config_defaults() {
        if env::var("DEFAULT_PAGE_SIZE").is_err() {
            assert_eq!(PagingConfig::default_page_size(), 20);
        }

        if env::var("MAX_PAGE_SIZE").is_err() {
            assert_eq!(PagingConfig::max_page_size(), 2000);
        }
    }
}
