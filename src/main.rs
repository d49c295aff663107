//! 회원/팀 검색 서비스 진입점
//!
//! 1. `PROFILE`에 맞는 env 파일 로드, 로깅 초기화
//! 2. MongoDB / Redis 연결 후 `ServiceLocator`에 등록
//! 3. 리포지토리/서비스 싱글톤 생성, 인덱스 생성
//! 4. `local` 프로파일이면 샘플 데이터 적재
//! 5. HTTP 서버 실행

use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};
use member_search_service::caching::redis::RedisClient;
use member_search_service::config::{Profile, ServerConfig};
use member_search_service::core::registry::ServiceLocator;
use member_search_service::db::Database;
use member_search_service::repositories::members::member_repo::MemberRepository;
use member_search_service::repositories::teams::team_repo::TeamRepository;
use member_search_service::routes::configure_all_routes;
use member_search_service::services::members::member_service::MemberService;

#[derive(Debug)]
struct RateLimitConfig {
    per_second: u64,
    burst_size: u32,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let profile = Profile::current();
    load_env_file(&profile);
    init_logging();

    info!("🚀 회원 검색 서비스 시작중... (profile: {:?})", profile);

    let (database, redis_client) = initialize_data_stores().await;

    ServiceLocator::set(database);
    ServiceLocator::set(redis_client);

    ServiceLocator::initialize_all()
        .await
        .expect("리포지토리/서비스 싱글톤 생성 실패");

    prepare_collections().await;

    if profile.is_local() {
        match MemberService::instance().init_sample_data().await {
            Ok(inserted) => info!("📦 샘플 데이터: 회원 {}명 적재", inserted),
            Err(e) => error!("❌ 샘플 데이터 적재 실패: {}", e),
        }
    }

    info!("✅ 초기화 완료");

    start_http_server().await
}

async fn start_http_server() -> std::io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 http://{} 에서 요청 대기", bind_address);
    info!("📍 GET /health, /api/v1/members, /api/v2/members, /api/v3/members, /api/v1/teams");

    let rate_limit_config = load_rate_limit_config();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .expect("Rate Limiting 설정 생성 실패");

    HttpServer::new(move || {
        let cors = configure_cors();

        App::new()
            .wrap(Governor::new(&governor_conf))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .workers(4)
        .run()
        .await
}

fn load_env_file(profile: &Profile) {
    // 로거 초기화 전이므로 결과는 stderr로 남깁니다.
    match profile.env_file() {
        Some(file) => match dotenv::from_filename(file) {
            Ok(_) => eprintln!("{} 파일 로드 됨", file),
            Err(e) => eprintln!("{} 파일 로드 실패: {}", file, e),
        },
        None => {
            dotenv().ok();
            eprintln!("기본 .env 파일 로드");
        }
    }
}

fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

async fn initialize_data_stores() -> (Arc<Database>, Arc<RedisClient>) {
    info!("📡 데이터베이스 연결 중...");

    let database = Database::new().await.expect("MongoDB 연결 실패");
    let redis_client = RedisClient::new().await.expect("Redis 연결 실패");

    (Arc::new(database), Arc::new(redis_client))
}

async fn prepare_collections() {
    if let Err(e) = TeamRepository::instance().create_indexes().await {
        warn!("⚠️ teams 인덱스 생성 실패: {}", e);
    }
    if let Err(e) = MemberRepository::instance().create_indexes().await {
        warn!("⚠️ members 인덱스 생성 실패: {}", e);
    }
}

fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .max_age(3600)
}

fn load_rate_limit_config() -> RateLimitConfig {
    let config = RateLimitConfig {
        per_second: env_or("RATE_LIMIT_PER_SECOND", 100),
        burst_size: env_or("RATE_LIMIT_BURST_SIZE", 200),
    };

    info!("🛡️ Rate Limiting 설정: {:?}", config);
    config
}

/// 환경 변수를 파싱하고, 없거나 잘못된 값이면 기본값을 씁니다.
fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
            error!("{} 파싱 실패 ({}): {}. 기본값 {} 사용", key, raw, e, default);
            default
        }),
        Err(_) => default,
    }
}
