//! 라우트 구성
//!
//! ```text
//! GET  /health
//! /api/v1/members   검색, 등록, 조회, 벌크 연산, 통계
//! /api/v2/members   페이징 검색 (단일 $facet 쿼리)
//! /api/v3/members   페이징 검색 (count 쿼리 지연)
//! /api/v1/teams     팀 등록, 목록
//! ```

use crate::config::Environment;
use crate::core::errors::AppError;
use crate::handlers;
use actix_web::error::QueryPayloadError;
use actix_web::{HttpRequest, web};
use serde_json::json;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // 쿼리 파라미터 파싱 실패도 {"error": ...} 형태로 응답
    cfg.app_data(web::QueryConfig::default().error_handler(query_error_handler));

    // Health check endpoint
    cfg.service(health_check);

    configure_member_routes(cfg);
    configure_team_routes(cfg);
}

fn configure_member_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/members")
            .service(handlers::members::search_members)
            .service(handlers::members::create_member)
            // 고정 경로를 `/{member_id}`보다 먼저 등록
            .service(handlers::members::list_members_simple)
            .service(handlers::members::oldest_members)
            .service(handlers::members::age_statistics)
            .service(handlers::members::team_age_statistics)
            .service(handlers::members::bulk_rename)
            .service(handlers::members::bulk_add_age)
            .service(handlers::members::bulk_delete)
            .service(handlers::members::get_member)
    );

    cfg.service(
        web::scope("/api/v2/members")
            .service(handlers::members::search_members_page_simple)
    );

    cfg.service(
        web::scope("/api/v3/members")
            .service(handlers::members::search_members_page_complex)
    );
}

fn configure_team_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/teams")
            .service(handlers::teams::create_team)
            .service(handlers::teams::list_teams)
    );
}

fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(format!("잘못된 쿼리 파라미터: {}", err)).into()
}

#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "member_search_service",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": format!("{:?}", Environment::current()),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "cache": "Redis",
            "dependency_injection": "Singleton Macro"
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().service(health_check)).await;
        let request = test::TestRequest::get().uri("/health").to_request();

        let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;

        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "member_search_service");
    }

    #[actix_web::test]
    async fn test_malformed_query_returns_json_validation_error() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        for uri in [
            "/api/v1/members?age_goe=abc",
            "/api/v2/members?page=first",
            "/api/v3/members?size=-1",
        ] {
            let request = test::TestRequest::get().uri(uri).to_request();
            let response = test::call_service(&app, request).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);

            let body: serde_json::Value = test::read_body_json(response).await;
            let message = body["error"].as_str().unwrap();
            assert!(message.starts_with("Validation error"), "{}", message);
        }
    }
}
