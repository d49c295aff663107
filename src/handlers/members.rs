//! # Member HTTP Handlers
//!
//! 회원 검색, 등록, 조회, 벌크 연산, 통계 엔드포인트입니다.
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `GET` | `/api/v1/members` | 조건 검색 (정렬 가능) | 200 |
//! | `GET` | `/api/v2/members` | 조건 검색 + 페이징 (`$facet` 한 번) | 200 |
//! | `GET` | `/api/v3/members` | 조건 검색 + 페이징 (count 지연) | 200 |
//! | `POST` | `/api/v1/members` | 회원 등록 | 201 |
//! | `GET` | `/api/v1/members/{id}` | 회원 조회 | 200 / 404 |
//! | `GET` | `/api/v1/members/simple` | 이름/나이 목록 (조인 없음) | 200 |
//! | `GET` | `/api/v1/members/oldest` | 최고령 회원 | 200 |
//! | `GET` | `/api/v1/members/stats` | 나이 통계 | 200 |
//! | `GET` | `/api/v1/members/stats/teams` | 팀별 평균 나이 | 200 |
//! | `POST` | `/api/v1/members/bulk/rename` | 나이 미만 회원 이름 일괄 변경 | 200 |
//! | `POST` | `/api/v1/members/bulk/add-age` | 전체 나이 일괄 증감 | 200 |
//! | `POST` | `/api/v1/members/bulk/delete` | 나이 초과 회원 일괄 삭제 | 200 |
//!
//! 검색 조건 파라미터: `username`, `team_name`, `age_goe`, `age_loe`
//! 페이징 파라미터: `page` (0부터), `size`, `sort=age:desc,username`

use actix_web::{HttpResponse, get, post, web};
use validator::Validate;
use crate::{
    core::errors::AppError,
    domain::dto::members::request::{
        BulkAddAgeRequest, BulkDeleteRequest, BulkRenameRequest, CreateMemberRequest,
        MemberSearchCondition, PageQuery, SortQuery, UsernameQuery,
    },
    query::pageable::{Pageable, parse_sort},
    services::members::member_service::MemberService,
};

#[get("")]
pub async fn search_members(
    condition: web::Query<MemberSearchCondition>,
    sort: web::Query<SortQuery>,
) -> Result<HttpResponse, AppError> {
    let sort = match sort.sort.as_deref() {
        Some(raw) => parse_sort(raw)?,
        None => Vec::new(),
    };

    let service = MemberService::instance();
    let rows = service.search(&condition, &sort).await?;

    Ok(HttpResponse::Ok().json(rows))
}

#[get("")]
pub async fn search_members_page_simple(
    condition: web::Query<MemberSearchCondition>,
    page: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let pageable = Pageable::from_query(&page)?;

    let service = MemberService::instance();
    let page = service.search_page_simple(&condition, &pageable).await?;

    Ok(HttpResponse::Ok().json(page))
}

#[get("")]
pub async fn search_members_page_complex(
    condition: web::Query<MemberSearchCondition>,
    page: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let pageable = Pageable::from_query(&page)?;

    let service = MemberService::instance();
    let page = service.search_page_complex(&condition, &pageable).await?;

    Ok(HttpResponse::Ok().json(page))
}

#[post("")]
pub async fn create_member(
    payload: web::Json<CreateMemberRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let service = MemberService::instance();
    let member = service.register_member(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(member))
}

#[get("/simple")]
pub async fn list_members_simple(
    query: web::Query<UsernameQuery>,
) -> Result<HttpResponse, AppError> {
    let service = MemberService::instance();
    let members = service.list_members(query.username.as_deref()).await?;

    Ok(HttpResponse::Ok().json(members))
}

#[get("/oldest")]
pub async fn oldest_members() -> Result<HttpResponse, AppError> {
    let rows = MemberService::instance().oldest_members().await?;
    Ok(HttpResponse::Ok().json(rows))
}

#[get("/stats")]
pub async fn age_statistics() -> Result<HttpResponse, AppError> {
    let stats = MemberService::instance().age_statistics().await?;
    Ok(HttpResponse::Ok().json(stats))
}

#[get("/stats/teams")]
pub async fn team_age_statistics() -> Result<HttpResponse, AppError> {
    let stats = MemberService::instance().team_age_statistics().await?;
    Ok(HttpResponse::Ok().json(stats))
}

#[post("/bulk/rename")]
pub async fn bulk_rename(
    payload: web::Json<BulkRenameRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let service = MemberService::instance();
    let response = service
        .bulk_rename_younger_than(payload.age_lt, &payload.username)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

#[post("/bulk/add-age")]
pub async fn bulk_add_age(
    payload: web::Json<BulkAddAgeRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let response = MemberService::instance().bulk_add_age(payload.delta).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/bulk/delete")]
pub async fn bulk_delete(
    payload: web::Json<BulkDeleteRequest>,
) -> Result<HttpResponse, AppError> {
    let response = MemberService::instance()
        .bulk_delete_older_than(payload.age_gt)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

/// `/oldest`, `/stats` 등 고정 경로보다 뒤에 등록해야 합니다.
#[get("/{member_id}")]
pub async fn get_member(
    member_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let member = MemberService::instance().get_member(&member_id).await?;
    Ok(HttpResponse::Ok().json(member))
}
