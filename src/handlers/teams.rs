//! # Team HTTP Handlers
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `POST` | `/api/v1/teams` | 팀 등록 | 201 / 409 |
//! | `GET` | `/api/v1/teams` | 팀 목록 (이름순) | 200 |

use actix_web::{HttpResponse, get, post, web};
use validator::Validate;
use crate::{
    core::errors::AppError,
    domain::dto::teams::CreateTeamRequest,
    services::teams::team_service::TeamService,
};

#[post("")]
pub async fn create_team(
    payload: web::Json<CreateTeamRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let service = TeamService::instance();
    let team = service.create_team(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(team))
}

#[get("")]
pub async fn list_teams() -> Result<HttpResponse, AppError> {
    let teams = TeamService::instance().list_teams().await?;
    Ok(HttpResponse::Ok().json(teams))
}
