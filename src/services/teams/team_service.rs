//! # 팀 서비스
//!
//! 팀 등록(이름 중복 불가)과 목록 조회를 담당합니다.

use std::sync::Arc;
use log::info;
use singleton_macro::service;
use crate::{
    core::errors::AppError,
    domain::{
        dto::teams::{CreateTeamRequest, TeamResponse},
        entities::teams::team::Team,
    },
    repositories::teams::team_repo::TeamRepository,
    utils::string_utils::validate_required_string,
};

#[service(name = "team")]
pub struct TeamService {
    team_repo: Arc<TeamRepository>,
}

impl TeamService {
    pub async fn create_team(&self, request: CreateTeamRequest) -> Result<TeamResponse, AppError> {
        let name = validate_required_string(&request.name, "팀 이름")?;

        if self.team_repo.find_by_name(&name).await?.is_some() {
            return Err(AppError::ConflictError(format!("이미 존재하는 팀 이름입니다: {}", name)));
        }

        let team = self.team_repo.save(Team::new(name)).await?;
        info!("🏷️ 팀 등록: {}", team.name);

        Ok(TeamResponse::from(team))
    }

    pub async fn list_teams(&self) -> Result<Vec<TeamResponse>, AppError> {
        let teams = self.team_repo.find_all().await?;
        Ok(teams.into_iter().map(TeamResponse::from).collect())
    }
}
