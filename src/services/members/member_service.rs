//! # 회원 서비스
//!
//! 회원 등록/조회, 동적 조건 검색과 페이징, 벌크 연산, 통계, 샘플 데이터 적재를 담당합니다.
//!
//! ```text
//! handlers ──▶ MemberService ──▶ MemberRepository ──▶ members (+ $lookup teams)
//!                    │
//!                    └──────────▶ TeamRepository ──▶ teams
//! ```
//!
//! 샘플 데이터 적재는 선언적 트랜잭션 대신 세션을 직접 열어
//! 성공하면 커밋하고 어떤 오류든 나면 중단합니다.

use std::sync::Arc;
use log::{info, warn};
use mongodb::ClientSession;
use singleton_macro::service;
use crate::{
    config::DatabaseConfig,
    core::errors::AppError,
    db::Database,
    domain::{
        dto::members::{
            request::{CreateMemberRequest, MemberSearchCondition},
            response::{BulkUpdateResponse, MemberAgeStats, MemberDto, MemberTeamDto, TeamAgeStats},
        },
        entities::{members::member::Member, teams::team::Team},
    },
    query::pageable::{Page, Pageable, SortOrder},
    repositories::{members::member_repo::MemberRepository, teams::team_repo::TeamRepository},
    utils::string_utils::has_text,
};

/// 샘플 데이터 회원 수
pub const SAMPLE_MEMBER_COUNT: i32 = 100;

#[service(name = "member")]
pub struct MemberService {
    member_repo: Arc<MemberRepository>,
    team_repo: Arc<TeamRepository>,
    db: Arc<Database>,
}

impl MemberService {
    /// 회원을 등록합니다. `team_name`이 있으면 기존 팀이어야 합니다.
    pub async fn register_member(&self, request: CreateMemberRequest) -> Result<MemberTeamDto, AppError> {
        let team = match request.team_name.as_deref() {
            Some(name) => Some(
                self.team_repo
                    .find_by_name(name)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("팀을 찾을 수 없습니다: {}", name)))?,
            ),
            None => None,
        };

        let member = match &team {
            Some(team) => Member::with_team(request.username, request.age, team),
            None => Member::with_age(request.username, request.age),
        };

        let saved = self.member_repo.save(member).await?;
        info!("👤 회원 등록: {} (age={}, team={:?})", saved.username, saved.age, team.as_ref().map(|t| &t.name));

        Ok(MemberTeamDto::from_member(&saved, team.as_ref()))
    }

    pub async fn get_member(&self, id: &str) -> Result<MemberTeamDto, AppError> {
        let member = self.member_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("회원을 찾을 수 없습니다".to_string()))?;

        let team = match member.team_id {
            Some(team_id) => self.team_repo.find_by_id(&team_id.to_hex()).await?,
            None => None,
        };

        Ok(MemberTeamDto::from_member(&member, team.as_ref()))
    }

    /// 조인 없이 이름/나이만 조회합니다. `username`이 비어 있으면 전체 회원입니다.
    pub async fn list_members(&self, username: Option<&str>) -> Result<Vec<MemberDto>, AppError> {
        let members = match username.filter(|name| has_text(Some(*name))) {
            Some(name) => self.member_repo.find_all_by_username(name).await?,
            None => self.member_repo.find_all().await?,
        };
        Ok(members.iter().map(MemberDto::from).collect())
    }

    pub async fn search(
        &self,
        condition: &MemberSearchCondition,
        sort: &[SortOrder],
    ) -> Result<Vec<MemberTeamDto>, AppError> {
        self.member_repo.search(condition, sort).await
    }

    pub async fn search_page_simple(
        &self,
        condition: &MemberSearchCondition,
        pageable: &Pageable,
    ) -> Result<Page<MemberTeamDto>, AppError> {
        self.member_repo.search_page_simple(condition, pageable).await
    }

    pub async fn search_page_complex(
        &self,
        condition: &MemberSearchCondition,
        pageable: &Pageable,
    ) -> Result<Page<MemberTeamDto>, AppError> {
        self.member_repo.search_page_complex(condition, pageable).await
    }

    pub async fn bulk_rename_younger_than(&self, age: i32, new_name: &str) -> Result<BulkUpdateResponse, AppError> {
        let affected = self.member_repo.bulk_rename_younger_than(age, new_name).await?;
        info!("✏️ 벌크 이름 변경: age < {} → '{}' ({}건)", age, new_name, affected);
        Ok(BulkUpdateResponse { affected })
    }

    pub async fn bulk_add_age(&self, delta: i32) -> Result<BulkUpdateResponse, AppError> {
        let affected = self.member_repo.bulk_add_age(delta).await?;
        info!("➕ 벌크 나이 변경: {:+} ({}건)", delta, affected);
        Ok(BulkUpdateResponse { affected })
    }

    pub async fn bulk_delete_older_than(&self, age: i32) -> Result<BulkUpdateResponse, AppError> {
        let affected = self.member_repo.bulk_delete_older_than(age).await?;
        info!("🗑️ 벌크 삭제: age > {} ({}건)", age, affected);
        Ok(BulkUpdateResponse { affected })
    }

    pub async fn age_statistics(&self) -> Result<MemberAgeStats, AppError> {
        self.member_repo.age_statistics().await
    }

    pub async fn team_age_statistics(&self) -> Result<Vec<TeamAgeStats>, AppError> {
        self.member_repo.team_age_statistics().await
    }

    pub async fn oldest_members(&self) -> Result<Vec<MemberTeamDto>, AppError> {
        self.member_repo.find_oldest().await
    }

    /// `local` 프로파일용 샘플 데이터를 적재하고 저장한 회원 수를 반환합니다.
    ///
    /// 회원이 이미 있으면 아무것도 하지 않습니다.
    /// `MONGODB_TRANSACTIONS=true`이면 팀과 회원 저장을 하나의 트랜잭션으로 묶습니다.
    pub async fn init_sample_data(&self) -> Result<usize, AppError> {
        if self.member_repo.count_all().await? > 0 {
            info!("📦 회원 데이터가 이미 있어 샘플 데이터 적재를 건너뜁니다");
            return Ok(0);
        }

        let inserted = if DatabaseConfig::transactions_enabled() {
            let mut session = self.db
                .start_transaction()
                .await
                .map_err(|e| AppError::DatabaseError(e.to_string()))?;

            match self.insert_sample_data(Some(&mut session)).await {
                Ok(inserted) => {
                    session
                        .commit_transaction()
                        .await
                        .map_err(|e| AppError::DatabaseError(e.to_string()))?;
                    inserted
                }
                Err(e) => {
                    if let Err(abort_error) = session.abort_transaction().await {
                        warn!("⚠️ 트랜잭션 중단 실패: {}", abort_error);
                    }
                    return Err(e);
                }
            }
        } else {
            self.insert_sample_data(None).await?
        };

        info!("📦 샘플 데이터 적재 완료: 팀 2개, 회원 {}명", inserted);
        Ok(inserted)
    }

    async fn insert_sample_data(&self, mut session: Option<&mut ClientSession>) -> Result<usize, AppError> {
        let teams = self.team_repo
            .save_all(vec![Team::new("teamA"), Team::new("teamB")], session.as_deref_mut())
            .await?;

        let [team_a, team_b]: [Team; 2] = teams
            .try_into()
            .map_err(|_| AppError::InternalError("샘플 팀 저장 결과가 올바르지 않습니다".to_string()))?;

        let members = self.member_repo
            .save_all(sample_members(&team_a, &team_b), session)
            .await?;

        Ok(members.len())
    }
}

/// `member0` ~ `member99`, 나이 = 번호, 짝수는 `team_a` / 홀수는 `team_b`
pub fn sample_members(team_a: &Team, team_b: &Team) -> Vec<Member> {
    (0..SAMPLE_MEMBER_COUNT)
        .map(|i| {
            let team = if i % 2 == 0 { team_a } else { team_b };
            Member::with_team(format!("member{}", i), i, team)
        })
        .collect()
}
