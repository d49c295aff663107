//! # 팀 리포지토리
//!
//! `teams` 컬렉션 CRUD와 단건 캐시를 담당합니다. 팀 이름은 유니크 인덱스로 보장합니다.

use std::sync::Arc;
use futures_util::StreamExt;
use log::debug;
use mongodb::{
    ClientSession, IndexModel,
    bson::{doc, oid::ObjectId},
    options::IndexOptions,
};
use singleton_macro::repository;
use crate::{
    caching::redis::{ENTITY_CACHE_TTL_SECONDS, RedisClient},
    core::{errors::AppError, registry::Repository},
    db::Database,
    domain::entities::teams::team::Team,
};

#[repository(name = "team", collection = "teams")]
pub struct TeamRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl TeamRepository {
    pub async fn save(&self, mut team: Team) -> Result<Team, AppError> {
        let result = self.collection::<Team>()
            .insert_one(&team)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        team.id = result.inserted_id.as_object_id();
        debug!("팀 저장: {} ({:?})", team.name, team.id);
        Ok(team)
    }

    /// 여러 팀을 한 번에 저장합니다. id는 저장 전에 미리 할당합니다.
    ///
    /// `session`이 있으면 해당 트랜잭션 안에서 실행됩니다.
    pub async fn save_all(
        &self,
        mut teams: Vec<Team>,
        session: Option<&mut ClientSession>,
    ) -> Result<Vec<Team>, AppError> {
        if teams.is_empty() {
            return Ok(teams);
        }

        for team in teams.iter_mut().filter(|t| t.id.is_none()) {
            team.id = Some(ObjectId::new());
        }

        let collection = self.collection::<Team>();
        let insert = collection.insert_many(&teams);
        match session {
            Some(session) => insert.session(session).await,
            None => insert.await,
        }
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(teams)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Team>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        let cache_key = self.cache_key(id);

        if let Ok(Some(cached)) = self.redis.get::<Team>(&cache_key).await {
            debug!("캐시 적중: {}", cache_key);
            return Ok(Some(cached));
        }

        let team = self.collection::<Team>()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref team) = team {
            let _ = self.redis
                .set_with_expiry(&cache_key, team, ENTITY_CACHE_TTL_SECONDS)
                .await;
        }

        Ok(team)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Team>, AppError> {
        self.collection::<Team>()
            .find_one(doc! { "name": name })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 이름 오름차순
    pub async fn find_all(&self) -> Result<Vec<Team>, AppError> {
        let mut cursor = self.collection::<Team>()
            .find(doc! {})
            .sort(doc! { "name": 1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let mut teams = Vec::new();
        while let Some(team) = cursor.next().await {
            teams.push(team.map_err(|e| AppError::DatabaseError(e.to_string()))?);
        }

        Ok(teams)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let name_index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("name_unique".to_string())
                .build())
            .build();

        self.collection::<Team>()
            .create_index(name_index)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
