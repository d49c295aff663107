//! # 회원 리포지토리
//!
//! `members` 컬렉션의 저장, 단건 캐시 조회, 동적 조건 검색, 페이징, 벌크 연산, 집계를 담당합니다.
//!
//! 검색은 모두 `teams`와 left join 한 뒤 [`MemberTeamDto`]로 평평하게 만들어 반환합니다.
//!
//! | 메서드 | 조건 조립 방식 |
//! |--------|----------------|
//! | [`MemberRepository::search_by_builder`] | `build_filter` 한 번 |
//! | [`MemberRepository::search_by_where_param`] | `build_filter_clauses`를 AND로 접기 |
//! | [`MemberRepository::search_page_simple`] | `$facet`으로 내용 + 전체 개수 한 번에 |
//! | [`MemberRepository::search_page_complex`] | 내용 먼저, count는 필요할 때만 |
//!
//! 벌크 연산은 캐시를 거치지 않고 컬렉션을 직접 수정하므로,
//! 끝난 뒤 `member:*` 캐시를 모두 비워 오래된 단건 캐시가 남지 않게 합니다.

use std::sync::Arc;
use futures_util::StreamExt;
use log::{debug, warn};
use mongodb::{
    ClientSession, IndexModel,
    bson::{self, Document, doc, oid::ObjectId},
    options::IndexOptions,
};
use serde::Deserialize;
use singleton_macro::repository;
use crate::{
    caching::redis::{ENTITY_CACHE_TTL_SECONDS, RedisClient},
    core::{errors::{AppError, ErrorContext}, registry::Repository},
    db::Database,
    domain::{
        dto::members::{
            request::MemberSearchCondition,
            response::{MemberAgeStats, MemberTeamDto, MemberTeamRow, TeamAgeStats},
        },
        entities::members::member::Member,
    },
    query::{
        member_filter::{build_filter, build_filter_clauses, fields},
        pageable::{Page, Pageable, SortOrder, resolve_total},
        pipeline,
        predicate::Predicate,
    },
};

/// `$facet` 페이지 조회 결과
#[derive(Debug, Deserialize)]
struct FacetPage {
    #[serde(default)]
    content: Vec<MemberTeamRow>,
    #[serde(default)]
    count: Vec<CountRow>,
}

#[derive(Debug, Deserialize)]
struct CountRow {
    count: i64,
}

#[repository(name = "member", collection = "members")]
pub struct MemberRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl MemberRepository {
    pub async fn save(&self, mut member: Member) -> Result<Member, AppError> {
        let result = self.collection::<Member>()
            .insert_one(&member)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        member.id = result.inserted_id.as_object_id();
        debug!("회원 저장: {} ({:?})", member.username, member.id);
        Ok(member)
    }

    /// 여러 회원을 한 번에 저장합니다. id는 저장 전에 미리 할당합니다.
    ///
    /// `session`이 있으면 해당 트랜잭션 안에서 실행됩니다.
    pub async fn save_all(
        &self,
        mut members: Vec<Member>,
        session: Option<&mut ClientSession>,
    ) -> Result<Vec<Member>, AppError> {
        if members.is_empty() {
            return Ok(members);
        }

        for member in members.iter_mut().filter(|m| m.id.is_none()) {
            member.id = Some(ObjectId::new());
        }

        let collection = self.collection::<Member>();
        let insert = collection.insert_many(&members);
        match session {
            Some(session) => insert.session(session).await,
            None => insert.await,
        }
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        debug!("회원 {}명 일괄 저장", members.len());
        Ok(members)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Member>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        let cache_key = self.cache_key(id);

        if let Ok(Some(cached)) = self.redis.get::<Member>(&cache_key).await {
            debug!("캐시 적중: {}", cache_key);
            return Ok(Some(cached));
        }

        let member = self.collection::<Member>()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref member) = member {
            let _ = self.redis
                .set_with_expiry(&cache_key, member, ENTITY_CACHE_TTL_SECONDS)
                .await;
        }

        Ok(member)
    }

    pub async fn find_all(&self) -> Result<Vec<Member>, AppError> {
        self.find_members(doc! {}).await
    }

    pub async fn find_all_by_username(&self, username: &str) -> Result<Vec<Member>, AppError> {
        self.find_members(Predicate::eq(fields::USERNAME, username).to_document()).await
    }

    pub async fn count_all(&self) -> Result<u64, AppError> {
        self.collection::<Member>()
            .count_documents(doc! {})
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 빌더 방식: 조건을 하나로 완성해 한 번에 넘깁니다.
    pub async fn search_by_builder(&self, condition: &MemberSearchCondition) -> Result<Vec<MemberTeamDto>, AppError> {
        let predicate = build_filter(condition);
        self.aggregate_member_teams(pipeline::member_team_pipeline(&predicate, &[])).await
    }

    /// where 파라미터 방식: 필드별 조건을 AND로 접습니다. 결과는 빌더 방식과 같습니다.
    pub async fn search_by_where_param(&self, condition: &MemberSearchCondition) -> Result<Vec<MemberTeamDto>, AppError> {
        let predicate = Predicate::all(build_filter_clauses(condition));
        self.aggregate_member_teams(pipeline::member_team_pipeline(&predicate, &[])).await
    }

    /// 정렬을 지정한 목록 검색. 정렬이 없으면 `member_id` 오름차순입니다.
    pub async fn search(
        &self,
        condition: &MemberSearchCondition,
        sort: &[SortOrder],
    ) -> Result<Vec<MemberTeamDto>, AppError> {
        let predicate = Predicate::all(build_filter_clauses(condition));
        self.aggregate_member_teams(pipeline::member_team_pipeline(&predicate, sort)).await
    }

    /// 내용과 전체 개수를 `$facet` 한 번으로 조회합니다.
    pub async fn search_page_simple(
        &self,
        condition: &MemberSearchCondition,
        pageable: &Pageable,
    ) -> Result<Page<MemberTeamDto>, AppError> {
        let predicate = build_filter(condition);
        let stages = pipeline::member_team_facet_pipeline(&predicate, pageable);
        debug!("search_page_simple pipeline: {:?}", stages);

        let facet = match self.aggregate_documents(stages).await?.into_iter().next() {
            Some(document) => bson::from_document::<FacetPage>(document)
                .context("페이지 결과 변환 실패")?,
            None => FacetPage { content: Vec::new(), count: Vec::new() },
        };

        let total = facet.count.first().map(|row| row.count.max(0) as u64).unwrap_or(0);
        let content = facet.content.into_iter().map(MemberTeamDto::from).collect();

        Ok(Page::new(content, pageable, total))
    }

    /// 내용을 먼저 조회하고, 내용만으로 전체 개수를 알 수 없을 때만 count 쿼리를 실행합니다.
    pub async fn search_page_complex(
        &self,
        condition: &MemberSearchCondition,
        pageable: &Pageable,
    ) -> Result<Page<MemberTeamDto>, AppError> {
        let predicate = build_filter(condition);
        let content = self
            .aggregate_member_teams(pipeline::member_team_page_pipeline(&predicate, pageable))
            .await?;

        let total = match resolve_total(pageable, content.len() as u64) {
            Some(total) => {
                debug!("count 쿼리 생략: total={}", total);
                total
            }
            None => self.count(&predicate).await?,
        };

        Ok(Page::new(content, pageable, total))
    }

    /// 조건에 맞는 회원-팀 조인 행 개수
    pub async fn count(&self, predicate: &Predicate) -> Result<u64, AppError> {
        let documents = self.aggregate_documents(pipeline::count_pipeline(predicate)).await?;

        let count = match documents.into_iter().next() {
            Some(document) => bson::from_document::<CountRow>(document)
                .context("개수 결과 변환 실패")?
                .count,
            None => 0,
        };

        Ok(count.max(0) as u64)
    }

    /// `age < age`인 회원의 이름을 일괄 변경하고 대상 회원 수를 반환합니다.
    pub async fn bulk_rename_younger_than(&self, age: i32, new_name: &str) -> Result<u64, AppError> {
        let result = self.collection::<Member>()
            .update_many(
                Predicate::lt(fields::AGE, age).to_document(),
                doc! { "$set": { "username": new_name } },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        self.evict_member_cache().await;
        Ok(result.matched_count)
    }

    /// 모든 회원의 나이에 `delta`를 더합니다.
    pub async fn bulk_add_age(&self, delta: i32) -> Result<u64, AppError> {
        let result = self.collection::<Member>()
            .update_many(Predicate::Always.to_document(), doc! { "$inc": { "age": delta } })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        self.evict_member_cache().await;
        Ok(result.matched_count)
    }

    /// `age > age`인 회원을 일괄 삭제합니다.
    pub async fn bulk_delete_older_than(&self, age: i32) -> Result<u64, AppError> {
        let result = self.collection::<Member>()
            .delete_many(Predicate::gt(fields::AGE, age).to_document())
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        self.evict_member_cache().await;
        Ok(result.deleted_count)
    }

    /// 회원이 없으면 모든 값이 0인 통계를 반환합니다.
    pub async fn age_statistics(&self) -> Result<MemberAgeStats, AppError> {
        let documents = self.aggregate_documents(pipeline::age_statistics_pipeline()).await?;

        match documents.into_iter().next() {
            Some(document) => bson::from_document(document)
                .context("통계 결과 변환 실패"),
            None => Ok(MemberAgeStats::default()),
        }
    }

    /// 팀이 있는 회원만 대상으로 팀 이름별 평균 나이를 구합니다.
    pub async fn team_age_statistics(&self) -> Result<Vec<TeamAgeStats>, AppError> {
        self.aggregate_documents(pipeline::team_age_statistics_pipeline())
            .await?
            .into_iter()
            .map(|document| {
                bson::from_document(document)
                    .context("팀 통계 결과 변환 실패")
            })
            .collect()
    }

    /// 나이가 가장 많은 회원들 (`age == max(age)`)
    pub async fn find_oldest(&self) -> Result<Vec<MemberTeamDto>, AppError> {
        let stats = self.age_statistics().await?;
        if stats.count == 0 {
            return Ok(Vec::new());
        }

        let predicate = Predicate::eq(fields::AGE, stats.max_age);
        self.aggregate_member_teams(pipeline::member_team_pipeline(&predicate, &[])).await
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let team_index = IndexModel::builder()
            .keys(doc! { "team_id": 1 })
            .options(IndexOptions::builder().name("team_id".to_string()).build())
            .build();

        let age_index = IndexModel::builder()
            .keys(doc! { "age": 1 })
            .options(IndexOptions::builder().name("age".to_string()).build())
            .build();

        self.collection::<Member>()
            .create_indexes([team_index, age_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_members(&self, filter: Document) -> Result<Vec<Member>, AppError> {
        let mut cursor = self.collection::<Member>()
            .find(filter)
            .sort(doc! { "_id": 1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let mut members = Vec::new();
        while let Some(member) = cursor.next().await {
            members.push(member.map_err(|e| AppError::DatabaseError(e.to_string()))?);
        }

        Ok(members)
    }

    async fn aggregate_documents(&self, stages: Vec<Document>) -> Result<Vec<Document>, AppError> {
        let mut cursor = self.collection::<Member>()
            .aggregate(stages)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let mut documents = Vec::new();
        while let Some(document) = cursor.next().await {
            documents.push(document.map_err(|e| AppError::DatabaseError(e.to_string()))?);
        }

        Ok(documents)
    }

    async fn aggregate_member_teams(&self, stages: Vec<Document>) -> Result<Vec<MemberTeamDto>, AppError> {
        debug!("member-team pipeline: {:?}", stages);

        self.aggregate_documents(stages)
            .await?
            .into_iter()
            .map(|document| {
                bson::from_document::<MemberTeamRow>(document)
                    .map(MemberTeamDto::from)
                    .context("조회 결과 변환 실패")
            })
            .collect()
    }

    /// 벌크 연산 후 `member:*` 단건 캐시를 모두 비웁니다. 실패해도 연산 결과에는 영향이 없습니다.
    async fn evict_member_cache(&self) {
        let pattern = format!("{}:*", self.name());
        match self.invalidate_pattern_cache(&pattern).await {
            Ok(()) => debug!("🧹 캐시 무효화: {}", pattern),
            Err(e) => warn!("⚠️ 회원 캐시 무효화 실패 ({}): {}", pattern, e),
        }
    }
}
