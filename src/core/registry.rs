//! # Service Registry - 싱글톤 의존성 주입 컨테이너
//!
//! `#[service]` / `#[repository]` 매크로가 생성한 등록 정보를 `inventory`로 수집하고,
//! `ServiceLocator`를 통해 타입별 싱글톤 인스턴스를 지연 생성합니다.
//! Spring의 `ApplicationContext`가 하던 빈 관리 역할을 이 모듈이 맡습니다.
//!
//! | Spring | 이 모듈 |
//! |--------|---------|
//! | `@Repository` | `#[repository(name = "member", collection = "members")]` |
//! | `@Service` | `#[service(name = "member")]` |
//! | `@Autowired` | `Arc<T>` 필드 자동 주입 |
//! | `registerSingleton()` | `ServiceLocator::set()` |
//!
//! ## 이름 규칙
//!
//! 타입 이름 `MemberRepository` / `MemberService`는 접미사를 떼고 소문자로 바꾼 `member`로,
//! 등록 이름 `member_repository` / `member_service`도 같은 `member`로 정규화되어 매칭됩니다.
//!
//! ```rust,ignore
//! // 인프라 컴포넌트는 직접 등록
//! ServiceLocator::set(Arc::new(Database::new().await?));
//! ServiceLocator::set(Arc::new(RedisClient::new().await?));
//!
//! // 리포지토리 → 서비스 순으로 미리 생성
//! ServiceLocator::initialize_all().await?;
//!
//! let members = ServiceLocator::get::<MemberRepository>();
//! ```

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use async_trait::async_trait;
use log::{debug, error, info};
use once_cell::sync::Lazy;

/// 비즈니스 로직 서비스 공통 인터페이스
///
/// `#[service]` 매크로가 적용된 구조체가 자동 구현합니다.
#[async_trait]
pub trait Service: Send + Sync {
    /// 레지스트리 검색 키로 쓰이는 서비스 이름
    fn name(&self) -> &str;

    /// 인스턴스 생성 직후 호출되는 초기화 훅
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 데이터 액세스 리포지토리 공통 인터페이스
///
/// `#[repository]` 매크로가 적용된 구조체가 자동 구현합니다.
#[async_trait]
pub trait Repository: Send + Sync {
    /// 레지스트리 검색 키로 쓰이는 리포지토리 이름
    fn name(&self) -> &str;

    /// 연결된 MongoDB 컬렉션 이름 (`members`, `teams`)
    fn collection_name(&self) -> &str;

    /// 인덱스 생성 등 데이터 계층 초기화 훅
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// `#[service]` 매크로가 제출하는 등록 정보
pub struct ServiceRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

/// `#[repository]` 매크로가 제출하는 등록 정보
pub struct RepositoryRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

inventory::collect!(ServiceRegistration);
inventory::collect!(RepositoryRegistration);

/// 정규화된 이름 → 서비스 등록 정보
static SERVICE_NAME_CACHE: Lazy<HashMap<String, &'static ServiceRegistration>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<ServiceRegistration>()
        .map(|registration| (normalize_registration_name(registration.name), registration))
        .collect();

    debug!("Service 레지스트리 캐시: {}개 항목", cache.len());
    cache
});

/// 정규화된 이름 → 리포지토리 등록 정보
static REPOSITORY_NAME_CACHE: Lazy<HashMap<String, &'static RepositoryRegistration>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<RepositoryRegistration>()
        .map(|registration| (normalize_registration_name(registration.name), registration))
        .collect();

    debug!("Repository 레지스트리 캐시: {}개 항목", cache.len());
    cache
});

/// `member_service` / `member_repository` → `member`
fn normalize_registration_name(name: &str) -> String {
    name.strip_suffix("_service")
        .or_else(|| name.strip_suffix("_repository"))
        .unwrap_or(name)
        .to_string()
}

/// `member_search_service::repositories::MemberRepository` → `MemberRepository`
fn short_type_name(type_name: &str) -> &str {
    type_name.rsplit("::").next().unwrap_or(type_name)
}

/// 컴포넌트 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ComponentKind {
    Repository,
    Service,
}

/// 타입 이름에서 컴포넌트 종류와 레지스트리 키를 추출합니다.
///
/// `MemberRepository` → `(Repository, "member")`, `TeamService` → `(Service, "team")`
fn classify_type_name(short_name: &str) -> Option<(ComponentKind, String)> {
    if let Some(entity) = short_name.strip_suffix("Repository") {
        return Some((ComponentKind::Repository, entity.to_lowercase()));
    }
    if let Some(entity) = short_name.strip_suffix("Service") {
        return Some((ComponentKind::Service, entity.to_lowercase()));
    }
    None
}

/// 싱글톤 의존성 주입 컨테이너
pub struct ServiceLocator {
    /// `TypeId` 별 생성된 인스턴스
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    /// 생성 중인 타입 (순환 참조 감지용)
    initializing: RwLock<HashSet<TypeId>>,
}

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            initializing: RwLock::new(HashSet::new()),
        }
    }

    /// 타입 `T`의 싱글톤 인스턴스를 반환합니다.
    ///
    /// 캐시에 없으면 등록 정보를 찾아 생성한 뒤 캐싱합니다.
    ///
    /// # Panics
    ///
    /// 순환 참조, 미등록 타입, 타입 불일치는 애플리케이션 구성 오류이므로 즉시 패닉합니다.
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        if let Some(instance) = Self::cached::<T>(type_id) {
            return instance;
        }

        {
            let mut initializing = LOCATOR.initializing.write().unwrap();
            if !initializing.insert(type_id) {
                error!("❌ 순환 참조 감지: {}", type_name);
                panic!("Circular dependency detected: {} is already being initialized", type_name);
            }
        }

        let result = std::panic::catch_unwind(|| Self::create::<T>(type_id, type_name));

        LOCATOR.initializing.write().unwrap().remove(&type_id);

        match result {
            Ok(instance) => instance,
            Err(e) => {
                error!("인스턴스 생성 실패 {}: {:?}", type_name, e);
                panic!("Failed to create instance for {}", type_name);
            }
        }
    }

    fn cached<T: 'static + Send + Sync>(type_id: TypeId) -> Option<Arc<T>> {
        let instances = LOCATOR.instances.read().unwrap();
        instances.get(&type_id).map(|instance| {
            instance.clone()
                .downcast::<T>()
                .expect("Type mismatch in ServiceLocator")
        })
    }

    fn create<T: 'static + Send + Sync>(type_id: TypeId, type_name: &str) -> Arc<T> {
        // 생성자가 의존성을 재귀적으로 요청하므로 쓰기 락을 잡기 전에 생성합니다.
        let short_name = short_type_name(type_name);
        let (kind, key) = classify_type_name(short_name).unwrap_or_else(|| {
            panic!(
                "Service not found: {}. Register it with #[service] / #[repository] or ServiceLocator::set()",
                type_name
            )
        });

        let (registration_name, boxed) = match kind {
            ComponentKind::Repository => {
                let registration = REPOSITORY_NAME_CACHE
                    .get(&key)
                    .unwrap_or_else(|| panic!("No repository found for entity: {}", key));
                (registration.name, (registration.constructor)())
            }
            ComponentKind::Service => {
                let registration = SERVICE_NAME_CACHE
                    .get(&key)
                    .unwrap_or_else(|| panic!("No service found for entity: {}", key));
                (registration.name, (registration.constructor)())
            }
        };

        let instance = match boxed.downcast::<Arc<T>>() {
            Ok(arc_instance) => (*arc_instance).clone(),
            Err(_) => panic!("Type mismatch for {:?}: {}", kind, registration_name),
        };

        let mut instances = LOCATOR.instances.write().unwrap();
        let entry = instances
            .entry(type_id)
            .or_insert_with(|| instance.clone() as Arc<dyn Any + Send + Sync>);

        entry.clone()
            .downcast::<T>()
            .expect("Type mismatch in ServiceLocator")
    }

    /// 매크로로 관리되지 않는 인프라 컴포넌트(Database, RedisClient)를 등록합니다.
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let type_id = TypeId::of::<T>();
        info!("📦 Registering: {}", short_type_name(std::any::type_name::<T>()));

        LOCATOR.instances
            .write()
            .unwrap()
            .insert(type_id, instance as Arc<dyn Any + Send + Sync>);
    }

    /// 등록된 모든 리포지토리와 서비스를 미리 생성합니다.
    ///
    /// 리포지토리를 먼저 만들어야 서비스 생성 시 주입이 캐시에서 해결됩니다.
    pub async fn initialize_all() -> Result<(), Box<dyn std::error::Error>> {
        info!("🔄 서비스 레지스트리 초기화 시작");

        let repositories: Vec<_> = inventory::iter::<RepositoryRegistration>().collect();
        for registration in &repositories {
            let _instance = (registration.constructor)();
            debug!("   ├─ {}: ✓ Created", registration.name);
        }
        info!("✓ Repository 인스턴스 생성 완료 ({}개)", repositories.len());

        let services: Vec<_> = inventory::iter::<ServiceRegistration>().collect();
        for registration in &services {
            let _instance = (registration.constructor)();
            debug!("   ├─ {}: ✓ Created", registration.name);
        }
        info!("✓ Service 인스턴스 생성 완료 ({}개)", services.len());

        info!(
            "🎉 레지스트리 초기화 완료: Repository {}개, Service {}개",
            repositories.len(),
            services.len()
        );

        Ok(())
    }
}

/// 전역 서비스 로케이터
static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);
