//! Database Connection Management Module
//!
//! MongoDB 연결과 명시적 트랜잭션 경계를 관리합니다.
//!
//! 선언적 `@Transactional` 대신 호출자가 세션을 직접 열고
//! 성공 시 `commit_transaction`, 실패 시 `abort_transaction`을 호출합니다.
//! 커밋되지 않은 세션이 드롭되면 드라이버가 트랜잭션을 중단합니다.
//!
//! ```rust,ignore
//! let mut session = database.start_transaction().await?;
//! match insert_everything(&mut session).await {
//!     Ok(_) => session.commit_transaction().await?,
//!     Err(e) => {
//!         let _ = session.abort_transaction().await;
//!         return Err(e);
//!     }
//! }
//! ```

use mongodb::{Client, ClientSession, options::ClientOptions};
use log::info;
use crate::config::DatabaseConfig;

/// MongoDB 데이터베이스 연결 래퍼
///
/// `ServiceLocator::set()`으로 등록되어 리포지토리와 서비스에 `Arc<Database>`로 주입됩니다.
#[derive(Clone)]
pub struct Database {
    client: Client,
    database_name: String,
}

impl Database {
    /// `MONGODB_URI` / `DATABASE_NAME` 설정으로 연결하고 `ping`으로 검증합니다.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let mongodb_uri = DatabaseConfig::uri();
        let database_name = DatabaseConfig::name();

        let mut client_options = ClientOptions::parse(&mongodb_uri).await?;
        client_options.app_name = Some("member_search".to_string());

        let client = Client::with_options(client_options)?;

        client
            .database(&database_name)
            .run_command(mongodb::bson::doc! { "ping": 1 })
            .await?;

        info!("✅ MongoDB 연결 성공: {}", database_name);

        Ok(Self {
            client,
            database_name,
        })
    }

    /// 컬렉션 접근용 `mongodb::Database`
    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    /// 새 세션을 열고 트랜잭션을 시작합니다.
    ///
    /// 반환된 세션의 커밋/중단 책임은 호출자에게 있습니다.
    pub async fn start_transaction(&self) -> Result<ClientSession, mongodb::error::Error> {
        let mut session = self.client.start_session().await?;
        session.start_transaction().await?;
        Ok(session)
    }
}
