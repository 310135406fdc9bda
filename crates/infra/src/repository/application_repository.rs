//! # ApplicationRepository
//!
//! 申請（ライセンス申請）の参照を担当するリポジトリ。
//!
//! 申請の作成・更新は申請管理側のシステムが行うため、参照のみを提供する。

use async_trait::async_trait;
use licenceflow_domain::{
    address::AddressId,
    application::Application,
    contact::ContactId,
    withdrawal::LicenceId,
};
use sqlx::{PgPool, Row as _};

use crate::error::InfraError;

/// 申請リポジトリトレイト
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// ライセンス ID で申請を取得する
    ///
    /// 見つからない場合は `Ok(None)` を返す。取下げ対象の申請が既に
    /// 削除されていることは正常な状態として扱う。
    async fn find_by_id(&self, id: LicenceId) -> Result<Option<Application>, InfraError>;
}

/// PostgreSQL 実装の ApplicationRepository
#[derive(Debug, Clone)]
pub struct PostgresApplicationRepository {
    pool: PgPool,
}

impl PostgresApplicationRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicationRepository for PostgresApplicationRepository {
    async fn find_by_id(&self, id: LicenceId) -> Result<Option<Application>, InfraError> {
        let row = sqlx::query(
            r#"
            SELECT id, site_address_id, licence_holder_id, licence_applicant_id
            FROM applications
            WHERE id = $1
            "#,
        )
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(Application::from_db(
            LicenceId::new(row.try_get("id")?),
            row.try_get::<Option<i32>, _>("site_address_id")?
                .map(AddressId::new),
            row.try_get::<Option<i32>, _>("licence_holder_id")?
                .map(ContactId::new),
            row.try_get::<Option<i32>, _>("licence_applicant_id")?
                .map(ContactId::new),
        )))
    }
}
