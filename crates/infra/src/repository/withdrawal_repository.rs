//! # WithdrawalRepository
//!
//! 取下げレコードの永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **書き込みはトランザクション必須**: `insert` は [`TxContext`] を
//!   要求し、トランザクション外の書き込みをコンパイルエラーにする
//! - **ID と作成時刻は DB 採番**: `RETURNING` で確定値を受け取る

use async_trait::async_trait;
use licenceflow_domain::withdrawal::{
    LicenceId,
    NewWithdrawal,
    Withdrawal,
    WithdrawalId,
    WithdrawalReason,
};
use sqlx::{PgPool, Row as _, postgres::PgRow};

use crate::{db::TxContext, error::InfraError};

/// 取下げリポジトリトレイト
#[async_trait]
pub trait WithdrawalRepository: Send + Sync {
    /// 取下げを挿入し、永続化されたレコードを返す
    ///
    /// INSERT はトランザクションのコネクション上で実行される。
    /// コミットは呼び出し側の責務。
    async fn insert(
        &self,
        tx: &mut TxContext,
        new: &NewWithdrawal,
    ) -> Result<Withdrawal, InfraError>;

    /// ID で取下げを取得する
    ///
    /// 見つからない場合は `Ok(None)` を返す。
    async fn find_by_id(&self, id: WithdrawalId) -> Result<Option<Withdrawal>, InfraError>;

    /// すべての取下げを取得する
    async fn find_all(&self) -> Result<Vec<Withdrawal>, InfraError>;
}

/// PostgreSQL 実装の WithdrawalRepository
#[derive(Debug, Clone)]
pub struct PostgresWithdrawalRepository {
    pool: PgPool,
}

impl PostgresWithdrawalRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn withdrawal_from_row(row: &PgRow) -> Result<Withdrawal, InfraError> {
    let reason = WithdrawalReason::new(row.try_get::<String, _>("reason")?)
        .map_err(|e| InfraError::invalid_data(e.to_string()))?;

    Ok(Withdrawal::from_db(
        WithdrawalId::new(row.try_get("id")?),
        LicenceId::new(row.try_get("licence_id")?),
        reason,
        row.try_get("created_at")?,
    ))
}

#[async_trait]
impl WithdrawalRepository for PostgresWithdrawalRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(
        &self,
        tx: &mut TxContext,
        new: &NewWithdrawal,
    ) -> Result<Withdrawal, InfraError> {
        let row = sqlx::query(
            r#"
            INSERT INTO withdrawals (licence_id, reason)
            VALUES ($1, $2)
            RETURNING id, licence_id, reason, created_at
            "#,
        )
        .bind(new.licence_id.as_i32())
        .bind(new.reason.as_str())
        .fetch_one(tx.conn())
        .await?;

        withdrawal_from_row(&row)
    }

    async fn find_by_id(&self, id: WithdrawalId) -> Result<Option<Withdrawal>, InfraError> {
        let row = sqlx::query(
            r#"
            SELECT id, licence_id, reason, created_at
            FROM withdrawals
            WHERE id = $1
            "#,
        )
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(withdrawal_from_row).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Withdrawal>, InfraError> {
        let rows = sqlx::query(
            r#"
            SELECT id, licence_id, reason, created_at
            FROM withdrawals
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(withdrawal_from_row).collect()
    }
}
