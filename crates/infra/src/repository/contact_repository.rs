//! # ContactRepository
//!
//! 連絡先（ライセンス保有者・申請者）の参照を担当するリポジトリ。

use async_trait::async_trait;
use licenceflow_domain::contact::{Contact, ContactId, Email};
use sqlx::{PgPool, Row as _};

use crate::error::InfraError;

/// 連絡先リポジトリトレイト
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// ID で連絡先を取得する
    ///
    /// 見つからない場合は `Ok(None)` を返す。
    async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>, InfraError>;
}

/// PostgreSQL 実装の ContactRepository
#[derive(Debug, Clone)]
pub struct PostgresContactRepository {
    pool: PgPool,
}

impl PostgresContactRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactRepository for PostgresContactRepository {
    async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>, InfraError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email_address
            FROM contacts
            WHERE id = $1
            "#,
        )
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        // 格納値が空文字列や不正な形式の場合は「アドレスなし」として扱う。
        // 不在の連絡先アドレスは正常な状態（通知の宛先にならないだけ）。
        let email_address = row
            .try_get::<Option<String>, _>("email_address")?
            .and_then(|raw| match Email::new(raw) {
                Ok(email) => Some(email),
                Err(e) => {
                    tracing::warn!(contact_id = %id, error = %e, "不正な格納メールアドレスを無視");
                    None
                }
            });

        Ok(Some(Contact::from_db(
            ContactId::new(row.try_get("id")?),
            row.try_get("name")?,
            email_address,
        )))
    }
}
