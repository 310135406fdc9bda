//! # AddressRepository
//!
//! サイト住所の参照を担当するリポジトリ。

use async_trait::async_trait;
use licenceflow_domain::address::{Address, AddressId};
use sqlx::{PgPool, Row as _};

use crate::error::InfraError;

/// 住所リポジトリトレイト
#[async_trait]
pub trait AddressRepository: Send + Sync {
    /// ID で住所を取得する
    ///
    /// 見つからない場合は `Ok(None)` を返す。
    async fn find_by_id(&self, id: AddressId) -> Result<Option<Address>, InfraError>;
}

/// PostgreSQL 実装の AddressRepository
#[derive(Debug, Clone)]
pub struct PostgresAddressRepository {
    pool: PgPool,
}

impl PostgresAddressRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AddressRepository for PostgresAddressRepository {
    async fn find_by_id(&self, id: AddressId) -> Result<Option<Address>, InfraError> {
        let row = sqlx::query(
            r#"
            SELECT id, address_line_1, address_line_2, town, county, postcode
            FROM addresses
            WHERE id = $1
            "#,
        )
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(Address::from_db(
            AddressId::new(row.try_get("id")?),
            row.try_get("address_line_1")?,
            row.try_get("address_line_2")?,
            row.try_get("town")?,
            row.try_get("county")?,
            row.try_get("postcode")?,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PostgresAddressRepository>();
    }
}
