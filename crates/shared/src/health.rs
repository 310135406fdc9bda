//! # ヘルスチェックレスポンス
//!
//! `GET /health` が返す共通レスポンス型。

use serde::{Deserialize, Serialize};

/// ヘルスチェックレスポンス
///
/// ロードバランサーやコンテナオーケストレーターの死活監視に使用する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// 稼働状態（`"healthy"` または `"unhealthy"`）
    pub status:  String,
    /// アプリケーションバージョン（Cargo.toml から取得）
    pub version: String,
}

impl HealthResponse {
    /// 稼働中を表すレスポンスを作成する
    pub fn healthy(version: impl Into<String>) -> Self {
        Self {
            status:  "healthy".to_string(),
            version: version.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_healthyはstatusにhealthyを設定する() {
        let response = HealthResponse::healthy("0.1.0");

        assert_eq!(response.status, "healthy");
        assert_eq!(response.version, "0.1.0");
    }
}
