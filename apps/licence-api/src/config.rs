//! # Licence API 設定
//!
//! 環境変数から Licence API サーバーの設定を読み込む。

use std::env;

/// Licence API サーバーの設定
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// バインドアドレス
    pub host: String,
    /// ポート番号
    pub port: u16,
    /// データベース接続 URL
    pub database_url: String,
    /// 通知設定
    pub notification: NotificationConfig,
}

/// 通知機能の設定
///
/// `NOTIFY_API_KEY` の有無で送信バックエンドを切り替える:
/// - 設定あり: プロバイダ API 経由で送信
/// - 設定なし: 送信しない（ログ出力のみ）。メールを使わない
///   ローカル開発環境を想定した挙動
#[derive(Debug, Clone)]
pub struct NotificationConfig {
    /// プロバイダの API キー（未設定で送信無効）
    pub api_key:  Option<String>,
    /// プロバイダ API のベース URL
    pub base_url: String,
}

impl ApiConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            host: env::var("LICENCE_API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("LICENCE_API_PORT")
                .expect("LICENCE_API_PORT が設定されていません")
                .parse()
                .expect("LICENCE_API_PORT は有効なポート番号である必要があります"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL が設定されていません"),
            notification: NotificationConfig::from_env(),
        })
    }
}

impl NotificationConfig {
    /// 環境変数から通知設定を読み込む
    fn from_env() -> Self {
        Self {
            api_key:  env::var("NOTIFY_API_KEY").ok(),
            base_url: env::var("NOTIFY_BASE_URL")
                .unwrap_or_else(|_| "https://api.notifications.service.gov.uk".to_string()),
        }
    }
}
