//! # 通知送信
//!
//! メール通知の送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `NotificationSender` trait でメール送信を抽象化
//! - **2 つの実装**: Notify（プロバイダ API 経由、本番用）、Noop（無効化時用）
//! - **資格情報で切替**: プロバイダ API キーが設定されていない環境では
//!   起動時に Noop が選択され、送信は黙ってスキップされる

mod noop;
mod notify;

use async_trait::async_trait;
use licenceflow_domain::notification::{NotificationError, TemplatedEmail};
pub use noop::NoopNotificationSender;
pub use notify::NotifyNotificationSender;

/// メール送信トレイト
///
/// 通知基盤の中核。テンプレートメール送信の具体的な方法を抽象化する。
/// Notify / Noop の 2 実装を API キーの有無で切り替える。
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// テンプレートメールを 1 件送信する
    async fn send_email(&self, email: &TemplatedEmail) -> Result<(), NotificationError>;
}
