//! Noop 通知送信実装
//!
//! メールを実際に送信せず、ログ出力のみ行う。
//! プロバイダ API キーが設定されていない環境（ローカル開発など）で使用する。

use async_trait::async_trait;
use licenceflow_domain::notification::{NotificationError, TemplatedEmail};

use super::NotificationSender;

/// Noop 通知送信（ログ出力のみ）
#[derive(Debug, Clone)]
pub struct NoopNotificationSender;

#[async_trait]
impl NotificationSender for NoopNotificationSender {
    async fn send_email(&self, email: &TemplatedEmail) -> Result<(), NotificationError> {
        tracing::info!(
            to = %email.to,
            "Noop: メール送信をスキップ"
        );
        Ok(())
    }
}
