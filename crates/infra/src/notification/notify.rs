//! Notify 通知送信実装
//!
//! 外部のテンプレートメールプロバイダの REST API を呼び出して
//! メールを送信する。本番環境で使用する。

use async_trait::async_trait;
use licenceflow_domain::notification::{NotificationError, TemplatedEmail};

use super::NotificationSender;

/// 取下げ通知メールのテンプレート ID
///
/// プロバイダ側で管理されるテンプレートを指す。差し込みキーは
/// `WithdrawalNotification` のシリアライズ形と一致している必要がある。
const WITHDRAWAL_TEMPLATE_ID: &str = "ce6c7959-08b7-4694-a162-fac62667c942";

/// 返信先メールアドレスの ID
///
/// プロバイダ側に登録済みの返信先設定を指す。
const EMAIL_REPLY_TO_ID: &str = "4b49467e-2a35-4713-9d92-809c55bf1cdd";

/// Notify 通知送信
///
/// `reqwest::Client` をラップし、プロバイダの
/// 「テンプレートメール送信」エンドポイントを呼び出す。
pub struct NotifyNotificationSender {
    client:   reqwest::Client,
    api_key:  String,
    base_url: String,
}

impl NotifyNotificationSender {
    /// 新しい Notify 送信インスタンスを作成
    ///
    /// # 引数
    ///
    /// - `api_key`: プロバイダの API キー
    /// - `base_url`: プロバイダ API のベース URL（末尾スラッシュなし）
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url,
        }
    }
}

#[async_trait]
impl NotificationSender for NotifyNotificationSender {
    async fn send_email(&self, email: &TemplatedEmail) -> Result<(), NotificationError> {
        let body = serde_json::json!({
            "email_address":     email.to.as_str(),
            "template_id":       WITHDRAWAL_TEMPLATE_ID,
            "personalisation":   email.personalisation,
            "email_reply_to_id": EMAIL_REPLY_TO_ID,
        });

        let response = self
            .client
            .post(format!("{}/v2/notifications/email", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| NotificationError::SendFailed(format!("プロバイダ呼び出し失敗: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(NotificationError::SendFailed(format!(
                "プロバイダ応答エラー: {status}: {detail}"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NotifyNotificationSender>();
    }
}
