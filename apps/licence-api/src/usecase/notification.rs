//! # 通知サービス
//!
//! 取下げ通知メールの組み立てと送信を統合するサービス。
//!
//! ## 設計方針
//!
//! - **依存性注入**: `NotificationSender` は trait で抽象化
//! - **送信失敗は伝播**: 送信エラーをここで握りつぶさず呼び出し側へ
//!   返す。取下げの永続化は既にコミット済みのため、失敗しても
//!   レコードは残る

use std::sync::Arc;

use licenceflow_domain::{
    contact::Email,
    notification::{NotificationError, TemplatedEmail, WithdrawalNotification},
};
use licenceflow_infra::notification::NotificationSender;

/// 通知サービス
///
/// ペイロードを宛先ごとの [`TemplatedEmail`] に変換し、順番に送信する。
pub struct NotificationService {
    sender: Arc<dyn NotificationSender>,
}

impl NotificationService {
    pub fn new(sender: Arc<dyn NotificationSender>) -> Self {
        Self { sender }
    }

    /// 取下げ通知メールを各宛先へ送信する
    ///
    /// 宛先が 0 件ならなにもしない。最初の送信失敗で中断し、
    /// エラーを返す。
    pub async fn send_withdrawal_emails(
        &self,
        payload: &WithdrawalNotification,
        recipients: &[Email],
    ) -> Result<(), NotificationError> {
        if recipients.is_empty() {
            tracing::info!(licence_id = %payload.licence_id, "通知宛先なし、送信をスキップ");
            return Ok(());
        }

        let personalisation = payload.personalisation()?;

        for to in recipients {
            let email = TemplatedEmail {
                to:              to.clone(),
                personalisation: personalisation.clone(),
            };
            self.sender.send_email(&email).await?;
            tracing::info!(
                to = %to,
                licence_id = %payload.licence_id,
                "取下げ通知メールを送信"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use licenceflow_domain::withdrawal::{LicenceId, WithdrawalReason};
    use licenceflow_infra::mock::MockNotificationSender;
    use pretty_assertions::assert_eq;

    use super::*;

    fn make_payload() -> WithdrawalNotification {
        WithdrawalNotification::build(
            None,
            None,
            None,
            LicenceId::new(42),
            &WithdrawalReason::new("no-longer-needed").unwrap(),
        )
    }

    #[tokio::test]
    async fn 宛先ごとに1通ずつ送信する() {
        let sender = MockNotificationSender::new();
        let service = NotificationService::new(Arc::new(sender.clone()));

        let recipients = vec![
            Email::new("h@x.com").unwrap(),
            Email::new("a2@x.com").unwrap(),
        ];
        service
            .send_withdrawal_emails(&make_payload(), &recipients)
            .await
            .unwrap();

        let sent = sender.sent_emails();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to.as_str(), "h@x.com");
        assert_eq!(sent[1].to.as_str(), "a2@x.com");
        assert_eq!(sent[0].personalisation, sent[1].personalisation);
    }

    #[tokio::test]
    async fn 宛先が0件なら送信しない() {
        let sender = MockNotificationSender::new();
        let service = NotificationService::new(Arc::new(sender.clone()));

        service
            .send_withdrawal_emails(&make_payload(), &[])
            .await
            .unwrap();

        assert!(sender.sent_emails().is_empty());
    }

    #[tokio::test]
    async fn 送信失敗はエラーとして返す() {
        let sender = MockNotificationSender::failing("接続失敗");
        let service = NotificationService::new(Arc::new(sender));

        let recipients = vec![Email::new("h@x.com").unwrap()];
        let result = service
            .send_withdrawal_emails(&make_payload(), &recipients)
            .await;

        assert!(matches!(result, Err(NotificationError::SendFailed(_))));
    }
}
