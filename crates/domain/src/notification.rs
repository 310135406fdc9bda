//! # 通知
//!
//! 取下げ通知メールに関するドメインモデルを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 |
//! |---|------------|
//! | [`WithdrawalNotification`] | 取下げ通知ペイロード（テンプレート差し込み値） |
//! | [`TemplatedEmail`] | 送信 1 件分のメール（宛先 + 差し込み値） |
//!
//! ## 設計方針
//!
//! - **純粋関数**: ペイロード構築と宛先決定は副作用を持たず、欠損入力を
//!   そのまま欠損フィールドとして伝播する
//! - **宛先の重複排除**: 保有者と申請者が同一人物（同一 ID）の場合は
//!   1 通だけ送る
//! - **プロバイダ形式**: 差し込みキーはテンプレート側の契約であり、
//!   serde の rename で固定する

use serde::Serialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::{
    address::Address,
    contact::{Contact, Email},
    withdrawal::{LicenceId, WithdrawalReason},
};

/// 通知送信エラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// メール送信に失敗
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),

    /// ペイロードの変換に失敗
    #[error("通知ペイロードの変換に失敗: {0}")]
    InvalidPayload(String),
}

/// 取下げ通知ペイロード
///
/// メールテンプレートの差し込み値。リクエスト 1 件ごとに構築し、
/// 永続化しない。保有者・申請者・住所は申請側のデータ状況により
/// 欠損しうるため、欠損は `null` として差し込まれる。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WithdrawalNotification {
    /// ライセンス保有者名
    #[serde(rename = "lhName")]
    pub licence_holder_name: Option<String>,
    /// 代理申請者名
    #[serde(rename = "onBehalfName")]
    pub on_behalf_name: Option<String>,
    /// サイト住所の要約（1 行）
    #[serde(rename = "siteAddress")]
    pub site_address: Option<String>,
    /// ライセンス ID
    #[serde(rename = "id")]
    pub licence_id: LicenceId,
    /// 取下げ理由
    #[serde(rename = "withdrawalReason")]
    pub withdrawal_reason: String,
}

impl WithdrawalNotification {
    /// 解決済みの関連エンティティからペイロードを構築する
    ///
    /// 欠損した入力は対応するフィールドの欠損として伝播するだけで、
    /// 失敗しない。
    pub fn build(
        holder: Option<&Contact>,
        applicant: Option<&Contact>,
        site_address: Option<&Address>,
        licence_id: LicenceId,
        reason: &WithdrawalReason,
    ) -> Self {
        Self {
            licence_holder_name: holder.map(|c| c.name().to_string()),
            on_behalf_name: applicant.map(|c| c.name().to_string()),
            site_address: site_address.map(Address::summary),
            licence_id,
            withdrawal_reason: reason.as_str().to_string(),
        }
    }

    /// プロバイダに渡す差し込みマップへ変換する
    pub fn personalisation(&self) -> Result<JsonValue, NotificationError> {
        serde_json::to_value(self).map_err(|e| NotificationError::InvalidPayload(e.to_string()))
    }
}

/// 送信 1 件分のメール
///
/// ペイロード構築の出力。`NotificationSender` に渡される。
/// テンプレート ID と返信先 ID は送信側の設定定数であり、ここには持たない。
#[derive(Debug, Clone)]
pub struct TemplatedEmail {
    /// 送信先メールアドレス
    pub to:              Email,
    /// テンプレート差し込み値
    pub personalisation: JsonValue,
}

/// 通知メールの宛先を決定する
///
/// - 保有者と申請者が同一 ID の場合: 保有者のアドレスに 1 通だけ
/// - それ以外: 保有者・申請者それぞれのアドレスが存在する分だけ
///
/// アドレスを持たない連絡先は宛先にならない。0〜2 件を返す。
pub fn notification_recipients(
    holder: Option<&Contact>,
    applicant: Option<&Contact>,
) -> Vec<Email> {
    if let (Some(holder), Some(applicant)) = (holder, applicant)
        && holder.id() == applicant.id()
    {
        return holder.email_address().cloned().into_iter().collect();
    }

    holder
        .and_then(Contact::email_address)
        .into_iter()
        .chain(applicant.and_then(Contact::email_address))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{address::AddressId, contact::ContactId};

    fn make_contact(id: i32, name: &str, email: Option<&str>) -> Contact {
        Contact::from_db(
            ContactId::new(id),
            name.to_string(),
            email.map(|e| Email::new(e).unwrap()),
        )
    }

    fn make_address() -> Address {
        Address::from_db(
            AddressId::new(5),
            Some("1 High Street".to_string()),
            None,
            Some("Taunton".to_string()),
            None,
            Some("TA1 1AA".to_string()),
        )
    }

    fn recipient_strings(holder: Option<&Contact>, applicant: Option<&Contact>) -> Vec<String> {
        notification_recipients(holder, applicant)
            .into_iter()
            .map(Email::into_string)
            .collect()
    }

    #[test]
    fn ペイロードは解決済みエンティティの値を写し取る() {
        let holder = make_contact(1, "Holder Name", Some("h@x.com"));
        let applicant = make_contact(2, "Applicant Name", Some("a2@x.com"));
        let address = make_address();
        let reason = WithdrawalReason::new("no-longer-needed").unwrap();

        let payload = WithdrawalNotification::build(
            Some(&holder),
            Some(&applicant),
            Some(&address),
            LicenceId::new(42),
            &reason,
        );

        assert_eq!(payload.licence_holder_name.as_deref(), Some("Holder Name"));
        assert_eq!(payload.on_behalf_name.as_deref(), Some("Applicant Name"));
        assert_eq!(
            payload.site_address.as_deref(),
            Some("1 High Street, Taunton, TA1 1AA")
        );
        assert_eq!(payload.licence_id, LicenceId::new(42));
        assert_eq!(payload.withdrawal_reason, "no-longer-needed");
    }

    #[test]
    fn ペイロードは欠損入力を欠損フィールドとして伝播する() {
        let reason = WithdrawalReason::new("duplicate application").unwrap();
        let payload =
            WithdrawalNotification::build(None, None, None, LicenceId::new(7), &reason);

        assert_eq!(payload.licence_holder_name, None);
        assert_eq!(payload.on_behalf_name, None);
        assert_eq!(payload.site_address, None);
        assert_eq!(payload.licence_id, LicenceId::new(7));
    }

    #[test]
    fn 差し込みマップはテンプレートのキー名を使う() {
        let holder = make_contact(1, "Holder Name", Some("h@x.com"));
        let reason = WithdrawalReason::new("no-longer-needed").unwrap();
        let payload = WithdrawalNotification::build(
            Some(&holder),
            None,
            None,
            LicenceId::new(42),
            &reason,
        );

        let personalisation = payload.personalisation().unwrap();
        assert_eq!(
            personalisation,
            serde_json::json!({
                "lhName": "Holder Name",
                "onBehalfName": null,
                "siteAddress": null,
                "id": 42,
                "withdrawalReason": "no-longer-needed",
            })
        );
    }

    #[test]
    fn 保有者と申請者が同一idなら宛先は保有者の1件のみ() {
        let holder = make_contact(1, "Same Person", Some("h@x.com"));
        let applicant = make_contact(1, "Same Person", Some("h@x.com"));

        assert_eq!(
            recipient_strings(Some(&holder), Some(&applicant)),
            vec!["h@x.com"]
        );
    }

    #[test]
    fn 保有者と申請者が異なれば両方の宛先になる() {
        let holder = make_contact(1, "Holder", Some("h@x.com"));
        let applicant = make_contact(2, "Applicant", Some("a2@x.com"));

        assert_eq!(
            recipient_strings(Some(&holder), Some(&applicant)),
            vec!["h@x.com", "a2@x.com"]
        );
    }

    #[test]
    fn アドレスを持たない連絡先は宛先にならない() {
        let holder = make_contact(1, "Holder", None);
        let applicant = make_contact(2, "Applicant", Some("a2@x.com"));

        assert_eq!(
            recipient_strings(Some(&holder), Some(&applicant)),
            vec!["a2@x.com"]
        );
    }

    #[test]
    fn 同一idでもアドレスがなければ宛先は0件() {
        let holder = make_contact(1, "Same Person", None);
        let applicant = make_contact(1, "Same Person", None);

        assert!(recipient_strings(Some(&holder), Some(&applicant)).is_empty());
    }

    #[test]
    fn 連絡先が両方とも欠損なら宛先は0件() {
        assert!(recipient_strings(None, None).is_empty());
    }

    #[test]
    fn 申請者だけが解決された場合は申請者の宛先になる() {
        let applicant = make_contact(2, "Applicant", Some("a2@x.com"));

        assert_eq!(recipient_strings(None, Some(&applicant)), vec!["a2@x.com"]);
    }
}
