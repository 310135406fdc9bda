//! # 連絡先
//!
//! ライセンス保有者・申請者として申請に紐づく連絡先エンティティ。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 |
//! |---|------------|
//! | [`Contact`] | 連絡先（ライセンス保有者または申請者） |
//! | [`Email`] | メールアドレス（値オブジェクト） |
//!
//! ## 設計方針
//!
//! - **Newtype パターン**: ContactId は i32 をラップし、型安全性を確保
//! - **メールアドレスは任意**: 連絡先がメールアドレスを持たないことは
//!   正常な状態であり、その場合は通知の宛先にならないだけ

use serde::{Deserialize, Serialize};

use crate::DomainError;

define_record_id! {
    /// 連絡先 ID（一意識別子）
    ///
    /// contacts テーブルの主キー。
    pub struct ContactId;
}

/// メールアドレス（値オブジェクト）
///
/// 生成時にバリデーションを実行し、不正な値の作成を防ぐ。
/// これにより「空文字列の宛先」が通知処理に流れ込むことはない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// メールアドレスを作成する
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - `local@domain` の形式である
    /// - 最大 255 文字
    ///
    /// # エラー
    ///
    /// バリデーションに失敗した場合は `DomainError::Validation` を返す。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().trim().to_string();

        if value.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスは必須です".to_string(),
            ));
        }

        let Some((local, domain)) = value.split_once('@') else {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        };

        if local.is_empty() || domain.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        }

        if value.chars().count() > 255 {
            return Err(DomainError::Validation(
                "メールアドレスは 255 文字以内である必要があります".to_string(),
            ));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 連絡先エンティティ
///
/// 申請管理側のシステムが作成するため、このサービスでは読み取り専用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    id:            ContactId,
    name:          String,
    email_address: Option<Email>,
}

impl Contact {
    /// データベースの行から連絡先を復元する
    pub fn from_db(id: ContactId, name: String, email_address: Option<Email>) -> Self {
        Self {
            id,
            name,
            email_address,
        }
    }

    pub fn id(&self) -> ContactId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email_address(&self) -> Option<&Email> {
        self.email_address.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn 正しい形式のメールアドレスを作成できる() {
        let email = Email::new("holder@example.com").unwrap();
        assert_eq!(email.as_str(), "holder@example.com");
    }

    #[test]
    fn メールアドレスは前後の空白を除去する() {
        let email = Email::new("  holder@example.com  ").unwrap();
        assert_eq!(email.as_str(), "holder@example.com");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("no-at-sign")]
    #[case("@example.com")]
    #[case("local@")]
    fn 不正なメールアドレスはバリデーションエラーになる(#[case] raw: &str) {
        assert!(Email::new(raw).is_err());
    }

    #[test]
    fn メールアドレスは255文字を超えるとエラーになる() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert!(Email::new(long).is_err());
    }

    #[test]
    fn 連絡先はメールアドレスなしでも作成できる() {
        let contact = Contact::from_db(ContactId::new(7), "山田太郎".to_string(), None);
        assert_eq!(contact.id(), ContactId::new(7));
        assert_eq!(contact.name(), "山田太郎");
        assert!(contact.email_address().is_none());
    }
}
