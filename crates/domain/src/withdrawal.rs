//! # 取下げ
//!
//! ライセンス申請の取下げを表すエンティティと値オブジェクト。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 |
//! |---|------------|
//! | [`Withdrawal`] | 取下げレコード（作成後は不変） |
//! | [`NewWithdrawal`] | 永続化前の取下げ入力 |
//! | [`WithdrawalReason`] | 取下げ理由（検証済み文字列） |
//!
//! ## 設計方針
//!
//! - **作成後は不変**: 取下げはユーザー操作 1 回につき 1 件作成され、
//!   以後このサービスの範囲では変更されない
//! - **ID は DB 採番**: `WithdrawalId` は INSERT の `RETURNING id` で
//!   確定するため、`Withdrawal` の構築はリポジトリの復元経路のみ

use chrono::{DateTime, Utc};

define_record_id! {
    /// 取下げ ID（一意識別子）
    ///
    /// withdrawals テーブルの主キー。
    pub struct WithdrawalId;
}

define_record_id! {
    /// ライセンス ID（申請の一意識別子）
    ///
    /// applications テーブルの主キーと同一の値。
    pub struct LicenceId;
}

define_validated_string! {
    /// 取下げ理由（値オブジェクト）
    ///
    /// 空の理由を持つ取下げレコードを作らせない。
    pub struct WithdrawalReason {
        label: "取下げ理由",
        max_length: 4000,
    }
}

/// 永続化前の取下げ入力
///
/// ハンドラ層でバリデーション済みの値だけを持つ。
#[derive(Debug, Clone)]
pub struct NewWithdrawal {
    /// 取下げ対象のライセンス ID
    pub licence_id: LicenceId,
    /// 取下げ理由
    pub reason:     WithdrawalReason,
}

/// 取下げエンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Withdrawal {
    id:         WithdrawalId,
    licence_id: LicenceId,
    reason:     WithdrawalReason,
    created_at: DateTime<Utc>,
}

impl Withdrawal {
    /// データベースの行から取下げを復元する
    pub fn from_db(
        id: WithdrawalId,
        licence_id: LicenceId,
        reason: WithdrawalReason,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            licence_id,
            reason,
            created_at,
        }
    }

    pub fn id(&self) -> WithdrawalId {
        self.id
    }

    pub fn licence_id(&self) -> LicenceId {
        self.licence_id
    }

    pub fn reason(&self) -> &WithdrawalReason {
        &self.reason
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn 取下げ理由を作成できる() {
        let reason = WithdrawalReason::new("不要になったため").unwrap();
        assert_eq!(reason.as_str(), "不要になったため");
    }

    #[test]
    fn 空の取下げ理由はエラーになる() {
        assert!(WithdrawalReason::new("   ").is_err());
    }

    #[test]
    fn 取下げ理由は4000文字を超えるとエラーになる() {
        assert!(WithdrawalReason::new("a".repeat(4001)).is_err());
    }

    #[test]
    fn 取下げをdb行から復元できる() {
        let now = Utc::now();
        let withdrawal = Withdrawal::from_db(
            WithdrawalId::new(1),
            LicenceId::new(42),
            WithdrawalReason::new("no-longer-needed").unwrap(),
            now,
        );

        assert_eq!(withdrawal.id(), WithdrawalId::new(1));
        assert_eq!(withdrawal.licence_id(), LicenceId::new(42));
        assert_eq!(withdrawal.reason().as_str(), "no-longer-needed");
        assert_eq!(withdrawal.created_at(), now);
    }
}
