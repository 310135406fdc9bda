//! # 申請
//!
//! 取下げ対象となるライセンス申請エンティティ。
//!
//! ## 設計方針
//!
//! 申請はこのサービスの管理対象外で、読み取り専用の協力エンティティ。
//! 取下げ通知メールに必要な 3 つの外部キー（サイト住所、ライセンス保有者、
//! 申請者）だけを保持する。各外部キーは独立して欠損しうる。

use crate::{address::AddressId, contact::ContactId, withdrawal::LicenceId};

/// 申請エンティティ
///
/// `id` はライセンス ID と同一（申請 1 件につきライセンス 1 件）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    id:                   LicenceId,
    site_address_id:      Option<AddressId>,
    licence_holder_id:    Option<ContactId>,
    licence_applicant_id: Option<ContactId>,
}

impl Application {
    /// データベースの行から申請を復元する
    pub fn from_db(
        id: LicenceId,
        site_address_id: Option<AddressId>,
        licence_holder_id: Option<ContactId>,
        licence_applicant_id: Option<ContactId>,
    ) -> Self {
        Self {
            id,
            site_address_id,
            licence_holder_id,
            licence_applicant_id,
        }
    }

    pub fn id(&self) -> LicenceId {
        self.id
    }

    pub fn site_address_id(&self) -> Option<AddressId> {
        self.site_address_id
    }

    pub fn licence_holder_id(&self) -> Option<ContactId> {
        self.licence_holder_id
    }

    pub fn licence_applicant_id(&self) -> Option<ContactId> {
        self.licence_applicant_id
    }
}
