//! # 取下げユースケース
//!
//! 取下げの作成・取得に関するビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **トランザクションは INSERT 1 件のみ**: 関連エンティティの参照と
//!   通知送信はトランザクションの外。通知失敗で取下げはロールバック
//!   されない
//! - **不在は正常値**: 申請・住所・連絡先の不在は通知フィールドの欠損に
//!   なるだけで、取下げ作成は成功する

use std::sync::Arc;

use licenceflow_domain::{
    address::Address,
    contact::{Contact, ContactId},
    notification::{WithdrawalNotification, notification_recipients},
    withdrawal::{LicenceId, NewWithdrawal, Withdrawal, WithdrawalId, WithdrawalReason},
};
use licenceflow_infra::{
    db::TransactionManager,
    repository::{
        AddressRepository,
        ApplicationRepository,
        ContactRepository,
        WithdrawalRepository,
    },
};

use crate::{error::ApiError, usecase::NotificationService};

/// 取下げ作成入力
#[derive(Debug, Clone)]
pub struct CreateWithdrawalInput {
    /// 取下げ対象のライセンス ID
    pub licence_id: LicenceId,
    /// 取下げ理由
    pub reason:     WithdrawalReason,
}

/// 通知メールに使う関連エンティティの解決結果
///
/// 3 つの参照は互いに独立で、それぞれ不在でありうる。
/// 「すべて解決を試み、不在は正常値として保持する」結合子。
#[derive(Default)]
struct RelatedParties {
    site_address: Option<Address>,
    holder:       Option<Contact>,
    applicant:    Option<Contact>,
}

/// 取下げユースケース実装
pub struct WithdrawalUseCaseImpl {
    withdrawal_repo:      Arc<dyn WithdrawalRepository>,
    application_repo:     Arc<dyn ApplicationRepository>,
    address_repo:         Arc<dyn AddressRepository>,
    contact_repo:         Arc<dyn ContactRepository>,
    tx_manager:           Arc<dyn TransactionManager>,
    notification_service: Arc<NotificationService>,
}

impl WithdrawalUseCaseImpl {
    /// 新しい取下げユースケースを作成
    pub fn new(
        withdrawal_repo: Arc<dyn WithdrawalRepository>,
        application_repo: Arc<dyn ApplicationRepository>,
        address_repo: Arc<dyn AddressRepository>,
        contact_repo: Arc<dyn ContactRepository>,
        tx_manager: Arc<dyn TransactionManager>,
        notification_service: Arc<NotificationService>,
    ) -> Self {
        Self {
            withdrawal_repo,
            application_repo,
            address_repo,
            contact_repo,
            tx_manager,
            notification_service,
        }
    }

    /// ID で取下げを取得する
    pub async fn find_one(&self, id: WithdrawalId) -> Result<Withdrawal, ApiError> {
        self.withdrawal_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("取下げが見つかりません: {id}")))
    }

    /// すべての取下げを取得する
    pub async fn find_all(&self) -> Result<Vec<Withdrawal>, ApiError> {
        Ok(self.withdrawal_repo.find_all().await?)
    }

    /// 取下げを作成し、通知メールを送信する
    ///
    /// ## 処理フロー
    ///
    /// 1. 取下げを永続化（INSERT 1 件だけをトランザクションに入れる）
    /// 2. 対象の申請を参照（不在は許容）
    /// 3. サイト住所・保有者・申請者を独立に解決（各外部キーがある場合のみ）
    /// 4. 通知ペイロードを構築
    /// 5. 宛先を決定して 0〜2 通送信
    /// 6. 永続化済みの取下げを返す
    ///
    /// ## エラー
    ///
    /// - 永続化失敗: ここで中断し、以降のステップは実行されない
    /// - 通知送信失敗: コミット後に発生するため取下げは残ったまま
    ///   エラーが伝播する
    pub async fn create(&self, input: CreateWithdrawalInput) -> Result<Withdrawal, ApiError> {
        // 1. 取下げを永続化
        let new = NewWithdrawal {
            licence_id: input.licence_id,
            reason:     input.reason,
        };
        let mut tx = self.tx_manager.begin().await?;
        let withdrawal = self.withdrawal_repo.insert(&mut tx, &new).await?;
        tx.commit().await?;

        tracing::info!(
            withdrawal_id = %withdrawal.id(),
            licence_id = %withdrawal.licence_id(),
            "取下げを作成"
        );

        // 2-3. 関連エンティティを解決
        let related = self.resolve_related(withdrawal.licence_id()).await?;

        // 4. 通知ペイロードを構築
        let payload = WithdrawalNotification::build(
            related.holder.as_ref(),
            related.applicant.as_ref(),
            related.site_address.as_ref(),
            withdrawal.licence_id(),
            withdrawal.reason(),
        );

        // 5. 宛先を決定して送信
        let recipients =
            notification_recipients(related.holder.as_ref(), related.applicant.as_ref());
        self.notification_service
            .send_withdrawal_emails(&payload, &recipients)
            .await?;

        // 6. 永続化済みレコードを返す
        Ok(withdrawal)
    }

    /// 通知に必要な関連エンティティをすべて解決する
    ///
    /// 申請が見つからなければ以降の参照は行わず、全欠損の結果を返す。
    /// 各参照はそれぞれの外部キーが存在する場合だけ実行される。
    async fn resolve_related(&self, licence_id: LicenceId) -> Result<RelatedParties, ApiError> {
        let Some(application) = self.application_repo.find_by_id(licence_id).await? else {
            return Ok(RelatedParties::default());
        };

        let site_address = match application.site_address_id() {
            Some(id) => self.address_repo.find_by_id(id).await?,
            None => None,
        };
        let holder = self.lookup_contact(application.licence_holder_id()).await?;
        let applicant = self
            .lookup_contact(application.licence_applicant_id())
            .await?;

        Ok(RelatedParties {
            site_address,
            holder,
            applicant,
        })
    }

    async fn lookup_contact(&self, id: Option<ContactId>) -> Result<Option<Contact>, ApiError> {
        match id {
            Some(id) => Ok(self.contact_repo.find_by_id(id).await?),
            None => Ok(None),
        }
    }
}
