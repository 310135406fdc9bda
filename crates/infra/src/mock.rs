//! # テスト用モック実装
//!
//! ユースケーステストで使用するインメモリモック。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! licenceflow-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use licenceflow_domain::{
    address::{Address, AddressId},
    application::Application,
    contact::{Contact, ContactId},
    notification::{NotificationError, TemplatedEmail},
    withdrawal::{NewWithdrawal, Withdrawal, WithdrawalId},
};

use crate::{
    db::{TransactionManager, TxContext},
    error::InfraError,
    notification::NotificationSender,
    repository::{
        AddressRepository,
        ApplicationRepository,
        ContactRepository,
        WithdrawalRepository,
    },
};

// ===== MockTransactionManager =====

/// インメモリリポジトリ用の TransactionManager
///
/// 実際のトランザクションを開始せず、Mock の TxContext を返す。
pub struct MockTransactionManager;

#[async_trait]
impl TransactionManager for MockTransactionManager {
    async fn begin(&self) -> Result<TxContext, InfraError> {
        Ok(TxContext::mock())
    }
}

// ===== MockWithdrawalRepository =====

/// インメモリ実装の WithdrawalRepository
///
/// INSERT ごとに 1 始まりの連番 ID を採番する。
#[derive(Clone, Default)]
pub struct MockWithdrawalRepository {
    withdrawals: Arc<Mutex<Vec<Withdrawal>>>,
}

impl MockWithdrawalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存済みの取下げ一覧を取得する（アサーション用）
    pub fn withdrawals(&self) -> Vec<Withdrawal> {
        self.withdrawals.lock().unwrap().clone()
    }
}

#[async_trait]
impl WithdrawalRepository for MockWithdrawalRepository {
    async fn insert(
        &self,
        _tx: &mut TxContext,
        new: &NewWithdrawal,
    ) -> Result<Withdrawal, InfraError> {
        let mut withdrawals = self.withdrawals.lock().unwrap();
        let id = WithdrawalId::new(withdrawals.len() as i32 + 1);
        let withdrawal = Withdrawal::from_db(id, new.licence_id, new.reason.clone(), Utc::now());
        withdrawals.push(withdrawal.clone());
        Ok(withdrawal)
    }

    async fn find_by_id(&self, id: WithdrawalId) -> Result<Option<Withdrawal>, InfraError> {
        Ok(self
            .withdrawals
            .lock()
            .unwrap()
            .iter()
            .find(|w| w.id() == id)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Withdrawal>, InfraError> {
        Ok(self.withdrawals.lock().unwrap().clone())
    }
}

// ===== MockApplicationRepository =====

/// インメモリ実装の ApplicationRepository
#[derive(Clone, Default)]
pub struct MockApplicationRepository {
    applications: Arc<Mutex<Vec<Application>>>,
}

impl MockApplicationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_application(&self, application: Application) {
        self.applications.lock().unwrap().push(application);
    }
}

#[async_trait]
impl ApplicationRepository for MockApplicationRepository {
    async fn find_by_id(
        &self,
        id: licenceflow_domain::withdrawal::LicenceId,
    ) -> Result<Option<Application>, InfraError> {
        Ok(self
            .applications
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id() == id)
            .cloned())
    }
}

// ===== MockContactRepository =====

/// インメモリ実装の ContactRepository
#[derive(Clone, Default)]
pub struct MockContactRepository {
    contacts: Arc<Mutex<Vec<Contact>>>,
}

impl MockContactRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_contact(&self, contact: Contact) {
        self.contacts.lock().unwrap().push(contact);
    }
}

#[async_trait]
impl ContactRepository for MockContactRepository {
    async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>, InfraError> {
        Ok(self
            .contacts
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id() == id)
            .cloned())
    }
}

// ===== MockAddressRepository =====

/// インメモリ実装の AddressRepository
#[derive(Clone, Default)]
pub struct MockAddressRepository {
    addresses: Arc<Mutex<Vec<Address>>>,
}

impl MockAddressRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_address(&self, address: Address) {
        self.addresses.lock().unwrap().push(address);
    }
}

#[async_trait]
impl AddressRepository for MockAddressRepository {
    async fn find_by_id(&self, id: AddressId) -> Result<Option<Address>, InfraError> {
        Ok(self
            .addresses
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id() == id)
            .cloned())
    }
}

// ===== MockNotificationSender =====

/// 送信メールを記録する NotificationSender
///
/// `failing` で作成すると常に送信失敗を返し、ディスパッチ失敗の
/// 伝播経路をテストできる。
#[derive(Clone, Default)]
pub struct MockNotificationSender {
    sent:    Arc<Mutex<Vec<TemplatedEmail>>>,
    failure: Option<String>,
}

impl MockNotificationSender {
    /// 常に成功する送信モックを作成する
    pub fn new() -> Self {
        Self::default()
    }

    /// 常に失敗する送信モックを作成する
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            sent:    Arc::new(Mutex::new(Vec::new())),
            failure: Some(message.into()),
        }
    }

    /// 送信されたメール一覧を取得する（アサーション用）
    pub fn sent_emails(&self) -> Vec<TemplatedEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send_email(&self, email: &TemplatedEmail) -> Result<(), NotificationError> {
        if let Some(message) = &self.failure {
            return Err(NotificationError::SendFailed(message.clone()));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}
