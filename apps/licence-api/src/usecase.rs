//! # ユースケース層
//!
//! Licence API のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリと送信機を `Arc<dyn Trait>` で外部から注入
//! - **薄いハンドラ**: ハンドラは薄く保ち、ロジックはユースケースに集約

pub mod notification;
pub mod withdrawal;

pub use notification::NotificationService;
pub use withdrawal::{CreateWithdrawalInput, WithdrawalUseCaseImpl};
