//! # LicenceFlow ドメイン層
//!
//! ライセンス申請の取下げ（Withdrawal）に関するドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（Withdrawal,
//!   Application, Contact, Address）
//! - **値オブジェクト**: 生成時にバリデーションを行う不変オブジェクト
//!   （Email, WithdrawalReason, 各 ID 型）
//! - **通知ロジック**: 通知ペイロードの構築と宛先決定は純粋関数として
//!   このクレートに置く
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、外部サービス）に一切依存しない。

#[macro_use]
mod macros;

pub mod address;
pub mod application;
pub mod contact;
pub mod error;
pub mod notification;
pub mod withdrawal;

pub use error::DomainError;
