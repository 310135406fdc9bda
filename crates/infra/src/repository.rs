//! # リポジトリ実装
//!
//! 永続化層へのアクセスを抽象化するリポジトリトレイトと、その
//! PostgreSQL 実装を提供する。
//!
//! ## 設計方針
//!
//! - **依存性逆転**: ユースケース層はトレイト経由でリポジトリを利用
//! - **データベース抽象化**: sqlx を使用し、PostgreSQL 固有の処理をカプセル化
//! - **不在は正常値**: 参照系はすべて `Option` を返し、見つからないことを
//!   エラーにしない

pub mod address_repository;
pub mod application_repository;
pub mod contact_repository;
pub mod withdrawal_repository;

pub use address_repository::{AddressRepository, PostgresAddressRepository};
pub use application_repository::{ApplicationRepository, PostgresApplicationRepository};
pub use contact_repository::{ContactRepository, PostgresContactRepository};
pub use withdrawal_repository::{PostgresWithdrawalRepository, WithdrawalRepository};
