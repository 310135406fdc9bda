//! # ドメイン層エラー定義
//!
//! ビジネスルール違反やドメイン固有の例外状態を表現するエラー型。
//!
//! ## 設計方針
//!
//! - **型による分類**: エラーの種類を列挙型で明示し、パターンマッチで処理可能に
//! - **thiserror 活用**: `#[error(...)]` マクロでエラーメッセージを自動生成
//! - **HTTP ステータスへのマッピング**: API 層でステータスコードに変換可能

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// 値オブジェクトの生成やビジネスロジックの実行中に発生する例外状態を
/// 表現する。API 層でこのエラーを受け取り、適切な HTTP レスポンスに変換する。
#[derive(Debug, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 入力値がビジネスルールに違反している場合に使用する。
    /// 必須フィールドの未入力、文字数制限の超過、不正なフォーマットなど。
    /// API 層では 400 Bad Request に対応する。
    #[error("バリデーションエラー: {0}")]
    Validation(String),
}
