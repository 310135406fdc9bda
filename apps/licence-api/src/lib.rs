//! # Licence API
//!
//! ライセンス申請の取下げを受け付ける HTTP サービス。
//!
//! ## 役割
//!
//! - **取下げ CRUD**: 取下げレコードの作成・参照
//! - **通知送信**: 取下げ作成時にライセンス保有者・申請者へ
//!   テンプレートメールを送信（0〜2 通）
//!
//! ## モジュール構成
//!
//! - [`config`] - 環境変数からの設定読み込み
//! - [`error`] - API エラーと HTTP レスポンスへの変換
//! - [`handler`] - axum ハンドラとルーター
//! - [`usecase`] - 取下げ作成のオーケストレーションと通知サービス

pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
