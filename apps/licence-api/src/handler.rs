//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、ビジネスロジックはユースケース層に委譲

pub mod health;
pub mod withdrawal;

use std::sync::Arc;

use axum::{Router, routing::get};
pub use health::health_check;
use tower_http::trace::TraceLayer;
pub use withdrawal::{WithdrawalState, create_withdrawal, get_withdrawal, list_withdrawals};

/// API ルーターを構築する
pub fn router(state: Arc<WithdrawalState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/withdrawals",
            get(list_withdrawals).post(create_withdrawal),
        )
        .route("/withdrawals/{id}", get(get_withdrawal))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
