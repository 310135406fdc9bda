//! # Licence API エラー定義
//!
//! API 固有のエラーと、HTTP レスポンスへの変換を定義する。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use licenceflow_domain::notification::NotificationError;
use licenceflow_infra::InfraError;
use serde::Serialize;
use thiserror::Error;

/// エラーレスポンス（RFC 7807 Problem Details）
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: String,
    pub title:      String,
    pub status:     u16,
    pub detail:     String,
}

/// Licence API で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// リソースが見つからない
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// 不正なリクエスト
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),

    /// データベースエラー
    ///
    /// 取下げの INSERT・コミットの失敗はここに入る。永続化前に失敗
    /// した場合は部分的な状態を残さない。
    #[error("データベースエラー: {0}")]
    Database(#[from] InfraError),

    /// 通知送信エラー
    ///
    /// 取下げの永続化がコミットされた後に発生するため、このエラーが
    /// 返されても取下げレコード自体は存在する。
    #[error("通知送信エラー: {0}")]
    Notification(#[from] NotificationError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, title, detail) = match &self {
            ApiError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                "https://licenceflow.example.com/errors/not-found",
                "Not Found",
                msg.clone(),
            ),
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "https://licenceflow.example.com/errors/bad-request",
                "Bad Request",
                msg.clone(),
            ),
            ApiError::Database(e) => {
                tracing::error!("データベースエラー: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "https://licenceflow.example.com/errors/internal-error",
                    "Internal Server Error",
                    "内部エラーが発生しました".to_string(),
                )
            }
            ApiError::Notification(e) => {
                tracing::error!("通知送信エラー: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "https://licenceflow.example.com/errors/notification-failed",
                    "Notification Failed",
                    "通知メールの送信に失敗しました".to_string(),
                )
            }
        };

        (
            status,
            Json(ErrorResponse {
                error_type: error_type.to_string(),
                title: title.to_string(),
                status: status.as_u16(),
                detail,
            }),
        )
            .into_response()
    }
}
