//! # 取下げハンドラ
//!
//! 取下げ CRUD のエンドポイントを定義する。

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use licenceflow_domain::withdrawal::{LicenceId, Withdrawal, WithdrawalId, WithdrawalReason};
use licenceflow_shared::ApiResponse;
use serde::{Deserialize, Serialize};

use crate::{
    error::ApiError,
    usecase::{CreateWithdrawalInput, WithdrawalUseCaseImpl},
};

/// 取下げハンドラの共有状態
pub struct WithdrawalState {
    pub usecase: WithdrawalUseCaseImpl,
}

/// 取下げ作成リクエスト
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWithdrawalRequest {
    /// 取下げ対象のライセンス ID
    pub licence_id: i32,
    /// 取下げ理由
    pub reason:     String,
}

/// 取下げレスポンス DTO
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalDto {
    pub id:         i32,
    pub licence_id: i32,
    pub reason:     String,
    pub created_at: DateTime<Utc>,
}

impl WithdrawalDto {
    fn from_withdrawal(withdrawal: &Withdrawal) -> Self {
        Self {
            id:         withdrawal.id().as_i32(),
            licence_id: withdrawal.licence_id().as_i32(),
            reason:     withdrawal.reason().as_str().to_string(),
            created_at: withdrawal.created_at(),
        }
    }
}

/// 取下げを作成する
///
/// ## エンドポイント
/// POST /withdrawals
///
/// ## 処理フロー
/// 1. リクエストをパースし、理由をバリデーション
/// 2. ユースケースを呼び出し（永続化 + 通知送信）
/// 3. 201 Created + 永続化済みレコードを返す
pub async fn create_withdrawal(
    State(state): State<Arc<WithdrawalState>>,
    Json(req): Json<CreateWithdrawalRequest>,
) -> Result<Response, ApiError> {
    let reason =
        WithdrawalReason::new(req.reason).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let input = CreateWithdrawalInput {
        licence_id: LicenceId::new(req.licence_id),
        reason,
    };

    let withdrawal = state.usecase.create(input).await?;

    let response = ApiResponse::new(WithdrawalDto::from_withdrawal(&withdrawal));
    Ok((StatusCode::CREATED, Json(response)).into_response())
}

/// 取下げを 1 件取得する
///
/// ## エンドポイント
/// GET /withdrawals/{id}
pub async fn get_withdrawal(
    State(state): State<Arc<WithdrawalState>>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    let withdrawal = state.usecase.find_one(WithdrawalId::new(id)).await?;

    let response = ApiResponse::new(WithdrawalDto::from_withdrawal(&withdrawal));
    Ok((StatusCode::OK, Json(response)).into_response())
}

/// 取下げ一覧を取得する
///
/// ## エンドポイント
/// GET /withdrawals
pub async fn list_withdrawals(
    State(state): State<Arc<WithdrawalState>>,
) -> Result<Response, ApiError> {
    let withdrawals = state.usecase.find_all().await?;

    let dtos: Vec<WithdrawalDto> = withdrawals.iter().map(WithdrawalDto::from_withdrawal).collect();
    let response = ApiResponse::new(dtos);
    Ok((StatusCode::OK, Json(response)).into_response())
}
