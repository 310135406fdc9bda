//! # 取下げ API のテスト
//!
//! モックリポジトリを接続した実ルーターに対してリクエストを流し、
//! ステータスコードとレスポンス形状を検証する。

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use licenceflow_domain::{
    application::Application,
    contact::{Contact, ContactId, Email},
    withdrawal::LicenceId,
};
use licenceflow_infra::mock::{
    MockAddressRepository,
    MockApplicationRepository,
    MockContactRepository,
    MockNotificationSender,
    MockTransactionManager,
    MockWithdrawalRepository,
};
use licenceflow_licence_api::{
    handler::{self, WithdrawalState},
    usecase::{NotificationService, WithdrawalUseCaseImpl},
};
use tower::ServiceExt;

struct TestApp {
    app:    Router,
    sender: MockNotificationSender,
}

/// モックを接続したテスト用アプリを構築する
///
/// `main.rs` と同じルーター構成を、Postgres 実装の代わりに
/// インメモリモックで組み立てる。
fn test_app(application_repo: MockApplicationRepository, contact_repo: MockContactRepository) -> TestApp {
    let sender = MockNotificationSender::new();
    let usecase = WithdrawalUseCaseImpl::new(
        Arc::new(MockWithdrawalRepository::new()),
        Arc::new(application_repo),
        Arc::new(MockAddressRepository::new()),
        Arc::new(contact_repo),
        Arc::new(MockTransactionManager),
        Arc::new(NotificationService::new(Arc::new(sender.clone()))),
    );
    let state = Arc::new(WithdrawalState { usecase });

    TestApp {
        app: handler::router(state),
        sender,
    }
}

fn empty_test_app() -> TestApp {
    test_app(
        MockApplicationRepository::new(),
        MockContactRepository::new(),
    )
}

fn post_withdrawal_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/withdrawals")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_healthエンドポイントが稼働状態を返す() {
    let TestApp { app, .. } = empty_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_取下げ作成は201とレコードを返す() {
    let TestApp { app, .. } = empty_test_app();

    let response = app
        .oneshot(post_withdrawal_request(serde_json::json!({
            "licenceId": 42,
            "reason": "no-longer-needed",
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = response_json(response).await;
    assert_eq!(json["data"]["id"], 1);
    assert_eq!(json["data"]["licenceId"], 42);
    assert_eq!(json["data"]["reason"], "no-longer-needed");
}

#[tokio::test]
async fn test_空の理由は400を返す() {
    let TestApp { app, .. } = empty_test_app();

    let response = app
        .oneshot(post_withdrawal_request(serde_json::json!({
            "licenceId": 42,
            "reason": "   ",
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["title"], "Bad Request");
    assert_eq!(json["status"], 400);
}

#[tokio::test]
async fn test_存在しない取下げは404のproblem_detailsを返す() {
    let TestApp { app, .. } = empty_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/withdrawals/999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = response_json(response).await;
    assert_eq!(json["title"], "Not Found");
    assert_eq!(json["status"], 404);
}

#[tokio::test]
async fn test_作成した取下げを一覧と個別取得で参照できる() {
    let TestApp { app, .. } = empty_test_app();

    let response = app
        .clone()
        .oneshot(post_withdrawal_request(serde_json::json!({
            "licenceId": 42,
            "reason": "no-longer-needed",
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/withdrawals/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["data"]["licenceId"], 42);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/withdrawals")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_保有者と申請者が揃った申請では2通の通知が送られる() {
    let application_repo = MockApplicationRepository::new();
    application_repo.add_application(Application::from_db(
        LicenceId::new(42),
        None,
        Some(ContactId::new(1)),
        Some(ContactId::new(2)),
    ));

    let contact_repo = MockContactRepository::new();
    contact_repo.add_contact(Contact::from_db(
        ContactId::new(1),
        "Holder Name".to_string(),
        Some(Email::new("h@x.com").unwrap()),
    ));
    contact_repo.add_contact(Contact::from_db(
        ContactId::new(2),
        "Applicant Name".to_string(),
        Some(Email::new("a2@x.com").unwrap()),
    ));

    let TestApp { app, sender } = test_app(application_repo, contact_repo);

    let response = app
        .oneshot(post_withdrawal_request(serde_json::json!({
            "licenceId": 42,
            "reason": "no-longer-needed",
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let sent = sender.sent_emails();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].to.as_str(), "h@x.com");
    assert_eq!(sent[1].to.as_str(), "a2@x.com");
}
