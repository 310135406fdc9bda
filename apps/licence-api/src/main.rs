//! # Licence API サーバー
//!
//! ライセンス申請の取下げを受け付ける HTTP サービスのエントリーポイント。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `LICENCE_API_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `LICENCE_API_PORT` | **Yes** | ポート番号 |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `NOTIFY_API_KEY` | No | 通知プロバイダの API キー（未設定で送信無効） |
//! | `NOTIFY_BASE_URL` | No | 通知プロバイダ API のベース URL |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境
//! cargo run -p licenceflow-licence-api
//!
//! # 本番環境
//! LICENCE_API_PORT=3001 DATABASE_URL=postgres://... NOTIFY_API_KEY=... \
//!     cargo run -p licenceflow-licence-api --release
//! ```

use std::{net::SocketAddr, sync::Arc};

use licenceflow_infra::{
    db,
    notification::{NoopNotificationSender, NotificationSender, NotifyNotificationSender},
    repository::{
        PostgresAddressRepository,
        PostgresApplicationRepository,
        PostgresContactRepository,
        PostgresWithdrawalRepository,
    },
};
use licenceflow_licence_api::{
    config::{ApiConfig, NotificationConfig},
    handler::{self, WithdrawalState},
    usecase::{NotificationService, WithdrawalUseCaseImpl},
};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Licence API サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,licenceflow=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 設定読み込み
    let config = ApiConfig::from_env().expect("設定の読み込みに失敗しました");

    tracing::info!(
        "Licence API サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // データベース接続プールを作成し、マイグレーションを適用
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("データベース接続に失敗しました");
    db::run_migrations(&pool).await?;
    tracing::info!("データベースに接続しました");

    // 通知送信バックエンドを選択
    let sender = build_notification_sender(&config.notification);
    let notification_service = Arc::new(NotificationService::new(sender));

    // 依存コンポーネントを初期化
    let usecase = WithdrawalUseCaseImpl::new(
        Arc::new(PostgresWithdrawalRepository::new(pool.clone())),
        Arc::new(PostgresApplicationRepository::new(pool.clone())),
        Arc::new(PostgresAddressRepository::new(pool.clone())),
        Arc::new(PostgresContactRepository::new(pool.clone())),
        Arc::new(db::PgTransactionManager::new(pool)),
        notification_service,
    );
    let state = Arc::new(WithdrawalState { usecase });

    // ルーター構築
    let app = handler::router(state);

    // サーバー起動
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("アドレスのパースに失敗しました");

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Licence API サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// API キーの有無で通知送信バックエンドを選択する
///
/// キーが未設定の環境（ローカル開発など）では Noop を選択し、
/// 取下げ作成時のメール送信を黙ってスキップする。
fn build_notification_sender(config: &NotificationConfig) -> Arc<dyn NotificationSender> {
    match &config.api_key {
        Some(api_key) => {
            tracing::info!("通知送信: プロバイダ API を使用します");
            Arc::new(NotifyNotificationSender::new(
                api_key.clone(),
                config.base_url.clone(),
            ))
        }
        None => {
            tracing::warn!("NOTIFY_API_KEY 未設定のため通知送信を無効化します");
            Arc::new(NoopNotificationSender)
        }
    }
}
