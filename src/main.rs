use anyhow::Context;

use userstore::{app, config::AppConfig, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "userstore=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env()?;
    let addr = config.bind_addr();
    let app_state = AppState::init(config).await?;
    tracing::info!(
        max_connections = app_state.config.max_connections,
        "database pool ready"
    );

    // Create the users table if this database has never seen it
    sqlx::migrate!("./migrations")
        .run(&app_state.db)
        .await
        .context("bootstrap users schema")?;

    let db = app_state.db.clone();
    let served = app::serve(app::build_app(app_state), &addr).await;

    db.close().await;
    tracing::info!("database pool closed");
    served
}
