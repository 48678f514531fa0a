use tower_sessions_sqlx_store::PostgresStore;

mod app;
mod auth;
mod config;
mod db;
mod error;
mod recipes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "recipebox=debug,axum=info,tower_http=info".to_string());
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

    let state = db::AppState::init().await?;

    sqlx::migrate!("./migrations").run(&state.db).await?;

    let store = PostgresStore::new(state.db.clone());
    store.migrate().await?;

    let sessions = app::session_layer(store, &state.config.session);
    let router = app::build_app(state, sessions);
    app::serve(router).await
}
