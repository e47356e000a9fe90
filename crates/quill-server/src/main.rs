use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;

use quill_api::{AppStateInner, password, routes};
use quill_db::Database;
use quill_types::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quill=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;

    // Init database and the two fixed accounts backing admin access and the
    // anonymous guest identity
    let db = Database::open(&config.db_path)?;
    db.seed_default_users(
        &password::hash(&config.admin_password)?,
        &password::hash(&config.guest_password)?,
    )?;

    tokio::fs::create_dir_all(&config.images_dir).await?;

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    let state = Arc::new(AppStateInner { db, config });
    let app = routes::router(state).layer(TraceLayer::new_for_http());

    info!("Quill server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
