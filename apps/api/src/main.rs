use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use talentflow::app::ClientApp;
use talentflow::config::Config;
use talentflow::db::create_pool;
use talentflow::routes::build_router;
use talentflow::session::storage::{ClientStorage, FileStorage, MemoryStorage};
use talentflow::session::Session;
use talentflow::state::AppState;
use talentflow::store::{seed::seed_if_empty, Store};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting TalentFlow mock API v{}", env!("CARGO_PKG_VERSION"));

    // Local store, seeded on first start only
    let pool = create_pool(&config.database_url).await?;
    let store = Store::new(pool);
    seed_if_empty(&store).await?;

    let state = AppState::new(store, &config);
    info!(
        "Mock latency {}ms, failure rate {}, reorder failure rate {}",
        config.mock_latency_ms, config.mock_failure_rate, config.reorder_failure_rate
    );

    // Client session
    let storage: Arc<dyn ClientStorage> = match &config.session_store_path {
        Some(path) => Arc::new(FileStorage::new(path)),
        None => Arc::new(MemoryStorage::default()),
    };
    let session = Session::restore(storage).await?;
    info!(
        "Restored role: {}",
        session.role().map_or("none", |r| r.as_str())
    );

    let mut client = ClientApp::new(state.clone(), &config, session);
    client.navigate("/");
    if client.jobs.fetch().await {
        info!(
            "Jobs board ready: {} jobs over {} pages",
            client.jobs.total(),
            client.jobs.total_pages()
        );
    }

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
