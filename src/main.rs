mod config;
mod errors;
mod fetcher;
mod graph;
mod layout;
mod matrix;
mod metrics;
mod normalize;
mod render;
mod routes;
mod services;
mod similarity;

use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration (the API key comes from the environment)
    dotenvy::dotenv().ok();
    let config = config::AppConfig::build()?;

    // 2. Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.server.rust_log))
        .init();

    tracing::info!("Starting scholarnet...");

    // 3. Build the search client; the key is explicit constructor state
    let client: std::sync::Arc<dyn fetcher::PaperSource> =
        std::sync::Arc::new(fetcher::SemanticScholarClient::new(&config.scholar));

    // 4. Initialize App State (Services)
    let service = services::NetworkService::new(client, &config.network);
    let state = services::AppState::new(service, config.scholar.max_results);

    // 5. Setup Router
    let app = routes::create_router(state);

    // 6. Start Server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
