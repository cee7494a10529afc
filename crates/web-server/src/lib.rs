use analytics::AnalyticsEngine;
use api_client::{SocialApiClient, TwitterClient};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use configuration::Config;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;
pub mod stdio;
pub mod tools;

pub use error::AppError;
pub use tools::{Tool, ToolContent, ToolDescriptor, ToolResult};

/// Tool arguments are small; anything larger is rejected before parsing.
const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// The shared application state that all handlers can access.
pub struct AppState {
    pub client: Arc<dyn SocialApiClient>,
    pub engine: AnalyticsEngine,
}

impl AppState {
    pub fn new(client: Arc<dyn SocialApiClient>) -> Self {
        Self {
            client,
            engine: AnalyticsEngine::new(),
        }
    }
}

/// Builds the tool router over `state`.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/health", get(handlers::health))
        .route("/tools", get(handlers::list_tools))
        .route("/tools/:name", post(handlers::call_tool))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
}

/// Binds the configured address and serves the tools until the process stops.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let client = TwitterClient::new(&config.api)?;
    let state = Arc::new(AppState::new(Arc::new(client)));
    let app = router(state);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Tool server listening.");
    axum::serve(listener, app).await?;

    Ok(())
}

/// Serves the tools as JSON-RPC over stdin/stdout until stdin closes.
pub async fn run_stdio(config: &Config) -> anyhow::Result<()> {
    let client = TwitterClient::new(&config.api)?;
    let state = AppState::new(Arc::new(client));

    tracing::info!("Tool server reading JSON-RPC from stdin.");
    let reader = tokio::io::BufReader::new(tokio::io::stdin());
    stdio::serve_lines(&state, reader, tokio::io::stdout()).await
}
