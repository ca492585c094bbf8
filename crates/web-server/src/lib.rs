use analytics::MetricsDeriver;
use axum::{Router, routing::get};
use configuration::DashboardConfig;
use loader::LiveDataLoader;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;
pub mod page;
pub mod theme;

/// The shared application state that all handlers can access.
///
/// Read-only: it holds where to read from and how to derive, never the data.
#[derive(Clone)]
pub struct AppState {
    pub loader: LiveDataLoader,
    pub deriver: MetricsDeriver,
    pub title: String,
}

impl AppState {
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            loader: LiveDataLoader::new(config.data.live_data_dir()),
            deriver: MetricsDeriver::new(config.display.recent_trades),
            title: config.display.title.clone(),
        }
    }
}

/// Builds the application router.
pub fn router(state: Arc<AppState>) -> Router {
    // Any origin may read the dashboard.
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);

    Router::new()
        .route("/", get(handlers::get_page))
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
pub async fn run_server(config: DashboardConfig) -> anyhow::Result<()> {
    let addr = config.server.socket_addr();
    let state = AppState::from_config(&config);

    tracing::info!(
        data_dir = %state.loader.data_dir().display(),
        "Serving live data directory."
    );

    let app = router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
