use crate::page::render_page;
use crate::theme::THEME;
use crate::{AppState, error::AppError};
use analytics::Dashboard;
use axum::{Json, extract::State, http::Uri, response::Html};
use std::sync::Arc;

/// Runs one complete load/derive pass on the blocking pool.
///
/// Nothing is cached: every request sees what is on disk right now.
async fn current_dashboard(state: &AppState) -> Result<Dashboard, AppError> {
    let loader = state.loader.clone();
    let deriver = state.deriver.clone();

    let dashboard = tokio::task::spawn_blocking(move || deriver.derive(&loader.load())).await?;
    Ok(dashboard)
}

/// # GET /
/// The rendered dashboard page.
pub async fn get_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let dashboard = current_dashboard(&state).await?;
    let page = render_page(&state.title, &dashboard, &THEME)?;
    Ok(Html(page))
}

/// # GET /api/dashboard
/// The derived dashboard state as JSON.
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Dashboard>, AppError> {
    let dashboard = current_dashboard(&state).await?;
    Ok(Json(dashboard))
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}
