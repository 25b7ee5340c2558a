use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse},
    Json,
};
use serde::Deserialize;
use tracing::instrument;

use crate::errors::AppError;
use crate::render;
use crate::services::{AppState, NetworkMode, NetworkView};

#[derive(Debug, Deserialize)]
pub struct NetworkParams {
    query: String,
    limit: Option<u32>,
    mode: Option<NetworkMode>,
}

impl NetworkParams {
    /// Validate user input against the configured bounds.
    fn validate(&self, max_results: u32) -> Result<(String, u32, NetworkMode), AppError> {
        let query = self.query.trim();
        if query.is_empty() {
            return Err(AppError::ValidationError(
                "Query string cannot be empty".to_string(),
            ));
        }

        let limit = self.limit.unwrap_or(10);
        if limit > max_results {
            return Err(AppError::ValidationError(format!(
                "limit {limit} exceeds the maximum of {max_results}"
            )));
        }

        let mode = self.mode.unwrap_or(NetworkMode::Coauthorship);
        Ok((query.to_string(), limit, mode))
    }
}

async fn build_view(state: &AppState, params: &NetworkParams) -> Result<NetworkView, AppError> {
    let (query, limit, mode) = params.validate(state.max_results)?;
    state.network_service.build(&query, limit, mode).await
}

/// Landing page with the query form.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render::render_index(state.max_results))
}

/// Interactive HTML visualization of the giant component.
#[instrument(skip(state))]
pub async fn network_page(
    State(state): State<AppState>,
    Query(params): Query<NetworkParams>,
) -> Result<impl IntoResponse, AppError> {
    let view = build_view(&state, &params).await?;
    Ok(Html(render::render_page(&view)))
}

/// The same view as JSON, for programmatic consumers.
#[instrument(skip(state))]
pub async fn network_json(
    State(state): State<AppState>,
    Query(params): Query<NetworkParams>,
) -> Result<impl IntoResponse, AppError> {
    let view = build_view(&state, &params).await?;
    Ok(Json(view))
}
