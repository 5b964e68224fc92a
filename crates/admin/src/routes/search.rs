//! Global search.

use askama::Template;
use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;
use tracing::instrument;

use super::{Shell, render};
use crate::db::ProductRepository;
use crate::error::AppError;
use crate::models::SearchHit;
use crate::resources::product::GLOBAL_SEARCH_LIMIT;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Search results page template.
#[derive(Template)]
#[template(path = "search.html")]
pub struct SearchTemplate {
    pub shell: Shell,
    pub query: String,
    pub hits: Vec<SearchHit>,
}

/// Global search handler.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Html<String>, AppError> {
    let q = query.q.unwrap_or_default();
    let hits = ProductRepository::new(state.pool())
        .search(&q, GLOBAL_SEARCH_LIMIT)
        .await?;

    tracing::debug!(results = hits.len(), "Global search");

    let template = SearchTemplate {
        shell: Shell::new("Search", "/search"),
        query: q,
        hits,
    };
    Ok(render(&template))
}
