use actix_web::{get, web, HttpResponse};
use skillcompass_common::SkillCompassError;
use std::sync::Arc;

use crate::error::ApiResult;
use crate::state::AppState;
use crate::types::{SearchQuery, SearchResponse, SearchResultItem, StatsResponse};

/// Rank assessment questions by similarity to `q`
#[get("/search/questions")]
pub async fn search_questions(
    query: web::Query<SearchQuery>,
    state: web::Data<Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    let text = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| SkillCompassError::invalid_input("Query is missing"))?;

    let k = state.config.resolve_top_k(query.k);
    let data: Vec<SearchResultItem> = state
        .index
        .search_hits(text, k)?
        .into_iter()
        .map(SearchResultItem::from)
        .collect();

    let count = data.len();
    Ok(HttpResponse::Ok().json(SearchResponse {
        success: true,
        data,
        query: text.to_string(),
        count,
    }))
}

#[get("/search/stats")]
pub async fn search_stats(state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    let index = state.index.get()?;

    Ok(HttpResponse::Ok().json(StatsResponse {
        success: true,
        data: index.stats(),
    }))
}
