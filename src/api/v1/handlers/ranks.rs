/*
 * Responsibility
 * - GET  /rank/{category}: stored ranking (public)
 * - POST /rank/{category}: recompute from todo completion (admin only)
 */
use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Local;
use tracing::{info, warn};

use crate::{
    api::v1::{dto::ranks::RankResponse, extractors::AuthPrincipal},
    error::AppError,
    repos::rank_repo,
    services::rank::{self, RankCategory},
    state::AppState,
};

fn parse_category(raw: &str) -> Result<RankCategory, AppError> {
    raw.parse::<RankCategory>()
        .map_err(|_| AppError::bad_request("INVALID_CATEGORY", "category must be day, week or month"))
}

pub async fn list_ranks(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<RankResponse>>, AppError> {
    let category = parse_category(&category)?;
    let rows = rank_repo::list(&state.db, category).await?;
    Ok(Json(rows.into_iter().map(RankResponse::from).collect()))
}

pub async fn refresh_ranks(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(category): Path<String>,
) -> Result<Json<Vec<RankResponse>>, AppError> {
    if !principal.is_admin() {
        warn!(member_id = principal.id, "non-admin rank refresh");
        return Err(AppError::Forbidden);
    }
    let category = parse_category(&category)?;

    let (from, to) = category.window(Local::now().date_naive());
    let stats = rank_repo::member_stats(&state.db, from, to).await?;
    let entries = rank::compute_ranks(&stats);
    rank_repo::replace(&state.db, category, &entries).await?;
    info!(category = %category, members = entries.len(), "ranking refreshed");

    let rows = rank_repo::list(&state.db, category).await?;
    Ok(Json(rows.into_iter().map(RankResponse::from).collect()))
}
