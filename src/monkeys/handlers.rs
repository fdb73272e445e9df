use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

use super::{
    dto::{ListParams, Monkey, MonkeyFilter, SortBy},
    id::MonkeyId,
    repo,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/monkeys", get(list_monkeys))
        .route("/monkeys/:id", get(get_monkey))
}

#[instrument(skip(state))]
pub async fn list_monkeys(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Monkey>>, ApiError> {
    let filter = MonkeyFilter::from_params(&params);
    let sort = SortBy::from_param(params.sort_by.as_deref());
    let monkeys = repo::list(&state.db, &filter, sort).await?;
    Ok(Json(monkeys))
}

#[instrument(skip(state))]
pub async fn get_monkey(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Monkey>, ApiError> {
    // Reject malformed ids before the store is ever consulted.
    let id = MonkeyId::parse(&id).ok_or(ApiError::InvalidId)?;
    let monkey = repo::get(&state.db, &id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(monkey))
}
