use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{auth::extractors::AuthUser, error::ApiError, monkeys::id::MonkeyId, state::AppState};

use super::{
    dto::AddToCartRequest,
    repo::{self, CartLine},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cart", get(get_cart).post(add_to_cart))
        .route("/cart/:id", delete(remove_from_cart))
}

#[instrument(skip(state))]
pub async fn get_cart(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<CartLine>>, ApiError> {
    let lines = repo::list(&state.db, user_id).await?;
    Ok(Json(lines))
}

#[instrument(skip(state, payload))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<AddToCartRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let Json(payload) = payload.map_err(|_| ApiError::InvalidJson)?;

    let nft_id = payload
        .nft_id
        .filter(|s| !s.is_empty())
        .ok_or(ApiError::MissingNftId)?;
    let monkey_id = MonkeyId::parse(&nft_id).ok_or(ApiError::InvalidNftId)?;

    repo::add(&state.db, user_id, &monkey_id).await?;

    info!(%user_id, %monkey_id, "added to cart");
    Ok((StatusCode::CREATED, Json(serde_json::json!({ "ok": true }))))
}

#[instrument(skip(state))]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let monkey_id = MonkeyId::parse(&id).ok_or(ApiError::InvalidId)?;

    repo::remove(&state.db, user_id, &monkey_id).await?;

    info!(%user_id, %monkey_id, "removed from cart");
    Ok(StatusCode::NO_CONTENT)
}
