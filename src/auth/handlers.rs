use axum::{
    extract::{rejection::JsonRejection, FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, ProfileResponse, RegisterRequest},
        extractors::AuthUser,
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        repo::Account,
    },
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/profile", get(profile))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let Json(payload) = payload.map_err(|_| ApiError::InvalidJson)?;

    let (Some(username), Some(email), Some(password)) =
        (payload.username, payload.email, payload.password)
    else {
        return Err(ApiError::MissingFields);
    };
    if username.is_empty() || email.is_empty() || password.is_empty() {
        return Err(ApiError::MissingFields);
    }

    let hash = hash_password(&password)?;

    let account = match Account::create(&state.db, &username, &email, &hash).await {
        Ok(a) => a,
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            warn!(%username, "username or email already taken");
            return Err(ApiError::UserExists);
        }
        Err(e) => return Err(e.into()),
    };

    let token = JwtKeys::from_ref(&state).sign(account.id)?;

    info!(user_id = %account.id, username = %account.username, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: account.into(),
            token,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiError> {
    let Json(payload) = payload.map_err(|_| ApiError::InvalidJson)?;

    let (Some(username), Some(password)) = (payload.username, payload.password) else {
        return Err(ApiError::MissingCredentials);
    };
    if username.is_empty() || password.is_empty() {
        return Err(ApiError::MissingCredentials);
    }

    // Unknown username and wrong password must be indistinguishable.
    let Some(account) = Account::find_by_username(&state.db, &username).await? else {
        warn!(%username, "login unknown username");
        return Err(ApiError::InvalidCredentials);
    };

    if !verify_password(&password, &account.password_hash)? {
        warn!(user_id = %account.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let token = JwtKeys::from_ref(&state).sign(account.id)?;

    info!(user_id = %account.id, username = %account.username, "user logged in");
    Ok(Json(AuthResponse {
        user: account.into(),
        token,
    }))
}

#[instrument(skip(state))]
pub async fn profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    let account = Account::find_by_id(&state.db, user_id)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    Ok(Json(ProfileResponse {
        user: account.into(),
    }))
}
