use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

/// Every failure a handler can produce, mapped to the wire-level
/// `{"error": <code>}` bodies and status codes.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid_json")]
    InvalidJson,
    #[error("missing_fields")]
    MissingFields,
    #[error("missing_credentials")]
    MissingCredentials,
    #[error("missing_nftId")]
    MissingNftId,
    #[error("invalid_nftId")]
    InvalidNftId,
    #[error("invalid_id")]
    InvalidId,
    #[error("invalid_credentials")]
    InvalidCredentials,
    #[error("unauthorized")]
    Unauthorized,
    #[error("not_found")]
    NotFound,
    #[error("user_not_found")]
    UserNotFound,
    #[error("user_exists")]
    UserExists,
    #[error("db_error")]
    Database(#[from] sqlx::Error),
    #[error("internal_error")]
    Internal(#[from] anyhow::Error),
}

impl From<crate::auth::password::PasswordError> for ApiError {
    fn from(e: crate::auth::password::PasswordError) -> Self {
        Self::Internal(anyhow::Error::new(e))
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidJson
            | Self::MissingFields
            | Self::MissingCredentials
            | Self::MissingNftId
            | Self::InvalidNftId
            | Self::InvalidId => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound | Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::UserExists => StatusCode::CONFLICT,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidJson => "invalid_json",
            Self::MissingFields => "missing_fields",
            Self::MissingCredentials => "missing_credentials",
            Self::MissingNftId => "missing_nftId",
            Self::InvalidNftId => "invalid_nftId",
            Self::InvalidId => "invalid_id",
            Self::InvalidCredentials => "invalid_credentials",
            Self::Unauthorized => "unauthorized",
            Self::NotFound => "not_found",
            Self::UserNotFound => "user_not_found",
            Self::UserExists => "user_exists",
            Self::Database(_) => "db_error",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = serde_json::json!({ "error": self.code() });
        match &self {
            Self::Database(e) => {
                error!(error = %e, "database error");
                body["detail"] = serde_json::Value::String(e.to_string());
            }
            Self::Internal(e) => {
                error!(error = %e, "internal error");
            }
            _ => {}
        }
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let res = err.into_response();
        let status = res.status();
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn unauthorized_maps_to_401_body() {
        let (status, body) = body_json(ApiError::Unauthorized).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "unauthorized");
    }

    #[tokio::test]
    async fn conflict_maps_to_409() {
        let (status, body) = body_json(ApiError::UserExists).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "user_exists");
    }

    #[tokio::test]
    async fn database_error_carries_detail() {
        let (status, body) = body_json(ApiError::Database(sqlx::Error::PoolTimedOut)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "db_error");
        assert!(body["detail"].is_string());
    }
}
