use crate::database::DbError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

#[derive(Debug, Error)]
pub enum MovieSearchError {
    #[error("database error: {0}")]
    Database(#[from] DbError),
}

/// Body of a failed movie request.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    pub details: String,
}

fn log_error(error: &MovieSearchError) {
    match error {
        MovieSearchError::Database(e) => error!("Error in /api/movies: {}", e),
    }
}

impl MovieSearchError {
    fn details(&self) -> String {
        match self {
            Self::Database(DbError::Sqlx(e)) => e.to_string(),
            Self::Database(e @ DbError::SerdeJson(_)) => e.to_string(),
        }
    }
}

impl IntoResponse for MovieSearchError {
    fn into_response(self) -> Response {
        log_error(&self);

        let body = Json(ErrorResponse {
            error: "Failed to load data".to_owned(),
            details: self.details(),
        });
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
