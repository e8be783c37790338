use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::calendar::CalendarError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Calendar(#[from] CalendarError),
    #[error("template rendering failed")]
    Template(#[from] tera::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Calendar(CalendarError::InvalidParameter { name, message }) => {
                tracing::warn!(param = name, "Rejected request: {message}");
                StatusCode::BAD_REQUEST
            }
            ApiError::Calendar(e) => {
                tracing::warn!("Rejected request: {e}");
                StatusCode::BAD_REQUEST
            }
            ApiError::Template(e) => {
                tracing::error!("Template rendering failed: {e:?}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, self.to_string()).into_response()
    }
}
