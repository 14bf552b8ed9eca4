use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(#[from] crate::validation::ValidationError),

    #[error("Image file is missing")]
    MissingImage,

    #[error("Malformed multipart request: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("Upload storage error: {0}")]
    UploadStorage(#[from] std::io::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::Validation(ref err) => (StatusCode::BAD_REQUEST, err.to_string()),
            ApiError::MissingImage => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Multipart(ref err) => (StatusCode::BAD_REQUEST, err.to_string()),
            ApiError::Database(ref err) => {
                // Log the detailed error but don't expose it to the client
                error!(error = %err, "Database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
            ApiError::UploadStorage(ref err) => {
                error!(error = %err, "Failed to write uploaded file");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
