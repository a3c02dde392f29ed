use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bookshelf::CatalogError;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub type ServerResult<T> = Result<T, ServerError>;

/// Body sent for every storage failure. Nothing more specific reaches the
/// client.
pub const INTERNAL_ERROR_BODY: &str = "Internal Server Error";

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Storage error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Not found")]
    NotFound,
}

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ServerError {
    /// Get HTTP status code for this error
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    fn error_code(&self) -> &'static str {
        match self {
            ServerError::BadRequest(_) => "BAD_REQUEST",
            ServerError::Catalog(_) => "STORAGE_ERROR",
            ServerError::NotFound => "NOT_FOUND",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self {
            ServerError::Catalog(_) => {
                tracing::error!(code = self.error_code(), error = %self, "request failed");
                (status, Json(INTERNAL_ERROR_BODY)).into_response()
            }
            _ => {
                let body = Json(json!({
                    "error": {
                        "code": self.error_code(),
                        "message": self.to_string(),
                    }
                }));
                (status, body).into_response()
            }
        }
    }
}

impl From<serde_json::Error> for ServerError {
    fn from(err: serde_json::Error) -> Self {
        ServerError::BadRequest(format!("JSON parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn storage_errors_hide_details() {
        let response =
            ServerError::Catalog(CatalogError::backend("disk on fire")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!("Internal Server Error"));
    }

    #[tokio::test]
    async fn bad_request_is_structured() {
        let response = ServerError::BadRequest("nope".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(body.error.code, "BAD_REQUEST");
        assert_eq!(body.error.message, "Bad request: nope");
    }
}
