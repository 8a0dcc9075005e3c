/**
 * Error Conversion
 *
 * Implements `IntoResponse` for `ApiError` so handlers can return it
 * directly with `?`. Every error becomes a JSON body of the shape
 * `{"message": "..."}` with the status from `ApiError::status_code`.
 */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::types::ApiError;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("request failed: {self}");
        }
        let body = serde_json::json!({ "message": self.message() });
        (status, Json(body)).into_response()
    }
}
