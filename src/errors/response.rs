use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::errors::{notify::NotifyError, AppError};

// The IntoResponse trait implementation converts AppError into a well-formed HTTP response.
// Every endpoint error leaves the service as structured JSON; nothing
// propagates as an unhandled fault.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // Credential problems get a generic message, no internal detail.
            AppError::Auth(msg) => {
                tracing::warn!("Unauthorized request: {}", msg);
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "success": false, "error": "Unauthorized" })),
                )
                    .into_response()
            }

            // Missing per-user or per-call configuration is actionable by the caller.
            AppError::Config(msg) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "error": msg })),
            )
                .into_response(),

            // Store errors are internal server errors
            AppError::Store(e) => {
                tracing::error!("Store error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "success": false,
                        "error": "Failed to load records from the store"
                    })),
                )
                    .into_response()
            }

            // Dispatcher errors have specific status codes
            AppError::Notify(err) => convert_notify_error(err),

            AppError::Template(e) => {
                tracing::error!("Template error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "success": false, "error": "Failed to render page" })),
                )
                    .into_response()
            }
        }
    }
}

// Helper function to convert dispatcher errors to responses
fn convert_notify_error(err: NotifyError) -> Response {
    match err {
        // Per-user configuration gaps: the caller can fix these themselves.
        NotifyError::MissingWebhook(_) | NotifyError::MissingField(_) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "error": err.to_string() })),
        )
            .into_response(),

        // The webhook answered but refused the payload.
        NotifyError::Webhook(status) => {
            tracing::error!("Webhook delivery failed with status {}", status);
            (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "success": false,
                    "error": "Failed to deliver the report to the configured webhook"
                })),
            )
                .into_response()
        }

        // Provider-side rejection: keep the status and body in the log so
        // operators can tell delivery failures from data-access failures.
        NotifyError::Provider { status, body } => {
            tracing::error!("Email provider rejected the message: {} {}", status, body);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": format!("Email provider rejected the message (status {})", status)
                })),
            )
                .into_response()
        }

        // All other dispatch failures are internal server errors
        _ => {
            tracing::error!("Notification dispatch failed: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "error": "Failed to send notification" })),
            )
                .into_response()
        }
    }
}
