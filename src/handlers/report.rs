use axum::extract::State;
use axum::response::{IntoResponse, Json, Response};
use chrono::Utc;
use serde_json::json;
use tower_sessions::Session;

use crate::errors::{AppError, AppResult, NotifyError};
use crate::models::SessionUser;
use crate::AppState;

// End-of-day report: post the caller's same-day task digest to their
// configured webhook.
pub async fn send_daily_report(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Response> {
    let user = session
        .get::<SessionUser>("user_session")
        .await
        .map_err(|e| AppError::Auth(format!("Session error: {}", e)))?
        .ok_or_else(|| AppError::Auth("Not authenticated".into()))?;

    let staff = state
        .store
        .get_staff(&user.username)
        .await?
        .ok_or_else(|| AppError::Auth(format!("No staff record for {}", user.username)))?;

    // Checked before any HTTP call is made.
    let webhook_url = staff
        .webhook_url
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| NotifyError::MissingWebhook(user.username.clone()))?;

    let tasks = state.store.list_tasks().await?;
    state
        .notifier
        .send_daily_report(&user.username, &webhook_url, &tasks, Utc::now())
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Daily report delivered"
    }))
    .into_response())
}
