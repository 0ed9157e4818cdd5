use axum::response::{IntoResponse, Json, Response};
use axum::extract::State;
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use chrono::Utc;
use serde_json::json;
use tower_sessions::Session;

use crate::billing;
use crate::errors::{AppError, AppResult};
use crate::models::SessionUser;
use crate::AppState;

// Overdue-payment reminder run. Triggered by the external scheduler with the
// shared cron secret, or interactively from a signed-in session. The
// scheduled and interactive triggers are not mutually exclusive; concurrent
// runs can double-send, there is no dedup key.
pub async fn remind_payment(
    State(state): State<AppState>,
    session: Session,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
) -> AppResult<Response> {
    let scheduler_call = bearer
        .as_ref()
        .map(|TypedHeader(auth)| scheduler_token_matches(auth.token(), &state.config.reminder.cron_secret))
        .unwrap_or(false);

    if !scheduler_call {
        let signed_in = matches!(
            session.get::<SessionUser>("user_session").await,
            Ok(Some(_))
        );
        if !signed_in {
            return Err(AppError::Auth(
                "reminder endpoint called without a valid secret or session".into(),
            ));
        }
    }

    let students = state.store.list_students().await?;
    let overdue = billing::detect_overdue(&students, Utc::now().date_naive());

    if overdue.is_empty() {
        tracing::info!("Payment reminder run found no overdue students");
        return Ok(Json(json!({
            "success": true,
            "message": "No overdue payments found"
        }))
        .into_response());
    }

    tracing::info!("Found {} students with overdue payments", overdue.len());

    // One batched send for the whole set.
    state.notifier.send_payment_reminder(&overdue).await?;

    let students_json: Vec<_> = overdue
        .iter()
        .map(|s| {
            json!({
                "name": s.name,
                "startDate": s.start_date,
                "tuitionFee": s.tuition_fee,
                "paymentStatus": s.payment_status,
                "notes": s.notes,
            })
        })
        .collect();

    Ok(Json(json!({
        "success": true,
        "message": format!("Sent a reminder covering {} students", overdue.len()),
        "students": students_json,
    }))
    .into_response())
}

// An unset secret must never authorize anything.
fn scheduler_token_matches(token: &str, secret: &str) -> bool {
    !secret.is_empty() && token == secret
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheduler_token_must_match_the_configured_secret() {
        assert!(scheduler_token_matches("s3cret", "s3cret"));
        assert!(!scheduler_token_matches("wrong", "s3cret"));
        assert!(!scheduler_token_matches("", "s3cret"));
    }

    #[test]
    fn empty_secret_rejects_every_token() {
        assert!(!scheduler_token_matches("", ""));
        assert!(!scheduler_token_matches("anything", ""));
    }
}
