use axum::extract::State;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use crate::errors::AppResult;
use crate::models::{PaymentStatus, RegistrationForm, Student};
use crate::services::validate_registration;
use crate::AppState;

// Registration intake: persist the new student and alert the center owner.
pub async fn notify_registration(
    State(state): State<AppState>,
    Json(form): Json<RegistrationForm>,
) -> AppResult<Response> {
    // Reject incomplete registrations before touching the store or the
    // email provider.
    validate_registration(&form)?;

    let student = Student {
        id: uuid::Uuid::new_v4().to_string(),
        name: form.name.clone(),
        target_score: form.target_score,
        // Start date is set later, once the student is scheduled into a
        // class; until then the account can never look overdue.
        start_date: None,
        study_duration: None,
        tuition_fee: form.tuition_fee,
        payment_status: PaymentStatus::Pending,
        payment_dates: Vec::new(),
        trainer: None,
        notes: None,
    };
    state.store.save_student(&student).await?;
    tracing::info!("Registered student {} ({})", student.name, student.id);

    state.notifier.send_registration_notification(&form).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Registration notification sent"
    }))
    .into_response())
}
