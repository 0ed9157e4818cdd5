use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};
use std::fs;

use crate::errors::{AppError, AppResult};
use crate::AppState;

pub async fn serve_home() -> AppResult<Response> {
    serve_template("home.html")
}

pub async fn serve_attendance() -> AppResult<Response> {
    serve_template("attendance.html")
}

pub async fn serve_tasks() -> AppResult<Response> {
    serve_template("tasks.html")
}

pub async fn serve_accounting() -> AppResult<Response> {
    serve_template("accounting.html")
}

pub async fn serve_settings() -> AppResult<Response> {
    serve_template("settings.html")
}

// Student roster page: template with one table row per student.
pub async fn serve_student_information(State(state): State<AppState>) -> AppResult<Response> {
    let students = state.store.list_students().await?;

    let template = fs::read_to_string("templates/studentinformation.html").map_err(|e| {
        tracing::error!("Failed to read student information template: {}", e);
        AppError::Template(e)
    })?;

    let rows = students
        .iter()
        .map(|student| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{:?}</td><td>{}</td></tr>",
                student.name,
                student.start_date.as_deref().unwrap_or("-"),
                student
                    .tuition_fee
                    .map(|f| f.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                student.payment_status,
                student.trainer.as_deref().unwrap_or("-"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    Ok(Html(template.replace("{{student_rows}}", &rows)).into_response())
}

fn serve_template(name: &str) -> AppResult<Response> {
    let html = fs::read_to_string(format!("templates/{}", name))?;
    Ok(Html(html).into_response())
}
