use axum::{
    extract::{Form, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use bcrypt::verify;
use std::fs;
use tower_sessions::Session;

use crate::models::{SessionUser, SigninForm};
use crate::AppState;

pub async fn serve_signin_page() -> impl IntoResponse {
    let signin_html = fs::read_to_string("templates/signin.html")
        .unwrap_or_else(|_| "Error loading sign-in page".to_string());
    Html(signin_html)
}

#[axum::debug_handler]
pub async fn handle_signin(
    State(state): State<AppState>,
    session: Session,
    Form(signin_form): Form<SigninForm>,
) -> Response {
    tracing::info!("Sign-in attempt for {}", signin_form.username);

    match state.store.get_staff(&signin_form.username).await {
        Ok(Some(staff)) => {
            if let Ok(true) = verify(&signin_form.password, &staff.password_hash) {
                let user = SessionUser {
                    username: staff.username.clone(),
                    role: staff.role,
                };
                if let Err(e) = session.insert("user_session", user).await {
                    tracing::error!("Session error: {}", e);
                    return signin_error("Server error");
                }
                Redirect::to("/").into_response()
            } else {
                tracing::info!("Invalid password for {}", signin_form.username);
                signin_error("Password is incorrect, please re-enter")
            }
        }
        Ok(None) => {
            tracing::info!("Unknown username: {}", signin_form.username);
            signin_error("Username does not exist")
        }
        Err(e) => {
            tracing::error!("Store error during sign-in: {}", e);
            signin_error("Server error")
        }
    }
}

#[axum::debug_handler]
pub async fn handle_signout(session: Session) -> Response {
    if let Err(e) = session.remove::<SessionUser>("user_session").await {
        tracing::warn!("Session removal error: {}", e);
    }
    Redirect::to("/auth/signin").into_response()
}

fn signin_error(message: &str) -> Response {
    Redirect::to(&format!(
        "/auth/signin?error={}",
        urlencoding::encode(message)
    ))
    .into_response()
}
