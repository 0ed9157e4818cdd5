use axum::{
    body::Body,
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::SessionUser;
use crate::policy::{self, Decision};

// API, static and favicon paths bypass policy evaluation entirely.
fn is_exempt(path: &str) -> bool {
    path.starts_with("/api") || path.starts_with("/static") || path == "/favicon.ico"
}

pub async fn enforce_access(session: Session, req: Request<Body>, next: Next) -> Response {
    let path = req.uri().path();

    if is_exempt(path) {
        return next.run(req).await;
    }

    let (has_token, role) = match session.get::<SessionUser>("user_session").await {
        Ok(Some(user)) => (true, user.role),
        _ => (false, None),
    };

    match policy::decide(role, has_token, path) {
        Decision::Allow => next.run(req).await,
        Decision::RedirectTo(target) => {
            tracing::debug!("Redirecting {} to {}", path, target);
            Redirect::to(target).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_static_and_favicon_bypass_the_policy() {
        assert!(is_exempt("/api/remind-payment"));
        assert!(is_exempt("/static/styles.css"));
        assert!(is_exempt("/favicon.ico"));
        assert!(!is_exempt("/attendance"));
        assert!(!is_exempt("/auth/signin"));
        assert!(!is_exempt("/"));
    }
}
