mod billing;
mod config;
mod errors;
mod handlers;
mod middleware;
mod models;
mod policy;
mod services;

use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_sessions::cookie::SameSite;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::{
    config::Config,
    services::{CenterStore, Notifier},
};

// Application state shared between handlers
#[derive(Clone)]
pub struct AppState {
    pub store: CenterStore,
    pub notifier: Notifier,
    pub config: Config,
}

#[tokio::main]
async fn main() {
    // Initialize basic tracing subscriber
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::load().expect("Failed to load configuration");

    // Initialize the document-store client
    let store_client = Arc::new(
        redis::Client::open(config.store.url.clone()).expect("Failed to connect to the store"),
    );
    let store = CenterStore::new(store_client);

    // Dispatcher configuration is injected here once; nothing mutates it later.
    let notifier = Notifier::new(config.email.clone());

    let state = AppState {
        store,
        notifier,
        config: config.clone(),
    };

    // Session store setup
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_name("session");

    // Create router with all routes
    let app = Router::new()
        // Page routes
        .route("/", get(handlers::serve_home))
        .route("/studentinformation", get(handlers::serve_student_information))
        .route("/attendance", get(handlers::serve_attendance))
        .route("/tasks", get(handlers::serve_tasks))
        .route("/accounting", get(handlers::serve_accounting))
        .route("/settings", get(handlers::serve_settings))

        // Auth routes
        .route(
            "/auth/signin",
            get(handlers::serve_signin_page).post(handlers::handle_signin),
        )
        .route("/auth/signout", get(handlers::handle_signout))

        // API routes (exempt from the access middleware, see middleware::enforce_access)
        .route("/api/remind-payment", get(handlers::remind_payment))
        .route(
            "/api/registration-notification",
            post(handlers::notify_registration),
        )
        .route("/api/daily-report", post(handlers::send_daily_report))

        // Static files
        .nest_service("/static", ServeDir::new("static"))

        // Add middleware
        .layer(from_fn(middleware::enforce_access))
        .layer(session_layer)

        // Add state
        .with_state(state);

    println!("Server running");
    let listener = tokio::net::TcpListener::bind(format!(
        "{}:{}",
        config.server.host, config.server.port
    ))
    .await
    .expect("Failed to bind server");

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Failed to start server");
}
