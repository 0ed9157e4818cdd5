mod auth;

pub use auth::enforce_access;
