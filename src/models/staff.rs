use serde::{Deserialize, Serialize};

// Roles controlling route access. Assigned externally on the staff document;
// immutable for the lifetime of a session.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Trainer,
    AdministrativeAssistant,
    Accountant,
    Saler,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub username: String,
    pub password_hash: String,
    // Absent until an admin assigns one; the access policy treats the
    // role-less window as a transitional allow-all state.
    pub role: Option<Role>,
    // Per-person daily-report webhook, configured from the settings page.
    pub webhook_url: Option<String>,
}

// What the session cookie carries between requests.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionUser {
    pub username: String,
    pub role: Option<Role>,
}
