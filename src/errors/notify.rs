use thiserror::Error;

// Failure domain of the notification dispatcher. Configuration gaps are kept
// apart from provider rejections so the endpoints can answer "couldn't even
// compose" differently from "composed but couldn't deliver".
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Email sender or admin address is not configured")]
    MissingEmailConfig,

    #[error("No webhook configured for {0}. Set one up on the settings page first")]
    MissingWebhook(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Email provider rejected the message (status {status}): {body}")]
    Provider { status: u16, body: String },

    #[error("Webhook returned status {0}")]
    Webhook(u16),

    #[error("Delivery request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

pub type NotifyResult<T> = Result<T, NotifyError>;
