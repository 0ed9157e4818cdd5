mod notifier;
mod store;

pub use notifier::{validate_registration, Notifier};
pub use store::CenterStore;
