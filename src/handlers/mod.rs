mod auth;
mod pages;
mod registration;
mod reminder;
mod report;

pub use auth::{handle_signin, handle_signout, serve_signin_page};
pub use pages::{
    serve_accounting, serve_attendance, serve_home, serve_settings, serve_student_information,
    serve_tasks,
};
pub use registration::notify_registration;
pub use reminder::remind_payment;
pub use report::send_daily_report;
