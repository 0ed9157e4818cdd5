mod forms;
mod staff;
mod student;
mod task;

pub use forms::{RegistrationForm, SigninForm};
pub use staff::{Role, SessionUser, Staff};
pub use student::{PaymentStatus, Student};
pub use task::{TaskRecord, TaskStatus};
