use chrono::{Duration, NaiveDate};

use crate::models::{PaymentStatus, Student};

/// Days a student may remain unpaid after their start date before the
/// account counts as overdue.
pub const OVERDUE_GRACE_DAYS: i64 = 14;

/// Parses a `YYYY-MM-DD` date, falling back to `now` when the value is
/// missing or malformed.
///
/// The fallback means a record with a broken start date can never look
/// overdue; detection stays permissive instead of failing the whole batch.
pub fn parse_date_or_now(raw: Option<&str>, now: NaiveDate) -> NaiveDate {
    raw.and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .unwrap_or(now)
}

/// Selects the students whose tuition payment is overdue as of `as_of`.
///
/// A student is overdue iff their payment status is not `paid` and their
/// start date is at least fourteen days before `as_of`. Input order is
/// preserved; nothing is mutated or written back.
///
/// # Arguments
///
/// * `students` - Snapshot of the full student roster.
/// * `as_of` - The evaluation date, normally today.
///
/// # Returns
///
/// The overdue subset, in roster order.
pub fn detect_overdue(students: &[Student], as_of: NaiveDate) -> Vec<Student> {
    let threshold = as_of - Duration::days(OVERDUE_GRACE_DAYS);

    students
        .iter()
        .filter(|student| {
            student.payment_status != PaymentStatus::Paid
                && parse_date_or_now(student.start_date.as_deref(), as_of) <= threshold
        })
        .cloned()
        .collect()
}
