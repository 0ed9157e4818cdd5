use std::fmt::Write;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;

use crate::config::EmailConfig;
use crate::errors::{NotifyError, NotifyResult};
use crate::models::{RegistrationForm, Student, TaskRecord, TaskStatus};

// The daily-report embed lists at most this many completed tasks.
const COMPLETED_TITLES_LIMIT: usize = 10;

/// Outbound notification dispatcher. Holds its configuration explicitly;
/// nothing here touches process-global state.
#[derive(Clone)]
pub struct Notifier {
    http: reqwest::Client,
    email: EmailConfig,
}

impl Notifier {
    pub fn new(email: EmailConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            email,
        }
    }

    /// Sends one combined reminder email covering the whole overdue batch.
    ///
    /// Exactly one message goes to the provider regardless of how many
    /// students are listed. Provider rejections surface as
    /// `NotifyError::Provider` with the status and body preserved for the
    /// log; there is no retry.
    pub async fn send_payment_reminder(
        &self,
        students: &[Student],
    ) -> NotifyResult<serde_json::Value> {
        require_email_config(&self.email)?;

        let (text, html) = build_reminder_body(students);
        tracing::info!(
            "Sending payment reminder covering {} students to {}",
            students.len(),
            self.email.admin_address
        );
        self.send_email("Tuition payment reminder", &text, &html).await
    }

    /// Sends one email per registration event. Required fields are checked
    /// before anything is composed; an invalid record never reaches the
    /// provider.
    pub async fn send_registration_notification(
        &self,
        form: &RegistrationForm,
    ) -> NotifyResult<serde_json::Value> {
        validate_registration(form)?;
        require_email_config(&self.email)?;

        let (text, html) = build_registration_body(form);
        let subject = format!("New student registration: {}", form.name);
        self.send_email(&subject, &text, &html).await
    }

    /// Posts the end-of-day summary for `username` to their webhook.
    ///
    /// Any non-success response counts as a delivery failure; no retry, no
    /// backoff.
    pub async fn send_daily_report(
        &self,
        username: &str,
        webhook_url: &str,
        tasks: &[TaskRecord],
        now: DateTime<Utc>,
    ) -> NotifyResult<()> {
        let summary = summarize_tasks(tasks, username, now.date_naive());
        let payload = build_report_payload(username, &summary, now);

        let response = self.http.post(webhook_url).json(&payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Webhook(status.as_u16()));
        }

        tracing::info!(
            "Delivered daily report for {} ({} tasks due today)",
            username,
            summary.total
        );
        Ok(())
    }

    async fn send_email(
        &self,
        subject: &str,
        text: &str,
        html: &str,
    ) -> NotifyResult<serde_json::Value> {
        let response = self
            .http
            .post(format!("{}/emails", self.email.api_url))
            .bearer_auth(&self.email.api_key)
            .json(&json!({
                "from": self.email.sender,
                "to": [self.email.admin_address],
                "subject": subject,
                "text": text,
                "html": html,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

/// Checks the fields a registration notification cannot be composed without.
pub fn validate_registration(form: &RegistrationForm) -> NotifyResult<()> {
    if form.name.trim().is_empty() {
        return Err(NotifyError::MissingField("name"));
    }
    if form.phone.trim().is_empty() {
        return Err(NotifyError::MissingField("phone"));
    }
    Ok(())
}

fn require_email_config(email: &EmailConfig) -> NotifyResult<()> {
    if email.sender.trim().is_empty() || email.admin_address.trim().is_empty() {
        return Err(NotifyError::MissingEmailConfig);
    }
    Ok(())
}

/// Same-day task digest for one principal.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DailySummary {
    pub done: usize,
    pub in_progress: usize,
    pub todo: usize,
    pub total: usize,
    pub completed_titles: Vec<String>,
}

/// Counts the tasks assigned to `principal` that are due on `day`, keeping
/// the first ten completed titles for the report body. Tasks without a
/// parseable due date are left out of the digest.
pub fn summarize_tasks(tasks: &[TaskRecord], principal: &str, day: NaiveDate) -> DailySummary {
    let mut summary = DailySummary::default();

    for task in tasks {
        if !task.assignees.iter().any(|a| a == principal) {
            continue;
        }
        let due = task
            .due_date
            .as_deref()
            .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok());
        if due != Some(day) {
            continue;
        }

        summary.total += 1;
        match task.status {
            TaskStatus::Done => {
                summary.done += 1;
                if summary.completed_titles.len() < COMPLETED_TITLES_LIMIT {
                    summary.completed_titles.push(task.title.clone());
                }
            }
            TaskStatus::InProgress => summary.in_progress += 1,
            TaskStatus::Todo => summary.todo += 1,
        }
    }

    summary
}

// One plain-text part and one HTML part listing every overdue student.
fn build_reminder_body(students: &[Student]) -> (String, String) {
    let mut text = String::new();
    let mut items = String::new();

    let _ = writeln!(
        text,
        "The following students have tuition payments outstanding:"
    );
    let _ = writeln!(text);

    for student in students {
        let started = student.start_date.as_deref().unwrap_or("unknown start date");
        let fee = student
            .tuition_fee
            .map(|f| f.to_string())
            .unwrap_or_else(|| "not set".to_string());
        let notes = student
            .notes
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("No notes");

        let _ = writeln!(
            text,
            "- {} (started {}), tuition fee {}: {}",
            student.name, started, fee, notes
        );
        let _ = write!(
            items,
            "<li><strong>{}</strong> (started {}), tuition fee {}: {}</li>",
            student.name, started, fee, notes
        );
    }

    let html = format!(
        "<p>The following students have tuition payments outstanding:</p><ul>{}</ul>",
        items
    );
    (text, html)
}

fn build_registration_body(form: &RegistrationForm) -> (String, String) {
    let dob = form.dob.as_deref().unwrap_or("-");
    let province = form.province.as_deref().unwrap_or("-");
    let target = form
        .target_score
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".to_string());
    let fee = form
        .tuition_fee
        .map(|f| f.to_string())
        .unwrap_or_else(|| "-".to_string());

    let mut text = String::new();
    let _ = writeln!(text, "A new student has registered.");
    let _ = writeln!(text);
    let _ = writeln!(text, "Name: {}", form.name);
    let _ = writeln!(text, "Phone: {}", form.phone);
    let _ = writeln!(text, "Date of birth: {}", dob);
    let _ = writeln!(text, "Province: {}", province);
    let _ = writeln!(text, "Target score: {}", target);
    let _ = writeln!(text, "Tuition fee: {}", fee);

    let html = format!(
        "<p>A new student has registered.</p>\
         <ul><li>Name: {}</li><li>Phone: {}</li><li>Date of birth: {}</li>\
         <li>Province: {}</li><li>Target score: {}</li><li>Tuition fee: {}</li></ul>",
        form.name, form.phone, dob, province, target, fee
    );
    (text, html)
}

fn build_report_payload(
    username: &str,
    summary: &DailySummary,
    now: DateTime<Utc>,
) -> serde_json::Value {
    let completed = if summary.completed_titles.is_empty() {
        "Nothing completed yet".to_string()
    } else {
        summary
            .completed_titles
            .iter()
            .map(|title| format!("- {}", title))
            .collect::<Vec<_>>()
            .join("\n")
    };

    json!({
        "content": format!("End-of-day report from {}", username),
        "embeds": [{
            "title": "Daily task report",
            "fields": [
                {
                    "name": "Summary",
                    "value": format!(
                        "Done: {}\nIn progress: {}\nTo do: {}\nTotal: {}",
                        summary.done, summary.in_progress, summary.todo, summary.total
                    ),
                },
                {
                    "name": "Completed today",
                    "value": completed,
                },
            ],
            "timestamp": now.to_rfc3339(),
        }]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentStatus;

    fn task(id: &str, status: TaskStatus, due: Option<&str>, assignees: &[&str]) -> TaskRecord {
        TaskRecord {
            id: id.to_string(),
            title: format!("Task {}", id),
            status,
            due_date: due.map(|d| d.to_string()),
            assignees: assignees.iter().map(|a| a.to_string()).collect(),
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
    }

    #[test]
    fn summary_counts_by_status_for_the_principal_only() {
        let tasks = vec![
            task("1", TaskStatus::Done, Some("2026-03-15"), &["an"]),
            task("2", TaskStatus::InProgress, Some("2026-03-15"), &["an", "binh"]),
            task("3", TaskStatus::Todo, Some("2026-03-15"), &["an"]),
            task("4", TaskStatus::Done, Some("2026-03-15"), &["binh"]),
        ];

        let summary = summarize_tasks(&tasks, "an", day());
        assert_eq!(summary.done, 1);
        assert_eq!(summary.in_progress, 1);
        assert_eq!(summary.todo, 1);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.completed_titles, vec!["Task 1".to_string()]);
    }

    #[test]
    fn summary_ignores_other_days_and_unparseable_due_dates() {
        let tasks = vec![
            task("1", TaskStatus::Done, Some("2026-03-14"), &["an"]),
            task("2", TaskStatus::Done, Some("bad-date"), &["an"]),
            task("3", TaskStatus::Done, None, &["an"]),
        ];

        let summary = summarize_tasks(&tasks, "an", day());
        assert_eq!(summary, DailySummary::default());
    }

    #[test]
    fn completed_titles_are_truncated_to_ten() {
        let tasks: Vec<TaskRecord> = (0..15)
            .map(|i| {
                task(
                    &i.to_string(),
                    TaskStatus::Done,
                    Some("2026-03-15"),
                    &["an"],
                )
            })
            .collect();

        let summary = summarize_tasks(&tasks, "an", day());
        assert_eq!(summary.done, 15);
        assert_eq!(summary.total, 15);
        assert_eq!(summary.completed_titles.len(), 10);
    }

    #[test]
    fn registration_requires_name_and_phone() {
        let form = RegistrationForm {
            name: String::new(),
            phone: "0123".to_string(),
            dob: None,
            province: None,
            target_score: None,
            tuition_fee: None,
        };
        assert!(matches!(
            validate_registration(&form),
            Err(NotifyError::MissingField("name"))
        ));

        let form = RegistrationForm {
            name: "Tran Binh".to_string(),
            phone: "  ".to_string(),
            dob: None,
            province: None,
            target_score: None,
            tuition_fee: None,
        };
        assert!(matches!(
            validate_registration(&form),
            Err(NotifyError::MissingField("phone"))
        ));
    }

    #[test]
    fn email_config_must_name_sender_and_recipient() {
        let complete = EmailConfig {
            api_url: "https://api.example.com".to_string(),
            api_key: "key".to_string(),
            sender: "desk@center.test".to_string(),
            admin_address: "owner@center.test".to_string(),
        };
        assert!(require_email_config(&complete).is_ok());

        let mut missing_sender = complete.clone();
        missing_sender.sender = String::new();
        assert!(matches!(
            require_email_config(&missing_sender),
            Err(NotifyError::MissingEmailConfig)
        ));

        let mut missing_recipient = complete;
        missing_recipient.admin_address = "  ".to_string();
        assert!(matches!(
            require_email_config(&missing_recipient),
            Err(NotifyError::MissingEmailConfig)
        ));
    }

    #[test]
    fn reminder_body_lists_every_student_once() {
        let students = vec![
            Student {
                id: "a".to_string(),
                name: "Ngoc Anh".to_string(),
                target_score: Some(6.5),
                start_date: Some("2026-01-05".to_string()),
                study_duration: Some(3),
                tuition_fee: Some(9_000_000),
                payment_status: PaymentStatus::Pending,
                payment_dates: Vec::new(),
                trainer: Some("Linh".to_string()),
                notes: Some("second reminder".to_string()),
            },
            Student {
                id: "b".to_string(),
                name: "Minh Quan".to_string(),
                target_score: None,
                start_date: None,
                study_duration: None,
                tuition_fee: None,
                payment_status: PaymentStatus::Overdue,
                payment_dates: Vec::new(),
                trainer: None,
                notes: None,
            },
        ];

        let (text, html) = build_reminder_body(&students);
        assert_eq!(text.matches("Ngoc Anh").count(), 1);
        assert_eq!(text.matches("Minh Quan").count(), 1);
        assert!(text.contains("second reminder"));
        assert!(text.contains("No notes"));
        assert!(html.contains("<li><strong>Ngoc Anh</strong>"));
        assert!(html.contains("unknown start date"));
    }

    #[test]
    fn report_payload_carries_summary_and_timestamp() {
        let summary = DailySummary {
            done: 2,
            in_progress: 1,
            todo: 0,
            total: 3,
            completed_titles: vec!["Grade mocks".to_string(), "Call parents".to_string()],
        };
        let now = DateTime::parse_from_rfc3339("2026-03-15T17:00:00Z")
            .unwrap()
            .with_timezone(&Utc);

        let payload = build_report_payload("an", &summary, now);
        assert_eq!(payload["content"], "End-of-day report from an");
        let embed = &payload["embeds"][0];
        assert!(embed["fields"][0]["value"]
            .as_str()
            .unwrap()
            .contains("Done: 2"));
        assert!(embed["fields"][1]["value"]
            .as_str()
            .unwrap()
            .contains("- Grade mocks"));
        assert_eq!(embed["timestamp"], "2026-03-15T17:00:00+00:00");
    }
}
