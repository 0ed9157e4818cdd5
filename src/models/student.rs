use serde::{Deserialize, Serialize};

// Tuition billing state as recorded on the student document. This field is
// authoritative; nothing in this service writes it back.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Overdue,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    pub target_score: Option<f64>,
    // Calendar date in YYYY-MM-DD form; may be absent or malformed on old
    // records, see billing::parse_date_or_now.
    pub start_date: Option<String>,
    pub study_duration: Option<u32>,   // months
    pub tuition_fee: Option<i64>,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub payment_dates: Vec<String>,
    pub trainer: Option<String>,
    pub notes: Option<String>,
}
