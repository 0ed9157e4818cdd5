use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SigninForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    pub dob: Option<String>,
    pub province: Option<String>,
    pub target_score: Option<f64>,
    pub tuition_fee: Option<i64>,
}
