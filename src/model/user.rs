use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

/// Profile of the authenticated taxpayer (`GET /user`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    #[serde(default)]
    pub last_name: Option<String>,
    pub display_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub phone: String,
    pub inn: String,
    #[serde(default)]
    pub snils: Option<String>,
    pub avatar_exists: bool,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub initial_registration_date: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub registration_date: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub first_receipt_register_time: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub first_receipt_cancel_time: Option<DateTime<FixedOffset>>,
    pub hide_cancelled_receipt: bool,
    /// Sent by the service either as a flag or as a status string
    #[serde(default)]
    pub register_available: Option<RegisterAvailable>,
    #[serde(default)]
    pub status: Option<String>,
    pub restricted_mode: bool,
    #[serde(default)]
    pub pfr_url: Option<String>,
    #[serde(default)]
    pub login: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RegisterAvailable {
    Flag(bool),
    Text(String),
}

/// Empty or unparseable dates are treated as absent.
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok()))
}
