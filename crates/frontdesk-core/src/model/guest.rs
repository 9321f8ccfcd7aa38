// ── Guest domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Quiet hours during which staff should not knock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuietHours {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuestPreferences {
    pub pillow_type: Option<String>,
    pub dietary_restrictions: Vec<String>,
    pub special_requests: Vec<String>,
    /// Present only while do-not-disturb is enabled.
    pub do_not_disturb: Option<QuietHours>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub room_number: Option<String>,
    pub room: Option<String>,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    pub preferences: GuestPreferences,
    pub loyalty_points: i64,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Guest {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }

    /// Whether `now` falls inside the stay window.
    pub fn is_in_house(&self, now: DateTime<Utc>) -> bool {
        match (self.check_in, self.check_out) {
            (Some(from), Some(to)) => from <= now && now < to,
            (Some(from), None) => from <= now,
            _ => false,
        }
    }

    /// Case-insensitive match over name, email, phone and room number.
    pub fn matches_query(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        [
            Some(self.first_name.as_str()),
            Some(self.last_name.as_str()),
            self.email.as_deref(),
            self.phone.as_deref(),
            self.room_number.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&q))
    }
}
