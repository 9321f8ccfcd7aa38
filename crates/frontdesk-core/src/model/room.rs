// ── Room domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Occupancy / service state of a room.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RoomStatus {
    Vacant,
    Occupied,
    Cleaning,
    Maintenance,
}

impl RoomStatus {
    pub fn is_available(self) -> bool {
        matches!(self, Self::Vacant)
    }

    pub fn needs_attention(self) -> bool {
        matches!(self, Self::Cleaning | Self::Maintenance)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomFeatures {
    pub beds: u32,
    pub max_occupancy: u32,
    pub has_balcony: bool,
    pub has_kitchenette: bool,
    pub amenities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Housekeeping {
    pub last_cleaned: Option<DateTime<Utc>>,
    pub next_scheduled: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub room_number: Option<String>,
    pub room_name: Option<String>,
    /// Id of the voice assistant device installed in the room.
    pub device_id: Option<String>,
    pub floor: Option<i64>,
    pub room_type: Option<String>,
    /// `None` when the backend sent no status or one we don't recognise.
    pub status: Option<RoomStatus>,
    pub current_guest: Option<String>,
    pub features: RoomFeatures,
    pub housekeeping: Housekeeping,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Room {
    /// "101 (Ocean View)" style label.
    pub fn display_name(&self) -> String {
        match (&self.room_number, &self.room_name) {
            (Some(num), Some(name)) if !name.is_empty() => format!("{num} ({name})"),
            (Some(num), _) => num.clone(),
            (None, Some(name)) => name.clone(),
            (None, None) => self.id.clone(),
        }
    }
}
