// ── Booking domain types ──
//
// Bookings arrive from a channel manager and often carry the room only in
// a free-text summary. `room_info()` recovers it.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

const ROOM_TYPE_PATTERN: &str = r"(?i)room\s*type\s*:\s*(.+)";
const AREA_ID_PATTERN: &str = r"(?i)area\s*id\s*:?\s*(\d+)";

static ROOM_TYPE_RE: LazyLock<Regex> = LazyLock::new(|| compile(ROOM_TYPE_PATTERN));
static AREA_ID_RE: LazyLock<Regex> = LazyLock::new(|| compile(AREA_ID_PATTERN));

/// Compile a built-in pattern. The patterns are constants covered by unit
/// tests, so a failure here is a programming error.
#[allow(clippy::expect_used)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in summary pattern is valid")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub room_price: Option<f64>,
    pub stage: Option<String>,
    pub payment_status: Option<String>,
    pub payment_confirmed: bool,
    pub room_number: Option<String>,
    pub room_type: Option<String>,
    pub area_id: Option<String>,
    pub adults: u32,
    pub children_0_5: u32,
    pub children_6_12: u32,
    pub summary: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Room placement of a booking, from structured fields or the summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoomInfo {
    pub room_type: Option<String>,
    pub room_number: Option<String>,
    pub area_id: Option<String>,
}

impl Booking {
    pub fn guests(&self) -> u32 {
        self.adults + self.children_0_5 + self.children_6_12
    }

    /// Number of nights between check-in and check-out, if both are known.
    pub fn nights(&self) -> Option<i64> {
        let (from, to) = (self.check_in?, self.check_out?);
        Some((to.date_naive() - from.date_naive()).num_days())
    }

    /// Structured room fields, falling back to whatever the summary says.
    ///
    /// The summary is scanned line by line for `Room Type: X` and
    /// `Area ID: N` / `AreaId N` (case-insensitive). An area id doubles as
    /// the room number.
    pub fn room_info(&self) -> RoomInfo {
        let parsed = self
            .summary
            .as_deref()
            .map(parse_summary)
            .unwrap_or_default();

        RoomInfo {
            room_type: self.room_type.clone().or(parsed.room_type),
            room_number: self
                .room_number
                .clone()
                .or_else(|| self.area_id.clone())
                .or(parsed.room_number),
            area_id: self.area_id.clone().or(parsed.area_id),
        }
    }
}

fn parse_summary(summary: &str) -> RoomInfo {
    let mut info = RoomInfo::default();

    for line in summary.lines().map(str::trim) {
        if info.room_type.is_none() {
            info.room_type = capture(&ROOM_TYPE_RE, line);
        }
        if info.area_id.is_none() {
            info.area_id = capture(&AREA_ID_RE, line);
            info.room_number.clone_from(&info.area_id);
        }
        if info.room_type.is_some() && info.area_id.is_some() {
            break;
        }
    }
    info
}

fn capture(re: &Regex, line: &str) -> Option<String> {
    re.captures(line)?
        .get(1)
        .map(|m| m.as_str().trim().to_owned())
        .filter(|s| !s.is_empty())
}
