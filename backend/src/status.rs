//! Lifecycle status of a course (or a trainer's schedule row) derived from its
//! date range and the current instant. Nothing here is ever persisted.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
    Active,
    Upcoming,
    /// Terminal state. Upstream data sometimes calls it "ended".
    Completed,
}

impl CourseStatus {
    pub fn sort_order(self) -> u8 {
        match self {
            CourseStatus::Active => 0,
            CourseStatus::Upcoming => 1,
            CourseStatus::Completed => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CourseStatus::Active => "Active",
            CourseStatus::Upcoming => "Upcoming",
            CourseStatus::Completed => "Completed",
        }
    }

    /// Maps a stored upstream status string onto the canonical enum.
    pub fn from_hint(hint: &str) -> Option<Self> {
        match hint.trim().to_ascii_lowercase().as_str() {
            "active" => Some(CourseStatus::Active),
            "upcoming" => Some(CourseStatus::Upcoming),
            "completed" | "ended" => Some(CourseStatus::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DerivedStatus {
    pub status: CourseStatus,
    pub sort_order: u8,
}

impl From<CourseStatus> for DerivedStatus {
    fn from(status: CourseStatus) -> Self {
        Self {
            status,
            sort_order: status.sort_order(),
        }
    }
}

/// Parses the date-like strings the admin API hands out.
///
/// Accepts RFC 3339 timestamps, offset-less `YYYY-MM-DDTHH:MM[:SS[.f]]`
/// (read as UTC) and plain `YYYY-MM-DD` (midnight UTC).
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Upcoming when either date is unusable, otherwise by comparing `now`
/// against the closed interval `[start, end]`.
pub fn derive_status(start: &str, end: &str, now: DateTime<Utc>) -> DerivedStatus {
    let (Some(start), Some(end)) = (parse_instant(start), parse_instant(end)) else {
        return CourseStatus::Upcoming.into();
    };

    let status = if now < start {
        CourseStatus::Upcoming
    } else if now > end {
        CourseStatus::Completed
    } else {
        CourseStatus::Active
    };
    status.into()
}

/// Strict "running right now" check: both dates must parse.
pub fn is_active(start: &str, end: &str, now: DateTime<Utc>) -> bool {
    match (parse_instant(start), parse_instant(end)) {
        (Some(start), Some(end)) => start <= now && now <= end,
        _ => false,
    }
}

/// Tie-break key for schedule sorting; a missing start sorts as the epoch.
pub fn start_sort_key(start: &str) -> i64 {
    parse_instant(start).map(|dt| dt.timestamp_millis()).unwrap_or(0)
}
