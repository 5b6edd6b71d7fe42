//! Study-time estimates for upcoming assignments.

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Points of work covered by one hour of study.
pub const POINTS_PER_HOUR: u32 = 25;

/// Days before the due date at which preparation should be under way.
pub const LEAD_DAYS: i64 = 2;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudyPlan {
    pub days_until_due: i64,
    pub hours_needed: u32,
    /// Days from `now` until work should start. Negative when the
    /// assignment is already inside the lead window.
    pub start_offset_days: i64,
}

/// Builds a [`StudyPlan`]. `now` is passed in so the result depends only on
/// the arguments.
pub fn plan(total_points: u32, due: DateTime<Utc>, now: DateTime<Utc>) -> StudyPlan {
    let days_until_due = days_until(due, now);
    StudyPlan {
        days_until_due,
        hours_needed: hours_needed(total_points),
        start_offset_days: days_until_due - LEAD_DAYS,
    }
}

pub fn hours_needed(total_points: u32) -> u32 {
    total_points.div_ceil(POINTS_PER_HOUR)
}

/// Whole days between `now` and `due`, any fraction rounding up. Past dates
/// give zero or negative values.
pub fn days_until(due: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (due - now).num_milliseconds() as f64;
    (millis / MILLIS_PER_DAY).ceil() as i64
}

/// How close a due date is, as shown next to each assignment.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DueUrgency {
    Critical,
    Soon,
    Relaxed,
}

impl DueUrgency {
    pub fn from_days(days_until_due: i64) -> Self {
        match days_until_due {
            d if d <= 2 => DueUrgency::Critical,
            d if d <= 5 => DueUrgency::Soon,
            _ => DueUrgency::Relaxed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DueUrgency::Critical => "critical",
            DueUrgency::Soon => "soon",
            DueUrgency::Relaxed => "relaxed",
        }
    }
}
