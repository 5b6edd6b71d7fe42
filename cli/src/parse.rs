//! Value parsers for clap arguments.

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::NaiveTime;
use chrono::SubsecRound;
use chrono::Utc;

/// RFC 3339, `YYYY-MM-DDTHH:MM[:SS]` (UTC) or a bare date, which means
/// 23:59 UTC that day. Fractional seconds are dropped.
pub fn datetime(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc).trunc_subsecs(0));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(naive.and_utc());
        }
    }
    let day = date(s)?;
    let end_of_day = NaiveTime::from_hms_opt(23, 59, 0).ok_or("invalid time")?;
    Ok(day.and_time(end_of_day).and_utc())
}

pub fn date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

/// `HH:MM` or `HH:MM:SS`.
pub fn time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|e| format!("expected HH:MM: {e}"))
}

/// Day of week as 1 (Monday) to 7 (Sunday), or a weekday name.
pub fn weekday(s: &str) -> Result<u8, String> {
    if let Ok(n) = s.parse::<u8>() {
        return if (1..=7).contains(&n) {
            Ok(n)
        } else {
            Err(format!("day must be 1-7, got {n}"))
        };
    }
    s.parse::<chrono::Weekday>()
        .map(|d| d.number_from_monday() as u8)
        .map_err(|_| format!("unknown day: {s}"))
}
