//! GPA and performance trend over a student's graded work.

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Anything carrying a score out of a maximum.
///
/// `max_score` must be positive; the functions here do not check it.
pub trait Graded {
    fn score(&self) -> f64;
    fn max_score(&self) -> f64;
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GradeRecord {
    pub score: f64,
    pub max_score: f64,
    pub graded_at: DateTime<Utc>,
}

impl Graded for GradeRecord {
    fn score(&self) -> f64 {
        self.score
    }

    fn max_score(&self) -> f64 {
        self.max_score
    }
}

impl<G: Graded + ?Sized> Graded for &G {
    fn score(&self) -> f64 {
        (**self).score()
    }

    fn max_score(&self) -> f64 {
        (**self).max_score()
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

impl Trend {
    pub fn as_str(self) -> &'static str {
        match self {
            Trend::Improving => "improving",
            Trend::Declining => "declining",
            Trend::Stable => "stable",
        }
    }
}

/// Size of the "recent" and "older" windows compared by [`trend`].
pub const TREND_WINDOW: usize = 3;

/// Mean percentage divided by ten, rounded to two decimals. Zero when there
/// is nothing to average.
pub fn gpa<G: Graded>(records: &[G]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let total: f64 = records
        .iter()
        .map(|g| g.score() / g.max_score() * 100.0)
        .sum();
    let mean = total / records.len() as f64;
    round_to(mean / 10.0, 2)
}

/// Compares the mean raw score of the newest [`TREND_WINDOW`] records with the
/// window before it. `records` must be ordered newest first.
pub fn trend<G: Graded>(records: &[G]) -> Trend {
    if records.len() < 2 {
        return Trend::Stable;
    }
    let recent_end = records.len().min(TREND_WINDOW);
    let older_end = records.len().min(TREND_WINDOW * 2);
    let recent = mean_score(&records[..recent_end]);
    let older = if older_end > recent_end {
        mean_score(&records[recent_end..older_end])
    } else {
        recent
    };
    tracing::trace!(recent, older, "grade trend windows");

    if recent > older {
        Trend::Improving
    } else if recent < older {
        Trend::Declining
    } else {
        Trend::Stable
    }
}

/// Score as a percentage of the maximum, rounded to one decimal.
pub fn percentage(score: f64, max_score: f64) -> f64 {
    round_to(score / max_score * 100.0, 1)
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum GradeBand {
    Excellent,
    Good,
    Fair,
    NeedsWork,
}

impl GradeBand {
    pub fn from_percentage(pct: f64) -> Self {
        if pct >= 90.0 {
            GradeBand::Excellent
        } else if pct >= 75.0 {
            GradeBand::Good
        } else if pct >= 60.0 {
            GradeBand::Fair
        } else {
            GradeBand::NeedsWork
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GradeBand::Excellent => "excellent",
            GradeBand::Good => "good",
            GradeBand::Fair => "fair",
            GradeBand::NeedsWork => "needs-work",
        }
    }
}

pub fn trend_advice(trend: Trend) -> &'static str {
    match trend {
        Trend::Improving => "Your recent trend is positive. Great momentum!",
        Trend::Declining => {
            "Your recent trend is concerning. Focus on fundamentals and seek help if needed."
        }
        Trend::Stable => "Your recent trend is steady.",
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GradeReport {
    pub gpa: f64,
    pub trend: Trend,
    pub advice: String,
    pub graded: usize,
}

/// GPA, trend and advice for `records`, ordered newest first.
pub fn report<G: Graded>(records: &[G]) -> GradeReport {
    let trend = trend(records);
    GradeReport {
        gpa: gpa(records),
        trend,
        advice: trend_advice(trend).to_string(),
        graded: records.len(),
    }
}

fn mean_score<G: Graded>(records: &[G]) -> f64 {
    records.iter().map(|g| g.score()).sum::<f64>() / records.len() as f64
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
