//! Deterministic heuristics behind the campus companion.
//!
//! Everything in this crate is pure: no I/O, no clock reads, no shared state.
//! Callers fetch records from a store, hand them to these functions and
//! render whatever comes back.

pub mod grades;
pub mod mail;
pub mod places;
pub mod planner;

pub use grades::GradeRecord;
pub use grades::Graded;
pub use grades::Trend;
pub use mail::Category;
pub use mail::MailClassification;
pub use places::Place;
pub use places::Rated;
pub use planner::StudyPlan;
