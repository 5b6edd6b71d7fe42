//! Record types persisted by the store, one collection each.

use campus_insights::grades::GradeRecord;
use campus_insights::mail::Category;
use campus_insights::mail::MailClassification;
use campus_insights::places::Rated;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// A type stored in a named collection and keyed by a string id.
pub trait Record: Serialize + DeserializeOwned {
    const COLLECTION: &'static str;

    fn id(&self) -> &str;
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

macro_rules! record {
    ($ty:ty, $collection:literal) => {
        impl Record for $ty {
            const COLLECTION: &'static str = $collection;

            fn id(&self) -> &str {
                &self.id
            }
        }
    };
}

/// Collections known to this crate, in dashboard order.
pub const COLLECTIONS: &[&str] = &[
    MailSummary::COLLECTION,
    MessMenu::COLLECTION,
    Course::COLLECTION,
    TimetableEntry::COLLECTION,
    Assignment::COLLECTION,
    Grade::COLLECTION,
    NearbyPlace::COLLECTION,
    MarketplaceListing::COLLECTION,
    LostFoundItem::COLLECTION,
    TravelShare::COLLECTION,
];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MailSummary {
    pub id: String,
    pub title: String,
    pub original_content: String,
    pub summary: String,
    pub category: Category,
    pub priority: u8,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}
record!(MailSummary, "mail_summaries");

impl MailSummary {
    pub fn new(
        title: String,
        original_content: String,
        classification: MailClassification,
        created_by: Option<String>,
    ) -> Self {
        Self {
            id: new_id(),
            title,
            original_content,
            summary: classification.summary,
            category: classification.category,
            priority: classification.priority,
            tags: classification.tags,
            created_by,
            created_at: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MessMenu {
    pub id: String,
    pub meal_type: String,
    #[serde(default)]
    pub items: Vec<String>,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}
record!(MessMenu, "mess_menu");

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Course {
    pub id: String,
    pub code: String,
    pub name: String,
    pub instructor: Option<String>,
    pub created_at: DateTime<Utc>,
}
record!(Course, "courses");

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TimetableEntry {
    pub id: String,
    pub user_id: String,
    pub course_id: String,
    /// 1 = Monday .. 7 = Sunday.
    pub day_of_week: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub room: Option<String>,
    pub created_at: DateTime<Utc>,
}
record!(TimetableEntry, "timetable");

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Assignment {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub total_points: u32,
    pub created_at: DateTime<Utc>,
}
record!(Assignment, "assignments");

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Grade {
    pub id: String,
    pub assignment_id: String,
    pub student_id: String,
    /// `None` until the work has been marked.
    pub score: Option<f64>,
    pub feedback: Option<String>,
    pub graded_at: DateTime<Utc>,
}
record!(Grade, "grades");

impl Grade {
    /// This grade scored against the assignment's point total, if marked.
    pub fn against(&self, assignment: &Assignment) -> Option<GradeRecord> {
        self.score.map(|score| GradeRecord {
            score,
            max_score: f64::from(assignment.total_points),
            graded_at: self.graded_at,
        })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NearbyPlace {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub vibe_tags: Vec<String>,
    pub rating: f64,
    pub review_count: u64,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}
record!(NearbyPlace, "nearby_places");

impl Rated for NearbyPlace {
    fn rating(&self) -> f64 {
        self.rating
    }

    fn review_count(&self) -> u64 {
        self.review_count
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MarketplaceListing {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub condition: Option<String>,
    /// `available` or `sold`.
    pub status: String,
    pub contact_info: Option<String>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}
record!(MarketplaceListing, "marketplace");

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LostFoundItem {
    pub id: String,
    pub title: String,
    pub description: String,
    /// `lost` or `found`.
    pub status: String,
    pub location: Option<String>,
    pub contact_info: Option<String>,
    pub resolved: bool,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}
record!(LostFoundItem, "lost_found");

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TravelShare {
    pub id: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub seats_available: u32,
    pub cost_per_person: Option<f64>,
    pub pickup_location: String,
    pub notes: Option<String>,
    #[serde(default)]
    pub passengers: Vec<String>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}
record!(TravelShare, "travel_sharing");
