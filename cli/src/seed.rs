//! Demo data set for trying the app on an empty store.
//!
//! Rows carry fixed ids and are loaded through `import`, so seeding twice
//! leaves a single copy. Dates are relative to the invocation time.

use crate::context::Context;
use campus_insights::mail;
use campus_store::Record;
use campus_store::records::Assignment;
use campus_store::records::Course;
use campus_store::records::Grade;
use campus_store::records::LostFoundItem;
use campus_store::records::MailSummary;
use campus_store::records::MarketplaceListing;
use campus_store::records::MessMenu;
use campus_store::records::NearbyPlace;
use campus_store::records::TimetableEntry;
use campus_store::records::TravelShare;
use campus_store::store::Envelope;
use chrono::Duration;
use chrono::NaiveTime;

const MAILS: [(&str, &str); 3] = [
    (
        "AI Fusion Hackathon 2026 Registration Open",
        "Register for AI Fusion Hackathon by Feb 15th. Build campus super-apps with AI/ML. Teams of up to four. Prizes for the top three teams.",
    ),
    (
        "Mid-Semester Exam Schedule Released",
        "Mid-sem exams from March 1-15. Check timetable for your courses.",
    ),
    (
        "Campus Fest Advitiya 2026",
        "Annual tech-cultural fest from April 1-3. Register for events and competitions. Volunteers should contact the fest committee.",
    ),
];

const MENU: [(&str, &[&str]); 4] = [
    ("Breakfast", &["Parathas", "Curd", "Pickle", "Tea"]),
    ("Dinner", &["Chole", "Rice", "Roti", "Mixed Veg", "Sweet"]),
    ("Lunch", &["Dal", "Rice", "Roti", "Paneer Sabzi", "Salad"]),
    ("Snacks", &["Samosa", "Chai", "Biscuits"]),
];

/// code, name, instructor
const COURSES: [(&str, &str, &str); 5] = [
    ("CS201", "Data Structures", "Dr. Sharma"),
    ("MA201", "Linear Algebra", "Dr. Kumar"),
    ("CS202", "Algorithms", "Dr. Singh"),
    ("CS201L", "Data Structures Lab", "TA Team"),
    ("CS203", "Database Systems", "Dr. Patel"),
];

/// course code, day, start hour, end hour, room
const CLASSES: [(&str, u8, u32, u32, &str); 5] = [
    ("CS201", 1, 9, 10, "LH-101"),
    ("MA201", 1, 10, 11, "LH-102"),
    ("CS202", 2, 9, 10, "LH-103"),
    ("CS201L", 2, 11, 12, "Lab-1"),
    ("CS203", 3, 14, 15, "LH-101"),
];

/// course code, title, description, days until due, points
const UPCOMING: [(&str, &str, &str, i64, u32); 3] = [
    (
        "CS201",
        "Binary Search Tree Implementation",
        "Implement BST with insert, delete, and search operations",
        4,
        100,
    ),
    (
        "MA201",
        "Matrix Operations Assignment",
        "Solve problems on matrix multiplication and determinants",
        7,
        50,
    ),
    (
        "CS202",
        "Sorting Algorithms Analysis",
        "Compare time complexity of various sorting algorithms",
        9,
        75,
    ),
];

/// course code, title, score, feedback, days ago graded
const GRADED: [(&str, &str, f64, &str, i64); 3] = [
    (
        "CS201",
        "Linked List Implementation",
        85.0,
        "Good implementation, but could optimize the delete operation.",
        21,
    ),
    (
        "MA201",
        "Matrix Operations",
        92.0,
        "Excellent work! Very clear solution steps.",
        18,
    ),
    (
        "CS202",
        "Sorting Analysis",
        78.0,
        "Time complexity analysis needs more detail.",
        14,
    ),
];

/// name, category, description, address, tags, rating, reviews
const PLACES: [(&str, &str, &str, &str, &[&str], f64, u64); 6] = [
    (
        "Cafe Coffee Day",
        "cafe",
        "Perfect spot for study sessions with friends. Great coffee and WiFi.",
        "Near Main Market, Rupnagar",
        &["study-friendly", "wifi", "budget"],
        4.2,
        45,
    ),
    (
        "Haveli Restaurant",
        "restaurant",
        "Authentic Punjabi cuisine. Perfect for weekend outings.",
        "GT Road, Ropar",
        &["family-friendly", "punjabi", "outdoor-seating"],
        4.5,
        78,
    ),
    (
        "Anandpur Sahib",
        "attraction",
        "Historic Sikh pilgrimage site. Beautiful architecture and peaceful atmosphere.",
        "Anandpur Sahib, 20km from campus",
        &["historical", "peaceful", "cultural"],
        4.8,
        156,
    ),
    (
        "Ropar Wetland",
        "attraction",
        "Great spot for bird watching and nature walks. Peaceful getaway.",
        "Near Sutlej River",
        &["nature", "peaceful", "photography"],
        4.3,
        34,
    ),
    (
        "The Book Shop",
        "shop",
        "Local bookstore with great collection of novels and academic books.",
        "Main Market, Rupnagar",
        &["books", "quiet", "student-discount"],
        4.0,
        23,
    ),
    (
        "Dominos Pizza",
        "restaurant",
        "Fast food favorite. Late night cravings sorted.",
        "Sector 5, Rupnagar",
        &["fast-food", "late-night", "delivery"],
        3.8,
        92,
    ),
];

/// title, description, category, price, condition, contact
const LISTINGS: [(&str, &str, &str, f64, &str, &str); 3] = [
    (
        "Data Structures Textbook",
        "Cormen book, excellent condition. Used for one semester.",
        "books",
        450.0,
        "excellent",
        "9876543210",
    ),
    (
        "HP Laptop",
        "i5, 8GB RAM, 256GB SSD. 2 years old.",
        "electronics",
        25000.0,
        "good",
        "9876543211",
    ),
    (
        "Study Table",
        "Wooden study table with drawer. Good condition.",
        "furniture",
        1200.0,
        "good",
        "9876543212",
    ),
];

/// title, description, status, location, contact
const LOST_FOUND: [(&str, &str, &str, &str, &str); 2] = [
    (
        "Black Backpack",
        "Lost near Library Block. Contains laptop and notebooks.",
        "lost",
        "Library Block",
        "9876543210",
    ),
    (
        "Calculator Found",
        "Scientific calculator found in Lecture Hall 3.",
        "found",
        "Lecture Hall 3",
        "9876543211",
    ),
];

/// destination, days from today, hour, seats, cost, pickup, notes
const TRIPS: [(&str, i64, u32, u32, f64, &str, &str); 2] = [
    ("Chandigarh Airport", 3, 6, 2, 200.0, "Main Gate", "Early morning flight"),
    ("Delhi", 5, 10, 3, 300.0, "Hostel Block", "Weekend trip"),
];

/// Loads the demo rows and returns how many were written. Timetable and
/// grades are only seeded when a user is known.
pub fn seed(ctx: &Context) -> anyhow::Result<usize> {
    let now = ctx.now;
    let today = ctx.today();
    let user = ctx.user_id();
    let mut rows = Seed::default();

    for (i, (title, body)) in MAILS.iter().enumerate() {
        let mut summary = MailSummary::new(
            title.to_string(),
            body.to_string(),
            mail::classify(title, body),
            user.clone(),
        );
        summary.id = format!("demo-mail-{}", i + 1);
        summary.created_at = now - Duration::hours(i as i64);
        rows.push(&summary)?;
    }

    for (meal_type, items) in MENU {
        rows.push(&MessMenu {
            id: format!("demo-menu-{today}-{}", meal_type.to_lowercase()),
            meal_type: meal_type.to_string(),
            items: items.iter().map(|i| i.to_string()).collect(),
            date: today,
            created_at: now,
        })?;
    }

    for (code, name, instructor) in COURSES {
        rows.push(&Course {
            id: course_id(code),
            code: code.to_string(),
            name: name.to_string(),
            instructor: Some(instructor.to_string()),
            created_at: now,
        })?;
    }

    for (code, title, description, days, points) in UPCOMING {
        rows.push(&Assignment {
            id: format!("demo-assignment-{}", slug(title)),
            course_id: course_id(code),
            title: title.to_string(),
            description: Some(description.to_string()),
            due_date: now + Duration::days(days),
            total_points: points,
            created_at: now,
        })?;
    }

    for (code, title, score, feedback, days_ago) in GRADED {
        let assignment = Assignment {
            id: format!("demo-assignment-{}", slug(title)),
            course_id: course_id(code),
            title: title.to_string(),
            description: None,
            due_date: now - Duration::days(days_ago + 3),
            total_points: 100,
            created_at: now,
        };
        if let Some(student) = &user {
            rows.push(&Grade {
                id: format!("demo-grade-{}-{student}", slug(title)),
                assignment_id: assignment.id.clone(),
                student_id: student.clone(),
                score: Some(score),
                feedback: Some(feedback.to_string()),
                graded_at: now - Duration::days(days_ago),
            })?;
        }
        rows.push(&assignment)?;
    }

    if let Some(student) = &user {
        for (code, day, start, end, room) in CLASSES {
            rows.push(&TimetableEntry {
                id: format!("demo-class-{}-{day}-{student}", slug(code)),
                user_id: student.clone(),
                course_id: course_id(code),
                day_of_week: day,
                start_time: hour(start)?,
                end_time: hour(end)?,
                room: Some(room.to_string()),
                created_at: now,
            })?;
        }
    }

    for (name, category, description, address, tags, rating, reviews) in PLACES {
        rows.push(&NearbyPlace {
            id: format!("demo-place-{}", slug(name)),
            name: name.to_string(),
            category: category.to_string(),
            description: Some(description.to_string()),
            address: Some(address.to_string()),
            vibe_tags: tags.iter().map(|t| t.to_string()).collect(),
            rating,
            review_count: reviews,
            created_by: None,
            created_at: now,
        })?;
    }

    for (title, description, category, price, condition, contact) in LISTINGS {
        rows.push(&MarketplaceListing {
            id: format!("demo-listing-{}", slug(title)),
            title: title.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            price,
            condition: Some(condition.to_string()),
            status: "available".to_string(),
            contact_info: Some(contact.to_string()),
            created_by: user.clone(),
            created_at: now,
        })?;
    }

    for (title, description, status, location, contact) in LOST_FOUND {
        rows.push(&LostFoundItem {
            id: format!("demo-lost-{}", slug(title)),
            title: title.to_string(),
            description: description.to_string(),
            status: status.to_string(),
            location: Some(location.to_string()),
            contact_info: Some(contact.to_string()),
            resolved: false,
            created_by: user.clone(),
            created_at: now,
        })?;
    }

    for (destination, days, at, seats, cost, pickup, notes) in TRIPS {
        rows.push(&TravelShare {
            id: format!("demo-trip-{}", slug(destination)),
            destination: destination.to_string(),
            departure_date: today + Duration::days(days),
            departure_time: hour(at)?,
            seats_available: seats,
            cost_per_person: Some(cost),
            pickup_location: pickup.to_string(),
            notes: Some(notes.to_string()),
            passengers: Vec::new(),
            created_by: user.clone(),
            created_at: now,
        })?;
    }

    let data = rows.into_jsonl()?;
    ctx.store.import(&mut data.as_bytes())
}

#[derive(Default)]
struct Seed(Vec<Envelope>);

impl Seed {
    fn push<R: Record>(&mut self, record: &R) -> anyhow::Result<()> {
        self.0
            .push(Envelope::new(R::COLLECTION, serde_json::to_value(record)?)?);
        Ok(())
    }

    fn into_jsonl(self) -> anyhow::Result<String> {
        let mut out = String::new();
        for envelope in &self.0 {
            out.push_str(&serde_json::to_string(envelope)?);
            out.push('\n');
        }
        Ok(out)
    }
}

fn course_id(code: &str) -> String {
    format!("demo-course-{}", slug(code))
}

fn slug(text: &str) -> String {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

fn hour(h: u32) -> anyhow::Result<NaiveTime> {
    NaiveTime::from_hms_opt(h, 0, 0).ok_or_else(|| anyhow::anyhow!("invalid hour {h}"))
}
