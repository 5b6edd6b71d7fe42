//! Keyword rules for campus mail: category, priority, tags and a short summary.
//!
//! The rules are plain tables so the resolution order is visible in one place.
//! Matching is case-insensitive substring search, so "exams" counts as "exam".

use serde::Deserialize;
use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Academic,
    Events,
    Urgent,
    General,
}

impl Category {
    /// Display priority, 3 being the most pressing.
    pub fn priority(self) -> u8 {
        match self {
            Category::Urgent => 3,
            Category::Academic => 2,
            Category::Events | Category::General => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Academic => "academic",
            Category::Events => "events",
            Category::Urgent => "urgent",
            Category::General => "general",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the category table: any keyword hit assigns `category`.
#[derive(Debug)]
pub struct CategoryRule {
    pub keywords: &'static [&'static str],
    pub category: Category,
}

/// Evaluated top to bottom; the first rule with a hit wins.
pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        keywords: &["exam", "grade", "assignment"],
        category: Category::Academic,
    },
    CategoryRule {
        keywords: &["event", "fest", "competition"],
        category: Category::Events,
    },
    CategoryRule {
        keywords: &["urgent", "important"],
        category: Category::Urgent,
    },
];

/// Fallback when no rule in [`CATEGORY_RULES`] matches.
pub const DEFAULT_CATEGORY: Category = Category::General;

/// Tags are reported in this order.
pub const TAG_VOCABULARY: &[&str] = &[
    "hackathon",
    "exam",
    "fest",
    "registration",
    "deadline",
    "important",
    "urgent",
    "event",
    "academic",
];

/// A sentence mentioning one of these is preferred for the summary.
pub const SUMMARY_KEYWORDS: &[&str] = &[
    "register",
    "deadline",
    "exam",
    "event",
    "important",
    "urgent",
    "submit",
];

const SUMMARY_SENTENCES: usize = 2;

/// Result of running a mail through [`classify`]. Field names match the
/// `mail_summaries` columns.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MailClassification {
    pub category: Category,
    pub priority: u8,
    pub tags: Vec<String>,
    pub summary: String,
}

pub fn classify(title: &str, body: &str) -> MailClassification {
    let text = format!("{title} {body}").to_lowercase();
    let category = categorize_lowered(&text);
    let tags = extract_tags_lowered(&text);
    let summary = summarize(body);
    tracing::trace!(%category, ?tags, "classified mail");
    MailClassification {
        category,
        priority: category.priority(),
        tags,
        summary,
    }
}

pub fn categorize(text: &str) -> Category {
    categorize_lowered(&text.to_lowercase())
}

pub fn extract_tags(text: &str) -> Vec<String> {
    extract_tags_lowered(&text.to_lowercase())
}

/// Picks at most two sentences of `body`, favouring ones that mention a
/// [`SUMMARY_KEYWORDS`] entry. Bodies of two sentences or fewer come back
/// unchanged.
pub fn summarize(body: &str) -> String {
    let sentences: Vec<&str> = body.split('.').filter(|s| !s.trim().is_empty()).collect();
    if sentences.len() <= SUMMARY_SENTENCES {
        return body.to_string();
    }

    let key_sentences: Vec<&str> = sentences
        .iter()
        .copied()
        .filter(|s| mentions_any(&s.to_lowercase(), SUMMARY_KEYWORDS))
        .take(SUMMARY_SENTENCES)
        .collect();
    let chosen = if key_sentences.is_empty() {
        &sentences[..SUMMARY_SENTENCES]
    } else {
        &key_sentences[..]
    };
    format!("{}.", chosen.join("."))
}

fn categorize_lowered(text: &str) -> Category {
    CATEGORY_RULES
        .iter()
        .find(|rule| mentions_any(text, rule.keywords))
        .map(|rule| rule.category)
        .unwrap_or(DEFAULT_CATEGORY)
}

fn extract_tags_lowered(text: &str) -> Vec<String> {
    TAG_VOCABULARY
        .iter()
        .filter(|tag| text.contains(*tag))
        .map(|tag| (*tag).to_string())
        .collect()
}

fn mentions_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| text.contains(kw))
}
