//! Popularity ranking for nearby places.

use serde::Deserialize;
use serde::Serialize;
use std::cmp::Ordering;

/// A place that has been reviewed.
pub trait Rated {
    fn rating(&self) -> f64;
    fn review_count(&self) -> u64;

    /// Rating weighted by review volume. Only used for ordering.
    fn popularity(&self) -> f64 {
        self.rating() * self.review_count() as f64
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Place {
    pub name: String,
    pub rating: f64,
    pub review_count: u64,
}

impl Rated for Place {
    fn rating(&self) -> f64 {
        self.rating
    }

    fn review_count(&self) -> u64 {
        self.review_count
    }
}

/// The `k` most popular entries of `places`, most popular first. Equal scores
/// keep their input order; `places` itself is left untouched.
pub fn recommend<T: Rated>(places: &[T], k: usize) -> Vec<&T> {
    let mut ranked: Vec<&T> = places.iter().collect();
    // Stable sort: ties keep input order.
    ranked.sort_by(|a, b| {
        b.popularity()
            .partial_cmp(&a.popularity())
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(k);
    ranked
}
