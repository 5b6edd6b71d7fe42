use campus_insights::places::Place;
use campus_insights::places::Rated;
use campus_insights::places::recommend;
use pretty_assertions::assert_eq;

fn place(name: &str, rating: f64, review_count: u64) -> Place {
    Place {
        name: name.to_string(),
        rating,
        review_count,
    }
}

fn nearby() -> Vec<Place> {
    vec![
        place("Cafe Coffee Day", 4.2, 45),
        place("Punjabi Dhaba", 4.5, 78),
        place("Gurudwara Sahib", 4.8, 156),
        place("Sukhna Lake", 4.3, 34),
        place("Campus Bookstore", 4.0, 23),
        place("Burger Point", 3.8, 92),
    ]
}

fn names(ranked: &[&Place]) -> Vec<String> {
    ranked.iter().map(|p| p.name.clone()).collect()
}

#[test]
fn top_three_by_popularity() {
    let places = nearby();
    let top = recommend(&places, 3);
    assert_eq!(
        names(&top),
        vec!["Gurudwara Sahib", "Punjabi Dhaba", "Burger Point"]
    );
}

#[test]
fn full_ranking_is_a_sorted_permutation() {
    let places = nearby();
    let ranked = recommend(&places, places.len());
    assert_eq!(ranked.len(), places.len());
    for p in &places {
        assert_eq!(ranked.iter().filter(|r| r.name == p.name).count(), 1);
    }
    for pair in ranked.windows(2) {
        assert!(pair[0].popularity() >= pair[1].popularity());
    }
}

#[test]
fn ties_keep_input_order() {
    let places = vec![
        place("a", 2.0, 10),
        place("b", 4.0, 5),
        place("c", 1.0, 20),
        place("d", 5.0, 10),
    ];
    assert_eq!(names(&recommend(&places, 4)), vec!["d", "a", "b", "c"]);
}

#[test]
fn unreviewed_places_rank_last() {
    let places = vec![place("new", 0.0, 0), place("old", 3.0, 1)];
    assert_eq!(names(&recommend(&places, 2)), vec!["old", "new"]);
}

#[test]
fn k_larger_than_input_or_zero() {
    let places = nearby();
    assert_eq!(recommend(&places, 100).len(), places.len());
    assert!(recommend(&places, 0).is_empty());
    let empty: Vec<Place> = Vec::new();
    assert!(recommend(&empty, 3).is_empty());
}

#[test]
fn input_is_not_reordered() {
    let places = nearby();
    let before = places.clone();
    let _ = recommend(&places, 2);
    assert_eq!(places, before);
}
