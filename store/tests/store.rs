use campus_insights::mail::classify;
use campus_store::Query;
use campus_store::RecordStoreExt;
use campus_store::StoreError;
use campus_store::factory::Backend;
use campus_store::factory::open_store;
use campus_store::records::*;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use pretty_assertions::assert_eq;

fn backends() -> Vec<Backend> {
    #[cfg(feature = "sqlite")]
    {
        vec![Backend::Jsonl, Backend::Sqlite]
    }
    #[cfg(not(feature = "sqlite"))]
    {
        vec![Backend::Jsonl]
    }
}

fn t0() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-01-01T00:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn listing(id: &str, category: &str, status: &str, price: f64, age_days: i64) -> MarketplaceListing {
    MarketplaceListing {
        id: id.to_string(),
        title: format!("listing-{id}"),
        description: "test".to_string(),
        category: category.to_string(),
        price,
        condition: Some("good".to_string()),
        status: status.to_string(),
        contact_info: None,
        created_by: Some("u1".to_string()),
        created_at: t0() - Duration::days(age_days),
    }
}

#[test]
fn insert_fetch_filter_order_limit() {
    for be in backends() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(dir.path(), Some(be)).unwrap();

        store.insert(&listing("a", "books", "available", 450.0, 3)).unwrap();
        store.insert(&listing("b", "electronics", "sold", 1200.0, 1)).unwrap();
        store.insert(&listing("c", "books", "available", 300.0, 1)).unwrap();
        store.insert(&listing("d", "furniture", "available", 800.0, 2)).unwrap();

        let available: Vec<MarketplaceListing> = store
            .fetch(&Query::new().eq("status", "available").order_by_desc("created_at"))
            .unwrap();
        let ids: Vec<&str> = available.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "d", "a"]);

        let cheapest: Vec<MarketplaceListing> = store
            .fetch(&Query::new().order_by("price").limit(2))
            .unwrap();
        let ids: Vec<&str> = cheapest.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a"]);

        let pricey: Vec<MarketplaceListing> =
            store.fetch(&Query::new().gte("price", 800)).unwrap();
        assert_eq!(pricey.len(), 2);

        let got: Option<MarketplaceListing> = store.get("d").unwrap();
        assert_eq!(got, Some(listing("d", "furniture", "available", 800.0, 2)));
    }
}

#[test]
fn duplicate_ids_are_rejected_per_collection() {
    for be in backends() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(dir.path(), Some(be)).unwrap();
        store.insert(&listing("a", "books", "available", 1.0, 0)).unwrap();

        let err = store
            .insert(&listing("a", "books", "available", 2.0, 0))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::Duplicate { .. })
        ));

        // Same id in another collection is fine.
        let course = Course {
            id: "a".to_string(),
            code: "CS201".to_string(),
            name: "Data Structures".to_string(),
            instructor: None,
            created_at: t0(),
        };
        store.insert(&course).unwrap();
    }
}

#[test]
fn booleans_and_nulls_filter() {
    for be in backends() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(dir.path(), Some(be)).unwrap();
        for (id, resolved) in [("1", false), ("2", true), ("3", false)] {
            store
                .insert(&LostFoundItem {
                    id: id.to_string(),
                    title: format!("item {id}"),
                    description: String::new(),
                    status: "lost".to_string(),
                    location: None,
                    contact_info: None,
                    resolved,
                    created_by: None,
                    created_at: t0(),
                })
                .unwrap();
        }
        let open: Vec<LostFoundItem> = store.fetch(&Query::new().eq("resolved", false)).unwrap();
        assert_eq!(open.len(), 2);

        for (id, score) in [("g1", Some(80.0)), ("g2", None)] {
            store
                .insert(&Grade {
                    id: id.to_string(),
                    assignment_id: "a1".to_string(),
                    student_id: "s1".to_string(),
                    score,
                    feedback: None,
                    graded_at: t0(),
                })
                .unwrap();
        }
        let marked: Vec<Grade> = store
            .fetch(&Query::new().eq("student_id", "s1").not_null("score"))
            .unwrap();
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0].id, "g1");
    }
}

#[test]
fn invalid_field_names_are_refused() {
    for be in backends() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(dir.path(), Some(be)).unwrap();
        let err = store
            .select_rows("marketplace", &Query::new().order_by("price; DROP TABLE records"))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::InvalidField(_))
        ));
    }
}

#[test]
fn mail_summary_keeps_classification_columns() {
    for be in backends() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(dir.path(), Some(be)).unwrap();
        let body = "Annual fest from April 1-3. Register for events. Food stalls open.";
        let summary = MailSummary::new(
            "Campus Fest".to_string(),
            body.to_string(),
            classify("Campus Fest", body),
            Some("u1".to_string()),
        );
        store.insert(&summary).unwrap();

        let row = store
            .select_rows("mail_summaries", &Query::new())
            .unwrap()
            .remove(0);
        assert_eq!(row["category"], "events");
        assert_eq!(row["priority"], 1);
        assert_eq!(row["tags"], serde_json::json!(["fest", "event"]));
        assert_eq!(row["summary"], " Register for events.");
    }
}

#[test]
fn delete_export_import_stats() {
    for be in backends() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(dir.path(), Some(be)).unwrap();
        store.insert(&listing("a", "books", "available", 1.0, 0)).unwrap();
        store.insert(&listing("b", "books", "available", 2.0, 0)).unwrap();

        assert!(store.delete_row("marketplace", "a").unwrap());
        assert!(!store.delete_row("marketplace", "a").unwrap());

        let stats = store.stats().unwrap();
        assert_eq!(stats["total"], 1);
        assert_eq!(stats["by_collection"]["marketplace"], 1);

        let mut buf = Vec::new();
        store.export(&mut buf).unwrap();

        let dir2 = tempfile::tempdir().unwrap();
        let store2 = open_store(dir2.path(), Some(be)).unwrap();
        store2.insert(&listing("b", "books", "sold", 9.0, 0)).unwrap();
        assert_eq!(store2.import(&mut buf.as_slice()).unwrap(), 1);

        // Import replaces the existing row with the same id.
        let b: Option<MarketplaceListing> = store2.get("b").unwrap();
        assert_eq!(b.map(|l| l.status), Some("available".to_string()));
        assert_eq!(store2.stats().unwrap()["total"], 1);
    }
}
