use crate::error::StoreError;
use crate::query::Query;
use crate::records::Record;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Object-safe row interface implemented by each backend. Rows are JSON
/// objects carrying a string `id`, unique within their collection.
pub trait RecordStore: Send + Sync {
    fn insert_row(&self, collection: &str, row: Value) -> anyhow::Result<()>;
    fn select_rows(&self, collection: &str, query: &Query) -> anyhow::Result<Vec<Value>>;
    fn delete_row(&self, collection: &str, id: &str) -> anyhow::Result<bool>;
    fn export(&self, out: &mut dyn std::io::Write) -> anyhow::Result<()>;
    fn import(&self, input: &mut dyn std::io::Read) -> anyhow::Result<usize>;
    fn stats(&self) -> anyhow::Result<Value>;
}

/// Typed helpers over any [`RecordStore`], including `dyn RecordStore`.
pub trait RecordStoreExt: RecordStore {
    fn insert<R: Record>(&self, record: &R) -> anyhow::Result<()> {
        let row = serde_json::to_value(record)?;
        self.insert_row(R::COLLECTION, row)
    }

    fn fetch<R: Record>(&self, query: &Query) -> anyhow::Result<Vec<R>> {
        self.select_rows(R::COLLECTION, query)?
            .into_iter()
            .map(|row| Ok(serde_json::from_value(row)?))
            .collect()
    }

    fn get<R: Record>(&self, id: &str) -> anyhow::Result<Option<R>> {
        let mut rows = self.fetch::<R>(&Query::new().eq("id", id).limit(1))?;
        Ok(rows.pop())
    }
}

impl<S: RecordStore + ?Sized> RecordStoreExt for S {}

/// One line of an export file, and of the JSONL backend.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Envelope {
    pub collection: String,
    pub row: Value,
}

impl Envelope {
    pub fn new(collection: &str, row: Value) -> Result<Self, StoreError> {
        let envelope = Self {
            collection: collection.to_string(),
            row,
        };
        if envelope.id().is_none() {
            return Err(StoreError::MissingId {
                collection: collection.to_string(),
            });
        }
        Ok(envelope)
    }

    pub fn id(&self) -> Option<&str> {
        self.row.get("id").and_then(Value::as_str)
    }

    fn same_key(&self, other: &Envelope) -> bool {
        self.collection == other.collection && self.id() == other.id()
    }
}

/// Parses JSONL envelopes, skipping blank lines. Line numbers in errors are
/// 1-based.
pub fn parse_envelopes(data: &str) -> anyhow::Result<Vec<Envelope>> {
    let mut out = Vec::new();
    for (idx, line) in data.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let envelope: Envelope = serde_json::from_str(line)
            .map_err(|source| StoreError::Corrupt { line: idx + 1, source })?;
        let envelope = Envelope::new(&envelope.collection, envelope.row)?;
        out.push(envelope);
    }
    Ok(out)
}

/// Replaces the entry with the same collection and id, or appends.
pub fn upsert(entries: &mut Vec<Envelope>, envelope: Envelope) {
    match entries.iter_mut().find(|e| e.same_key(&envelope)) {
        Some(existing) => *existing = envelope,
        None => entries.push(envelope),
    }
}

pub(crate) fn stats_json(by_collection: BTreeMap<String, i64>) -> Value {
    let total: i64 = by_collection.values().sum();
    serde_json::json!({
        "total": total,
        "by_collection": by_collection,
    })
}

pub mod jsonl;
#[cfg(feature = "sqlite")]
pub mod sqlite;
