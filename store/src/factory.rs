use crate::store::RecordStore;
use crate::store::jsonl::JsonlRecordStore;

#[cfg(feature = "sqlite")]
use crate::store::sqlite::SqliteRecordStore;

/// Backend selection for record persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Jsonl,
    #[cfg(feature = "sqlite")]
    Sqlite,
}

/// Choose backend using env `CAMPUS_STORE_BACKEND` if present: `sqlite` or `jsonl`.
/// Defaults to JSONL; if `sqlite` is requested but not compiled in, falls back to JSONL.
pub fn choose_backend_from_env() -> Backend {
    let v = std::env::var("CAMPUS_STORE_BACKEND").unwrap_or_default();
    match v.as_str() {
        #[cfg(feature = "sqlite")]
        "sqlite" | "SQLITE" => Backend::Sqlite,
        "" | "jsonl" | "JSONL" => Backend::Jsonl,
        other => {
            tracing::warn!("unknown CAMPUS_STORE_BACKEND {other:?}, using jsonl");
            Backend::Jsonl
        }
    }
}

/// Directory holding the store files under `base`: `<base>/.campus/store/`.
pub fn store_dir(base: &std::path::Path) -> std::path::PathBuf {
    base.join(".campus").join("store")
}

/// Build a store rooted at `<base>/.campus/store/`.
/// Paths can be overridden via env:
/// - `CAMPUS_STORE_DB` for SQLite file path
/// - `CAMPUS_STORE_JSONL` for JSONL file path
pub fn open_store(
    base: &std::path::Path,
    backend: Option<Backend>,
) -> anyhow::Result<Box<dyn RecordStore>> {
    let dir = store_dir(base);
    let be = backend.unwrap_or_else(choose_backend_from_env);
    Ok(match be {
        Backend::Jsonl => {
            let path = std::env::var("CAMPUS_STORE_JSONL")
                .map(std::path::PathBuf::from)
                .unwrap_or_else(|_| dir.join("records.jsonl"));
            tracing::debug!(path = %path.display(), "opening jsonl store");
            Box::new(JsonlRecordStore::new(path))
        }
        #[cfg(feature = "sqlite")]
        Backend::Sqlite => {
            let path = std::env::var("CAMPUS_STORE_DB")
                .map(std::path::PathBuf::from)
                .unwrap_or_else(|_| dir.join("records.db"));
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            tracing::debug!(path = %path.display(), "opening sqlite store");
            Box::new(SqliteRecordStore::new(path))
        }
    })
}
