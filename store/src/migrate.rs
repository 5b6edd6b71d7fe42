use crate::store::Envelope;
use crate::store::upsert;

/// Migrate a JSONL store file into a SQLite database file.
///
/// - `jsonl_path`: source JSONL (line‑delimited envelopes)
/// - `sqlite_path`: destination SQLite DB (created if missing)
///
/// Returns the count of imported rows.
#[cfg(feature = "sqlite")]
pub fn migrate_jsonl_to_sqlite(
    jsonl_path: &std::path::Path,
    sqlite_path: &std::path::Path,
) -> anyhow::Result<usize> {
    use crate::store::RecordStore;
    use crate::store::sqlite::SqliteRecordStore;

    if let Some(dir) = sqlite_path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let mut input = std::fs::File::open(jsonl_path)?;
    let store = SqliteRecordStore::new(sqlite_path);
    store.import(&mut input)
}

#[cfg(not(feature = "sqlite"))]
pub fn migrate_jsonl_to_sqlite(
    _jsonl_path: &std::path::Path,
    _sqlite_path: &std::path::Path,
) -> anyhow::Result<usize> {
    anyhow::bail!("sqlite backend not compiled; enable with `--features campus-store/sqlite`");
}

/// Rewrite a JSONL file, dropping blank or unparseable lines and keeping only
/// the last envelope for each collection and id.
///
/// Returns `(read, written)` where `read` counts non-blank input lines.
pub fn compact_jsonl(
    input: &std::path::Path,
    output: &std::path::Path,
) -> anyhow::Result<(usize, usize)> {
    let data = match std::fs::read_to_string(input) {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e.into()),
    };
    let mut read = 0usize;
    let mut kept: Vec<Envelope> = Vec::new();
    for line in data.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        read += 1;
        match serde_json::from_str::<Envelope>(line) {
            Ok(envelope) if envelope.id().is_some() => upsert(&mut kept, envelope),
            Ok(_) => tracing::warn!("dropping envelope without id"),
            Err(e) => tracing::warn!("dropping unparseable line: {e}"),
        }
    }

    let mut out = String::new();
    for envelope in &kept {
        out.push_str(&serde_json::to_string(envelope)?);
        out.push('\n');
    }
    if let Some(dir) = output.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(output, out)?;
    Ok((read, kept.len()))
}
