use super::*;
use std::io::Write as _;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::PoisonError;

/// Every collection in one append-only JSONL file of [`Envelope`]s.
///
/// Inserts append a line; deletes and imports rewrite the file. A missing or
/// empty file is an empty store.
#[derive(Debug)]
pub struct JsonlRecordStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonlRecordStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> anyhow::Result<Vec<Envelope>> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        parse_envelopes(&data)
    }

    fn write_all(&self, entries: &[Envelope]) -> anyhow::Result<()> {
        self.ensure_dir()?;
        let mut out = String::new();
        for entry in entries {
            out.push_str(&serde_json::to_string(entry)?);
            out.push('\n');
        }
        std::fs::write(&self.path, out)?;
        tracing::debug!(path = %self.path.display(), rows = entries.len(), "rewrote jsonl store");
        Ok(())
    }

    fn ensure_dir(&self) -> anyhow::Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}

impl RecordStore for JsonlRecordStore {
    fn insert_row(&self, collection: &str, row: Value) -> anyhow::Result<()> {
        let envelope = Envelope::new(collection, row)?;
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        if self.read_all()?.iter().any(|e| e.same_key(&envelope)) {
            return Err(StoreError::Duplicate {
                collection: collection.to_string(),
                id: envelope.id().unwrap_or_default().to_string(),
            }
            .into());
        }
        self.ensure_dir()?;
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", serde_json::to_string(&envelope)?)?;
        Ok(())
    }

    fn select_rows(&self, collection: &str, query: &Query) -> anyhow::Result<Vec<Value>> {
        query.validate()?;
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let rows = self
            .read_all()?
            .into_iter()
            .filter(|e| e.collection == collection)
            .map(|e| e.row)
            .collect();
        Ok(query.apply(rows))
    }

    fn delete_row(&self, collection: &str, id: &str) -> anyhow::Result<bool> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read_all()?;
        let before = entries.len();
        entries.retain(|e| !(e.collection == collection && e.id() == Some(id)));
        if entries.len() == before {
            return Ok(false);
        }
        self.write_all(&entries)?;
        Ok(true)
    }

    fn export(&self, out: &mut dyn std::io::Write) -> anyhow::Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        for entry in self.read_all()? {
            out.write_all(serde_json::to_string(&entry)?.as_bytes())?;
            out.write_all(b"\n")?;
        }
        Ok(())
    }

    fn import(&self, input: &mut dyn std::io::Read) -> anyhow::Result<usize> {
        let mut data = String::new();
        input.read_to_string(&mut data)?;
        let incoming = parse_envelopes(&data)?;
        let count = incoming.len();

        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read_all()?;
        for envelope in incoming {
            upsert(&mut entries, envelope);
        }
        self.write_all(&entries)?;
        Ok(count)
    }

    fn stats(&self) -> anyhow::Result<Value> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut by_collection = BTreeMap::new();
        for entry in self.read_all()? {
            *by_collection.entry(entry.collection).or_insert(0i64) += 1;
        }
        Ok(stats_json(by_collection))
    }
}
