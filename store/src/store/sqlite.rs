use super::*;
use crate::query::Filter;
use rusqlite::Connection;
use rusqlite::params;
use rusqlite::params_from_iter;
use rusqlite::types::Value as SqlValue;

fn init_db(conn: &Connection) -> anyhow::Result<()> {
    conn.execute_batch(
        r#"
        PRAGMA journal_mode=WAL;
        CREATE TABLE IF NOT EXISTS records (
            collection TEXT NOT NULL,
            id TEXT NOT NULL,
            data TEXT NOT NULL,
            PRIMARY KEY (collection, id)
        );
        CREATE INDEX IF NOT EXISTS idx_records_collection ON records(collection);
        "#,
    )?;
    Ok(())
}

fn open_conn(path: &std::path::Path) -> anyhow::Result<Connection> {
    let conn = Connection::open(path)?;
    init_db(&conn)?;
    Ok(conn)
}

/// JSON scalars bind as their SQLite counterparts so they compare the same
/// way `json_extract` results do.
fn to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => SqlValue::Real(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => SqlValue::Text(s.clone()),
        other => SqlValue::Text(other.to_string()),
    }
}

fn json_path(field: &str) -> String {
    format!("json_extract(data, '$.{field}')")
}

/// Builds the SELECT for `query`. Field names must already be validated.
fn select_sql(query: &Query) -> (String, Vec<SqlValue>) {
    let mut sql = String::from("SELECT data FROM records WHERE collection = ?1");
    let mut args: Vec<SqlValue> = Vec::new();
    for filter in &query.filters {
        let col = json_path(filter.field());
        match filter {
            Filter::Eq(_, Value::Null) | Filter::NotNull(_) => {
                let op = if matches!(filter, Filter::NotNull(_)) {
                    "IS NOT NULL"
                } else {
                    "IS NULL"
                };
                sql.push_str(&format!(" AND {col} {op}"));
            }
            Filter::Eq(_, v) => {
                args.push(to_sql(v));
                let n = args.len() + 1;
                sql.push_str(&format!(" AND {col} = ?{n}"));
            }
            Filter::Gte(_, v) => {
                args.push(to_sql(v));
                let n = args.len() + 1;
                sql.push_str(&format!(" AND {col} IS NOT NULL AND {col} >= ?{n}"));
            }
        }
    }
    let mut keys: Vec<String> = query
        .order
        .iter()
        .map(|o| {
            let dir = if o.descending { "DESC" } else { "ASC" };
            format!("{} {dir}", json_path(&o.field))
        })
        .collect();
    keys.push("rowid ASC".to_string());
    sql.push_str(&format!(" ORDER BY {}", keys.join(", ")));
    if let Some(limit) = query.limit {
        sql.push_str(&format!(" LIMIT {limit}"));
    }
    (sql, args)
}

#[derive(Debug, Clone)]
pub struct SqliteRecordStore {
    path: std::path::PathBuf,
}

impl SqliteRecordStore {
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl RecordStore for SqliteRecordStore {
    fn insert_row(&self, collection: &str, row: Value) -> anyhow::Result<()> {
        let envelope = Envelope::new(collection, row)?;
        let id = envelope.id().unwrap_or_default();
        let conn = open_conn(&self.path)?;
        let n = conn.execute(
            "INSERT INTO records (collection, id, data) VALUES (?1, ?2, ?3)
             ON CONFLICT(collection, id) DO NOTHING",
            params![collection, id, serde_json::to_string(&envelope.row)?],
        )?;
        if n == 0 {
            return Err(StoreError::Duplicate {
                collection: collection.to_string(),
                id: id.to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn select_rows(&self, collection: &str, query: &Query) -> anyhow::Result<Vec<Value>> {
        query.validate()?;
        let (sql, args) = select_sql(query);
        tracing::debug!(%sql, "sqlite select");
        let conn = open_conn(&self.path)?;
        let mut stmt = conn.prepare(&sql)?;
        let bound = std::iter::once(SqlValue::Text(collection.to_string())).chain(args);
        let mut rows = stmt.query(params_from_iter(bound))?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let data: String = row.get(0)?;
            out.push(serde_json::from_str(&data)?);
        }
        Ok(out)
    }

    fn delete_row(&self, collection: &str, id: &str) -> anyhow::Result<bool> {
        let conn = open_conn(&self.path)?;
        let n = conn.execute(
            "DELETE FROM records WHERE collection=?1 AND id=?2",
            params![collection, id],
        )?;
        Ok(n > 0)
    }

    fn export(&self, out: &mut dyn std::io::Write) -> anyhow::Result<()> {
        let conn = open_conn(&self.path)?;
        let mut stmt = conn.prepare("SELECT collection, data FROM records ORDER BY rowid")?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let collection: String = row.get(0)?;
            let data: String = row.get(1)?;
            let envelope = Envelope {
                collection,
                row: serde_json::from_str(&data)?,
            };
            out.write_all(serde_json::to_string(&envelope)?.as_bytes())?;
            out.write_all(b"\n")?;
        }
        Ok(())
    }

    fn import(&self, input: &mut dyn std::io::Read) -> anyhow::Result<usize> {
        let mut data = String::new();
        input.read_to_string(&mut data)?;
        let incoming = parse_envelopes(&data)?;
        let mut conn = open_conn(&self.path)?;
        let tx = conn.transaction()?;
        for envelope in &incoming {
            tx.execute(
                "INSERT INTO records (collection, id, data) VALUES (?1, ?2, ?3)
                 ON CONFLICT(collection, id) DO UPDATE SET data=excluded.data",
                params![
                    envelope.collection,
                    envelope.id().unwrap_or_default(),
                    serde_json::to_string(&envelope.row)?
                ],
            )?;
        }
        tx.commit()?;
        Ok(incoming.len())
    }

    fn stats(&self) -> anyhow::Result<Value> {
        let conn = open_conn(&self.path)?;
        let mut stmt =
            conn.prepare("SELECT collection, COUNT(*) FROM records GROUP BY collection")?;
        let mut rows = stmt.query([])?;
        let mut by_collection = BTreeMap::new();
        while let Some(row) = rows.next()? {
            by_collection.insert(row.get::<_, String>(0)?, row.get::<_, i64>(1)?);
        }
        Ok(stats_json(by_collection))
    }
}
