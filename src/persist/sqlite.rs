//! SQLite-backed append-only contact log.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use crate::qso::{Field, QsoRecord};

use super::{PersistError, PersistResult, QsoSink, QsoSource};

const RECORD_FORMAT_VERSION: u16 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RecordEnvelope {
    format_version: u16,
    qso: QsoRecord,
}

/// SQLite implementation of [`QsoSink`] and [`QsoSource`].
pub struct SqliteLog {
    conn: Connection,
}

impl SqliteLog {
    /// Opens or creates a log at `path`.
    ///
    /// Enables WAL mode and sets `synchronous=NORMAL`.
    pub fn open(path: impl AsRef<Path>) -> PersistResult<Self> {
        let conn = Connection::open(path)?;
        Self::init_connection(conn)
    }

    pub fn open_in_memory() -> PersistResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_connection(conn)
    }

    fn init_connection(conn: Connection) -> PersistResult<Self> {
        conn.execute_batch(include_str!("schema.sql"))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        Ok(Self { conn })
    }

    /// Appends several records in one transaction.
    pub fn write_all(&mut self, qsos: &[QsoRecord]) -> PersistResult<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO qsos(ts_ms, call, qso_date, time_on, payload) VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for qso in qsos {
                let payload = serde_json::to_vec(&RecordEnvelope {
                    format_version: RECORD_FORMAT_VERSION,
                    qso: qso.clone(),
                })?;
                stmt.execute(params![
                    now_ms() as i64,
                    qso.call().to_ascii_uppercase(),
                    qso.get(Field::QsoDate).unwrap_or_default(),
                    qso.get(Field::TimeOn).unwrap_or_default(),
                    payload,
                ])?;
            }
        }
        tx.commit()?;
        Ok(qsos.len())
    }

    /// Records stored for `call`, oldest first.
    pub fn by_call(&self, call: &str) -> PersistResult<Vec<QsoRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT payload FROM qsos WHERE call = ?1 ORDER BY id ASC")?;
        let rows = stmt.query_map(params![call.to_ascii_uppercase()], decode_row)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    pub fn count(&self) -> PersistResult<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM qsos", [], |row| row.get(0))?;
        Ok(n as usize)
    }
}

impl QsoSink for SqliteLog {
    fn write_qso(&mut self, qso: &QsoRecord) -> PersistResult<()> {
        self.write_all(std::slice::from_ref(qso))?;
        Ok(())
    }

    fn flush(&mut self) -> PersistResult<()> {
        self.conn.execute_batch("PRAGMA wal_checkpoint(PASSIVE);")?;
        Ok(())
    }
}

impl QsoSource for SqliteLog {
    fn load_qsos(&self) -> PersistResult<Vec<QsoRecord>> {
        let mut stmt = self.conn.prepare("SELECT payload FROM qsos ORDER BY id ASC")?;
        let rows = stmt.query_map([], decode_row)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }
}

fn decode_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<QsoRecord> {
    let payload: Vec<u8> = row.get(0)?;
    decode_payload(&payload).map_err(|err| {
        rusqlite::Error::FromSqlConversionFailure(
            payload.len(),
            rusqlite::types::Type::Blob,
            Box::new(err),
        )
    })
}

fn decode_payload(payload: &[u8]) -> Result<QsoRecord, PersistError> {
    let env: RecordEnvelope = serde_json::from_slice(payload)?;
    if env.format_version != RECORD_FORMAT_VERSION {
        return Err(PersistError::Message(format!(
            "unsupported record format version: {}",
            env.format_version
        )));
    }
    Ok(env.qso)
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_format_version() {
        let payload = br#"{"format_version":9,"qso":[["CALL","K1ABC"]]}"#;
        assert!(matches!(decode_payload(payload), Err(PersistError::Message(_))));
    }

    #[test]
    fn lookup_by_call() {
        let mut log = SqliteLog::open_in_memory().expect("open");
        log.write_qso(&QsoRecord::from_pairs([("CALL", "K1ABC"), ("QSO_DATE", "20240101")]))
            .expect("write");
        log.write_qso(&QsoRecord::from_pairs([("CALL", "K2DEF")])).expect("write");
        assert_eq!(log.count().expect("count"), 2);
        let hits = log.by_call("k1abc").expect("query");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].get(Field::QsoDate), Some("20240101"));
    }

    #[test]
    fn lookup_matches_lowercase_stored_call() {
        let mut log = SqliteLog::open_in_memory().expect("open");
        log.write_qso(&QsoRecord::from_pairs([("CALL", "dl2xyz")])).expect("write");
        let hits = log.by_call("DL2XYZ").expect("query");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].call(), "dl2xyz");
    }
}
