//! Persistence collaborators: record sinks, record sources and log history.

pub mod adi;
pub mod sqlite;

use thiserror::Error;

use crate::{
    core::indices::WorkedIndex,
    normalize::{adif_date_to_iso, adif_time_to_iso},
    qso::{Field, QsoRecord},
};

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("json: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Message(String),
}

pub type PersistResult<T> = Result<T, PersistError>;

/// Accepts finalized records one at a time.
pub trait QsoSink: Send {
    fn write_qso(&mut self, qso: &QsoRecord) -> PersistResult<()>;
    fn flush(&mut self) -> PersistResult<()> {
        Ok(())
    }
}

/// Yields previously persisted records, oldest first.
pub trait QsoSource {
    fn load_qsos(&self) -> PersistResult<Vec<QsoRecord>>;
}

/// What a new session needs to know about an existing log.
#[derive(Debug, Clone, Default)]
pub struct LogHistory {
    /// Last record with callsign, date and time.
    pub last_qso: Option<QsoRecord>,
    /// Worked stations from the same records.
    pub worked: WorkedIndex,
}

impl LogHistory {
    /// Scans `records`, skipping any without `CALL`, `QSO_DATE` and `TIME_ON`.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a QsoRecord>) -> Self {
        let complete: Vec<&QsoRecord> = records
            .into_iter()
            .filter(|rec| {
                [Field::Call, Field::QsoDate, Field::TimeOn]
                    .iter()
                    .all(|f| rec.get(*f).is_some_and(|v| !v.is_empty()))
            })
            .collect();
        Self {
            last_qso: complete.last().map(|rec| (*rec).clone()),
            worked: WorkedIndex::from_records(complete),
        }
    }

    pub fn load(source: &dyn QsoSource) -> PersistResult<Self> {
        let records = source.load_qsos()?;
        Ok(Self::from_records(&records))
    }

    /// `Last QSO: <CALL> worked on <date> at <time>` for the start screen.
    pub fn last_qso_summary(&self) -> Option<String> {
        let last = self.last_qso.as_ref()?;
        Some(format!(
            "Last QSO: {} worked on {} at {}",
            last.call(),
            adif_date_to_iso(last.get(Field::QsoDate).unwrap_or_default()),
            adif_time_to_iso(last.get(Field::TimeOn).unwrap_or_default())
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_skips_incomplete_records() {
        let records = vec![
            QsoRecord::from_pairs([("CALL", "K1ABC"), ("QSO_DATE", "20240101"), ("TIME_ON", "1200")]),
            QsoRecord::from_pairs([("CALL", "K2DEF"), ("QSO_DATE", "20240102")]),
        ];
        let history = LogHistory::from_records(&records);
        assert_eq!(history.worked.len(), 1);
        assert!(history.worked.get("K2DEF").is_none());
        assert_eq!(
            history.last_qso_summary().as_deref(),
            Some("Last QSO: K1ABC worked on 2024-01-01 at 12:00")
        );
    }
}
