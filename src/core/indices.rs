use hashbrown::HashMap;

use crate::qso::{Field, QsoRecord};

/// When a station was last worked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkedEntry {
    /// `YYYYMMDD`
    pub date: String,
    /// `HHMM`
    pub time: String,
}

/// Callsign to most recent contact.
#[derive(Debug, Clone, Default)]
pub struct WorkedIndex {
    by_call: HashMap<String, WorkedEntry>,
}

impl WorkedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes every record that has a callsign.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a QsoRecord>) -> Self {
        let mut index = Self::new();
        for rec in records {
            index.record(rec);
        }
        index
    }

    /// Indexes `rec`; returns false when it lacks a callsign.
    pub fn record(&mut self, rec: &QsoRecord) -> bool {
        let call = rec.call();
        if call.is_empty() {
            return false;
        }
        let entry = WorkedEntry {
            date: rec.get(Field::QsoDate).unwrap_or_default().to_string(),
            time: rec.get(Field::TimeOn).unwrap_or_default().to_string(),
        };
        self.by_call.insert(call.to_ascii_uppercase(), entry);
        true
    }

    pub fn get(&self, call: &str) -> Option<&WorkedEntry> {
        self.by_call.get(&call.to_ascii_uppercase())
    }

    pub fn len(&self) -> usize {
        self.by_call.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_call.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_contact_wins() {
        let first = QsoRecord::from_pairs([("CALL", "K1ABC"), ("QSO_DATE", "20240101"), ("TIME_ON", "1200")]);
        let second = QsoRecord::from_pairs([("CALL", "k1abc"), ("QSO_DATE", "20240102"), ("TIME_ON", "0800")]);
        let no_call = QsoRecord::from_pairs([("QSO_DATE", "20240103")]);

        let index = WorkedIndex::from_records([&first, &second, &no_call]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("K1ABC").map(|e| e.date.as_str()), Some("20240102"));
    }
}
