//! QSO record with a fixed field schema.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// Known ADIF field tags, in record output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Field {
    /// Own callsign.
    StationCallsign,
    /// Own Maidenhead locator.
    MyGridsquare,
    /// Own city/QTH name.
    MyCity,
    /// Own operator name.
    MyName,
    /// Contact date, `YYYYMMDD`.
    QsoDate,
    /// Contact start time, `HHMM`.
    TimeOn,
    /// Band code, e.g. `20m`.
    Band,
    /// ADIF mode.
    Mode,
    /// Frequency in MHz.
    Freq,
    /// Transmit power.
    TxPwr,
    /// Contacted station callsign.
    Call,
    /// Contacted station locator.
    Gridsquare,
    /// Contacted station QTH name.
    Qth,
    /// Contacted operator name.
    Name,
    /// Received signal report.
    RstRcvd,
    /// Sent signal report.
    RstSent,
    /// QSL received flag.
    QslRcvd,
    /// Free-text comment.
    Comment,
    /// Contest identifier.
    ContestId,
    /// Sent serial number.
    Stx,
    /// Sent exchange as text.
    StxString,
    /// Received serial number.
    Srx,
    /// Received exchange as text.
    SrxString,
    /// Own activation program.
    MySig,
    /// Own activation reference.
    MySigInfo,
    /// Contacted station activation program.
    Sig,
    /// Contacted station activation reference.
    SigInfo,
}

impl Field {
    /// Every field in output order.
    pub const ALL: [Field; 27] = [
        Field::StationCallsign,
        Field::MyGridsquare,
        Field::MyCity,
        Field::MyName,
        Field::QsoDate,
        Field::TimeOn,
        Field::Band,
        Field::Mode,
        Field::Freq,
        Field::TxPwr,
        Field::Call,
        Field::Gridsquare,
        Field::Qth,
        Field::Name,
        Field::RstRcvd,
        Field::RstSent,
        Field::QslRcvd,
        Field::Comment,
        Field::ContestId,
        Field::Stx,
        Field::StxString,
        Field::Srx,
        Field::SrxString,
        Field::MySig,
        Field::MySigInfo,
        Field::Sig,
        Field::SigInfo,
    ];

    /// Fields present on every freshly cleared record.
    pub const MANDATORY: [Field; 8] = [
        Field::StationCallsign,
        Field::MyGridsquare,
        Field::QsoDate,
        Field::TimeOn,
        Field::Band,
        Field::Mode,
        Field::Call,
        Field::Gridsquare,
    ];

    /// Contest and activation fields.
    pub const EVENT: [Field; 9] = [
        Field::ContestId,
        Field::Stx,
        Field::StxString,
        Field::Srx,
        Field::SrxString,
        Field::MySig,
        Field::MySigInfo,
        Field::Sig,
        Field::SigInfo,
    ];

    /// ADIF tag name.
    pub fn tag(self) -> &'static str {
        match self {
            Field::StationCallsign => "STATION_CALLSIGN",
            Field::MyGridsquare => "MY_GRIDSQUARE",
            Field::MyCity => "MY_CITY",
            Field::MyName => "MY_NAME",
            Field::QsoDate => "QSO_DATE",
            Field::TimeOn => "TIME_ON",
            Field::Band => "BAND",
            Field::Mode => "MODE",
            Field::Freq => "FREQ",
            Field::TxPwr => "TX_PWR",
            Field::Call => "CALL",
            Field::Gridsquare => "GRIDSQUARE",
            Field::Qth => "QTH",
            Field::Name => "NAME",
            Field::RstRcvd => "RST_RCVD",
            Field::RstSent => "RST_SENT",
            Field::QslRcvd => "QSL_RCVD",
            Field::Comment => "COMMENT",
            Field::ContestId => "CONTEST_ID",
            Field::Stx => "STX",
            Field::StxString => "STX_STRING",
            Field::Srx => "SRX",
            Field::SrxString => "SRX_STRING",
            Field::MySig => "MY_SIG",
            Field::MySigInfo => "MY_SIG_INFO",
            Field::Sig => "SIG",
            Field::SigInfo => "SIG_INFO",
        }
    }

    /// Resolves an ADIF tag, ignoring case.
    pub fn from_tag(tag: &str) -> Option<Field> {
        Field::ALL
            .iter()
            .copied()
            .find(|f| f.tag().eq_ignore_ascii_case(tag))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One logged contact.
///
/// Known fields live in a map keyed by [`Field`]; tags outside the schema
/// (e.g. from a reloaded log) are kept in insertion order and written back
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<(String, String)>", into = "Vec<(String, String)>")]
pub struct QsoRecord {
    fields: BTreeMap<Field, String>,
    extra: Vec<(String, String)>,
}

impl QsoRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from `(tag, value)` pairs. Later duplicates win.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut rec = Self::new();
        for (tag, value) in pairs {
            rec.set_tag(tag.as_ref(), value);
        }
        rec
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.fields.contains_key(&field)
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.fields.insert(field, value.into());
    }

    pub fn remove(&mut self, field: Field) -> Option<String> {
        self.fields.remove(&field)
    }

    /// Sets a value by tag name; unknown tags go to the extra list.
    pub fn set_tag(&mut self, tag: &str, value: impl Into<String>) {
        let value = value.into();
        match Field::from_tag(tag) {
            Some(field) => self.set(field, value),
            None => {
                let tag = tag.to_ascii_uppercase();
                match self.extra.iter_mut().find(|(t, _)| *t == tag) {
                    Some(slot) => slot.1 = value,
                    None => self.extra.push((tag, value)),
                }
            }
        }
    }

    /// Looks up a value by tag name, ignoring case.
    pub fn get_tag(&self, tag: &str) -> Option<&str> {
        match Field::from_tag(tag) {
            Some(field) => self.get(field),
            None => self
                .extra
                .iter()
                .find(|(t, _)| t.eq_ignore_ascii_case(tag))
                .map(|(_, v)| v.as_str()),
        }
    }

    /// Contacted callsign, empty when unset.
    pub fn call(&self) -> &str {
        self.get(Field::Call).unwrap_or("")
    }

    /// Number of set fields, extras included.
    pub fn len(&self) -> usize {
        self.fields.len() + self.extra.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates `(tag, value)` in schema order followed by extras.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(f, v)| (f.tag(), v.as_str()))
            .chain(self.extra.iter().map(|(t, v)| (t.as_str(), v.as_str())))
    }

    /// Ordered string-keyed view for persistence.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.iter()
            .map(|(t, v)| (t.to_string(), v.to_string()))
            .collect()
    }

    /// Renders the record as ADI fields, e.g. `<CALL:5>K1ABC`.
    pub fn to_adi(&self) -> String {
        self.iter()
            .map(|(tag, value)| format!("<{tag}:{}>{value}", value.len()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<Vec<(String, String)>> for QsoRecord {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::from_pairs(pairs)
    }
}

impl From<QsoRecord> for Vec<(String, String)> {
    fn from(rec: QsoRecord) -> Self {
        rec.to_pairs()
    }
}

impl fmt::Display for QsoRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_adi())
    }
}
