use chrono::Utc;

use crate::{
    engine::event::EventState,
    qso::{Field, QsoRecord},
    types::default_rst,
};

/// Values carried from one record into the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub my_call: String,
    pub my_locator: String,
    pub my_city: String,
    pub my_name: String,
    pub date: String,
    pub time: String,
    pub band: String,
    pub mode: String,
    pub freq: String,
    pub power: String,
    pub comment: String,
    pub event: EventState,
}

impl Session {
    /// Session for `my_call` with date and time set to now.
    pub fn new(my_call: impl Into<String>) -> Self {
        let mut session = Self {
            my_call: my_call.into(),
            ..Self::default()
        };
        session.sync_now();
        session
    }

    /// Sets date and time to the current UTC minute.
    pub fn sync_now(&mut self) {
        let now = Utc::now();
        self.date = now.format("%Y%m%d").to_string();
        self.time = now.format("%H%M").to_string();
    }

    /// Fresh in-progress record built from the carry-over values.
    pub fn seed_record(&self) -> QsoRecord {
        let mut rec = QsoRecord::new();
        rec.set(Field::StationCallsign, self.my_call.as_str());
        rec.set(Field::MyGridsquare, self.my_locator.as_str());
        rec.set(Field::QsoDate, self.date.as_str());
        rec.set(Field::TimeOn, self.time.as_str());
        rec.set(Field::Band, self.band.as_str());
        rec.set(Field::Mode, self.mode.as_str());
        rec.set(Field::Call, "");
        rec.set(Field::Gridsquare, "");

        apply_rst_default(&mut rec, &self.mode);

        for (field, value) in [
            (Field::MyCity, &self.my_city),
            (Field::MyName, &self.my_name),
            (Field::Freq, &self.freq),
            (Field::TxPwr, &self.power),
            (Field::Comment, &self.comment),
        ] {
            if !value.is_empty() {
                rec.set(field, value.as_str());
            }
        }

        self.event.seed(&mut rec);
        rec
    }

    /// Adds any missing mandatory field from the carry-over values.
    pub fn fill_mandatory(&self, rec: &mut QsoRecord) {
        for field in Field::MANDATORY {
            if rec.contains(field) {
                continue;
            }
            let value = match field {
                Field::StationCallsign => self.my_call.as_str(),
                Field::MyGridsquare => self.my_locator.as_str(),
                Field::QsoDate => self.date.as_str(),
                Field::TimeOn => self.time.as_str(),
                Field::Band => self.band.as_str(),
                Field::Mode => self.mode.as_str(),
                _ => "",
            };
            rec.set(field, value);
        }
    }
}

/// Sets both signal reports to the mode's convention, or removes them.
pub fn apply_rst_default(rec: &mut QsoRecord, mode: &str) {
    match default_rst(mode) {
        Some(rst) => {
            rec.set(Field::RstRcvd, rst);
            rec.set(Field::RstSent, rst);
        }
        None => {
            rec.remove(Field::RstRcvd);
            rec.remove(Field::RstSent);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_has_mandatory_fields() {
        let session = Session::new("XX1XXX");
        let rec = session.seed_record();
        for field in Field::MANDATORY {
            assert!(rec.contains(field), "{field}");
        }
        assert!(!rec.contains(Field::RstRcvd));
        assert!(!rec.contains(Field::MyName));
    }

    #[test]
    fn seed_applies_mode_and_event() {
        let mut session = Session::new("XX1XXX");
        session.mode = "CW".into();
        session.event = EventState::activate("TEST");
        let rec = session.seed_record();
        assert_eq!(rec.get(Field::RstSent), Some("599"));
        assert_eq!(rec.get(Field::ContestId), Some("TEST"));
        assert_eq!(rec.get(Field::StxString), Some("001"));
    }

    #[test]
    fn fill_keeps_present_values() {
        let session = Session::new("XX1XXX");
        let mut rec = QsoRecord::from_pairs([("CALL", "K1ABC"), ("STATION_CALLSIGN", "OTHER1A")]);
        session.fill_mandatory(&mut rec);
        assert_eq!(rec.get(Field::StationCallsign), Some("OTHER1A"));
        assert_eq!(rec.get(Field::Call), Some("K1ABC"));
        assert_eq!(rec.get(Field::Gridsquare), Some(""));
    }
}
