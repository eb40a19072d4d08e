//! Contest and activation-program exchange tracking.

use serde::{Deserialize, Serialize};

use crate::{
    normalize::{format_serial, parse_serial},
    qso::{Field, QsoRecord},
    types::is_signature_program,
};

/// Own exchange sent during a contest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Exchange {
    /// Serial number, advanced after every new contact.
    Serial(u32),
    /// Fixed text such as a locator or member number.
    Text(String),
}

impl Exchange {
    /// Serial when `raw` is all digits, otherwise uppercased text.
    pub fn parse(raw: &str) -> Self {
        match parse_serial(raw) {
            Some(n) => Self::Serial(n),
            None => Self::Text(raw.to_ascii_uppercase()),
        }
    }
}

/// Returned when an exchange is entered with no event running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoActiveEvent;

/// Active event, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventState {
    /// Plain logging.
    #[default]
    Inactive,
    /// Contest with `CONTEST_ID` and `STX`/`SRX` exchanges.
    Contest {
        /// Contest identifier.
        id: String,
        /// Own exchange.
        own: Exchange,
    },
    /// Activation program with `MY_SIG`/`SIG` references.
    Signature {
        /// Program name, e.g. `POTA`.
        program: String,
        /// Own reference, e.g. a park.
        own_info: String,
    },
}

impl EventState {
    /// Starts the event `id`, choosing contest or signature mode.
    pub fn activate(id: &str) -> Self {
        let id = id.to_ascii_uppercase();
        if is_signature_program(&id) {
            Self::Signature {
                program: id,
                own_info: String::new(),
            }
        } else {
            Self::Contest {
                id,
                own: Exchange::Serial(1),
            }
        }
    }

    /// Starts the event `id` with an own exchange; empty `raw` keeps the default.
    pub fn with_own_exchange(id: &str, raw: &str) -> Self {
        let mut state = Self::activate(id);
        if !raw.is_empty() {
            match &mut state {
                Self::Inactive => {}
                Self::Contest { own, .. } => *own = Exchange::parse(raw),
                Self::Signature { own_info, .. } => *own_info = raw.to_ascii_uppercase(),
            }
        }
        state
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Inactive)
    }

    /// Event identifier or program name.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Inactive => None,
            Self::Contest { id, .. } => Some(id),
            Self::Signature { program, .. } => Some(program),
        }
    }

    /// Replaces the own exchange (`-N`).
    pub fn set_own_exchange(&mut self, raw: &str) -> Result<(), NoActiveEvent> {
        match self {
            Self::Inactive => Err(NoActiveEvent),
            Self::Contest { own, .. } => {
                *own = Exchange::parse(raw);
                Ok(())
            }
            Self::Signature { own_info, .. } => {
                *own_info = raw.to_ascii_uppercase();
                Ok(())
            }
        }
    }

    /// Writes the own side of the exchange into `rec`.
    pub fn seed(&self, rec: &mut QsoRecord) {
        match self {
            Self::Inactive => {}
            Self::Contest { id, own } => {
                rec.set(Field::ContestId, id.as_str());
                match own {
                    Exchange::Serial(n) => {
                        rec.set(Field::Stx, format_serial(*n));
                        rec.set(Field::StxString, format_serial(*n));
                    }
                    Exchange::Text(text) => {
                        rec.remove(Field::Stx);
                        rec.set(Field::StxString, text.as_str());
                    }
                }
            }
            Self::Signature { program, own_info } => {
                rec.set(Field::MySig, program.as_str());
                rec.set(Field::MySigInfo, own_info.as_str());
            }
        }
    }

    /// Stores the received exchange (`%`). Empty `raw` removes it.
    pub fn set_received(&self, rec: &mut QsoRecord, raw: &str) -> Result<(), NoActiveEvent> {
        match self {
            Self::Inactive => return Err(NoActiveEvent),
            Self::Contest { .. } => {
                rec.remove(Field::Srx);
                rec.remove(Field::SrxString);
                if raw.is_empty() {
                    return Ok(());
                }
                if let Exchange::Serial(n) = Exchange::parse(raw) {
                    rec.set(Field::Srx, n.to_string());
                }
                rec.set(Field::SrxString, raw.to_ascii_uppercase());
            }
            Self::Signature { program, .. } => {
                if raw.is_empty() {
                    rec.remove(Field::Sig);
                    rec.remove(Field::SigInfo);
                } else {
                    rec.set(Field::Sig, program.as_str());
                    rec.set(Field::SigInfo, raw.to_ascii_uppercase());
                }
            }
        }
        Ok(())
    }

    /// Moves to the next contact: serials count up, text stays.
    pub fn advance(&mut self) {
        if let Self::Contest {
            own: Exchange::Serial(n),
            ..
        } = self
        {
            *n = n.saturating_add(1);
        }
    }
}

/// Removes every contest and activation field from `rec`.
pub fn strip_event_fields(rec: &mut QsoRecord) {
    for field in Field::EVENT {
        rec.remove(field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_picks_mode() {
        assert_eq!(
            EventState::activate("cqww"),
            EventState::Contest {
                id: "CQWW".into(),
                own: Exchange::Serial(1)
            }
        );
        assert_eq!(
            EventState::activate("pota"),
            EventState::Signature {
                program: "POTA".into(),
                own_info: String::new()
            }
        );
    }

    #[test]
    fn serial_advances_text_does_not() {
        let mut ev = EventState::activate("TEST");
        ev.advance();
        let mut rec = QsoRecord::new();
        ev.seed(&mut rec);
        assert_eq!(rec.get(Field::Stx), Some("002"));

        ev.set_own_exchange("xx11").expect("active");
        ev.advance();
        let mut rec = QsoRecord::new();
        ev.seed(&mut rec);
        assert_eq!(rec.get(Field::Stx), None);
        assert_eq!(rec.get(Field::StxString), Some("XX11"));
    }

    #[test]
    fn inactive_rejects_exchanges() {
        let mut ev = EventState::Inactive;
        let mut rec = QsoRecord::new();
        assert_eq!(ev.set_own_exchange("1"), Err(NoActiveEvent));
        assert_eq!(ev.set_received(&mut rec, "1"), Err(NoActiveEvent));
        assert!(rec.is_empty());
    }

    #[test]
    fn signature_received_reference() {
        let ev = EventState::activate("SOTA");
        let mut rec = QsoRecord::new();
        ev.set_received(&mut rec, "dl/al-001").expect("active");
        assert_eq!(rec.get(Field::Sig), Some("SOTA"));
        assert_eq!(rec.get(Field::SigInfo), Some("DL/AL-001"));
    }

    #[test]
    fn received_serial_is_plain_integer() {
        let ev = EventState::activate("TEST");
        let mut rec = QsoRecord::new();
        ev.set_received(&mut rec, "007").expect("active");
        assert_eq!(rec.get(Field::Srx), Some("7"));
        assert_eq!(rec.get(Field::SrxString), Some("007"));
    }

    #[test]
    fn start_with_own_exchange() {
        assert_eq!(
            EventState::with_own_exchange("TEST", "15"),
            EventState::Contest {
                id: "TEST".into(),
                own: Exchange::Serial(15)
            }
        );
        assert_eq!(
            EventState::with_own_exchange("pota", "k-0001"),
            EventState::Signature {
                program: "POTA".into(),
                own_info: "K-0001".into()
            }
        );
        assert_eq!(EventState::with_own_exchange("TEST", ""), EventState::activate("TEST"));
        assert_eq!(EventState::with_own_exchange("TEST", "").id(), Some("TEST"));
    }
}
