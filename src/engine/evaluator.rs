//! Applies a classified token to the in-progress record.

use crate::{
    core::{
        indices::WorkedIndex,
        session::{apply_rst_default, Session},
    },
    engine::event::{strip_event_fields, EventState},
    normalize::{
        adif_date_to_iso, adif_time_to_iso, expand_date, expand_time, khz_to_mhz,
        normalize_locator, underscores_to_spaces,
    },
    qso::{Field, QsoRecord},
    status::Status,
    token::{Extended, TokenKind},
    validate::{is_callsign, is_date, is_locator, is_rst, is_time, split_composite_locator},
    version_string,
};

const WRONG_LOCATOR: &str = "Wrong QTH/maidenhead format";
const WRONG_CALL: &str = "Wrong call format";
const NO_ACTIVE_EVENT: &str = "No active event";

/// A parsed location token: grid plus optional place name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Locator with uppercased field letters.
    pub grid: String,
    /// Place name, underscores already replaced.
    pub name: Option<String>,
}

impl Location {
    /// Parses `GRID` or `Name(GRID)`.
    pub fn parse(s: &str) -> Option<Self> {
        if is_locator(s) {
            return Some(Self {
                grid: normalize_locator(s),
                name: None,
            });
        }
        let (name, grid) = split_composite_locator(s)?;
        Some(Self {
            grid: normalize_locator(grid),
            name: Some(underscores_to_spaces(name)),
        })
    }
}

/// Record and session state a token may touch.
pub struct Target<'a> {
    pub rec: &'a mut QsoRecord,
    pub session: &'a mut Session,
    pub worked: &'a WorkedIndex,
}

/// Applies `kind` and reports the outcome.
///
/// An `Error` leaves the record and session untouched.
pub fn apply(kind: TokenKind<'_>, t: Target<'_>) -> Status {
    let Target { rec, session, worked } = t;
    match kind {
        TokenKind::Band(band) => {
            session.band = band.to_string();
            rec.set(Field::Band, band);
        }
        TokenKind::IgnoredShortcut => {}
        TokenKind::Date(raw) => {
            let date = expand_date(raw, &session.date);
            if !is_date(&date) {
                return Status::error("Wrong date format");
            }
            rec.set(Field::QsoDate, date.as_str());
            session.date = date;
        }
        TokenKind::Time(raw) => {
            let time = expand_time(raw, &session.time);
            if !is_time(&time) {
                return Status::error("Wrong time format");
            }
            rec.set(Field::TimeOn, time.as_str());
            session.time = time;
        }
        TokenKind::Frequency(raw) => match khz_to_mhz(raw) {
            Some(mhz) => {
                rec.set(Field::Freq, mhz.as_str());
                session.freq = mhz;
            }
            None => {
                rec.remove(Field::Freq);
                session.freq.clear();
            }
        },
        TokenKind::Power(raw) => {
            if raw.bytes().all(|b| b == b'0' || b == b'.') {
                rec.remove(Field::TxPwr);
                session.power.clear();
            } else {
                rec.set(Field::TxPwr, raw);
                session.power = raw.to_string();
            }
        }
        TokenKind::UnknownNumber => return Status::error("Unknown number format"),
        TokenKind::Mode(mode) => {
            session.mode = mode.to_string();
            rec.set(Field::Mode, mode);
            apply_rst_default(rec, mode);
        }
        TokenKind::Comment(text) => {
            if text.is_empty() {
                rec.remove(Field::Comment);
                session.comment.clear();
            } else {
                let text = underscores_to_spaces(text);
                rec.set(Field::Comment, text.as_str());
                session.comment = text;
            }
        }
        TokenKind::Name(text) => {
            if text.is_empty() {
                rec.remove(Field::Name);
            } else {
                rec.set(Field::Name, underscores_to_spaces(text));
            }
        }
        TokenKind::Locator(raw) => {
            if raw.is_empty() {
                rec.set(Field::Gridsquare, "");
                rec.remove(Field::Qth);
            } else {
                let Some(loc) = Location::parse(raw) else {
                    return Status::error(WRONG_LOCATOR);
                };
                set_location(rec, Field::Gridsquare, Field::Qth, &loc);
            }
        }
        TokenKind::Event(id) => {
            strip_event_fields(rec);
            session.event = if id.is_empty() {
                EventState::Inactive
            } else {
                EventState::activate(id)
            };
            session.event.seed(rec);
        }
        TokenKind::Exchange(raw) => {
            if session.event.set_received(rec, raw).is_err() {
                return Status::error(NO_ACTIVE_EVENT);
            }
        }
        TokenKind::RstReceived(raw) => return set_rst(rec, Field::RstRcvd, raw),
        TokenKind::RstSent(raw) => return set_rst(rec, Field::RstSent, raw),
        TokenKind::QslToggle => {
            let next = match rec.get(Field::QslRcvd) {
                Some("Y") => "N",
                _ => "Y",
            };
            rec.set(Field::QslRcvd, next);
        }
        TokenKind::SyncNow => {
            session.sync_now();
            rec.set(Field::QsoDate, session.date.as_str());
            rec.set(Field::TimeOn, session.time.as_str());
        }
        TokenKind::Extended(cmd) => return apply_extended(cmd, rec, session),
        TokenKind::Callsign(raw) => {
            let call = raw.to_ascii_uppercase();
            rec.set(Field::Call, call.as_str());
            if !is_callsign(&call) {
                return Status::warning(WRONG_CALL);
            }
            if let Some(prior) = worked.get(&call) {
                return Status::info(format!(
                    "{call} worked on {} at {}",
                    adif_date_to_iso(&prior.date),
                    adif_time_to_iso(&prior.time)
                ));
            }
        }
    }
    Status::Accepted
}

fn apply_extended(cmd: Extended<'_>, rec: &mut QsoRecord, session: &mut Session) -> Status {
    match cmd {
        Extended::OwnCall(raw) => {
            if !is_callsign(raw) {
                return Status::error(WRONG_CALL);
            }
            session.my_call = raw.to_ascii_uppercase();
            rec.set(Field::StationCallsign, session.my_call.as_str());
        }
        Extended::OwnLocator(raw) => {
            if raw.is_empty() {
                session.my_locator.clear();
                session.my_city.clear();
                rec.set(Field::MyGridsquare, "");
                rec.remove(Field::MyCity);
            } else {
                let Some(loc) = Location::parse(raw) else {
                    return Status::error(WRONG_LOCATOR);
                };
                set_location(rec, Field::MyGridsquare, Field::MyCity, &loc);
                session.my_locator = loc.grid;
                session.my_city = loc.name.unwrap_or_default();
            }
        }
        Extended::OwnName(raw) => {
            if raw.is_empty() {
                session.my_name.clear();
                rec.remove(Field::MyName);
            } else {
                session.my_name = underscores_to_spaces(raw);
                rec.set(Field::MyName, session.my_name.as_str());
            }
        }
        Extended::OwnExchange(raw) => {
            if session.event.set_own_exchange(raw).is_err() {
                return Status::error(NO_ACTIVE_EVENT);
            }
            session.event.seed(rec);
        }
        Extended::Version => return Status::info(version_string()),
        Extended::Unknown => return Status::error("Unknown prefix"),
    }
    Status::Accepted
}

fn set_location(rec: &mut QsoRecord, grid_field: Field, name_field: Field, loc: &Location) {
    rec.set(grid_field, loc.grid.as_str());
    match &loc.name {
        Some(name) => rec.set(name_field, name.as_str()),
        None => {
            rec.remove(name_field);
        }
    }
}

fn set_rst(rec: &mut QsoRecord, field: Field, raw: &str) -> Status {
    if !is_rst(raw) {
        return Status::error("Wrong RST format");
    }
    rec.set(field, raw.to_ascii_uppercase());
    Status::Accepted
}
