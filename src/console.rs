//! Character-level input accumulator and record lifecycle.

use log::{debug, info, warn};

use crate::{
    config::{ConfigError, StationConfig},
    core::{
        indices::{WorkedEntry, WorkedIndex},
        session::Session,
        stack::QsoStack,
    },
    engine::{
        evaluator::{apply, Target},
        event::EventState,
    },
    persist::LogHistory,
    qso::{Field, QsoRecord},
    status::Status,
    token::classify,
};

/// Erases the last pending character.
pub const BACKSPACE: char = '\u{8}';
/// Abandons the pending token and the in-progress record.
pub const RESET: char = '~';
/// Returns a snapshot of the in-progress record.
pub const QUERY: char = '?';
/// Starts and ends free-text capture.
pub const QUOTE: char = '"';

/// One logging session: in-progress record, finalized stack and carry-over state.
///
/// Feed keystrokes through [`Console::append_char`] or whole tokens through
/// [`Console::evaluate`]; drain finished records with [`Console::pop`].
#[derive(Debug)]
pub struct Console {
    session: Session,
    worked: WorkedIndex,
    stack: QsoStack,
    current: QsoRecord,
    active: bool,
    pending: String,
    quoted: bool,
}

impl Console {
    /// Starts a session with no prior log.
    pub fn new(config: &StationConfig) -> Result<Self, ConfigError> {
        Self::with_history(config, LogHistory::default())
    }

    /// Starts a session continuing a previous log.
    ///
    /// Band, mode, frequency and power are taken over from the last logged
    /// contact and duplicate checks use the history's worked index.
    pub fn with_history(config: &StationConfig, history: LogHistory) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut session = Session::new(config.call.to_ascii_uppercase());
        if let Some(loc) = config.location()? {
            session.my_locator = loc.grid;
            session.my_city = loc.name.unwrap_or_default();
        }
        session.my_name = config.name.clone();

        if let Some(last) = &history.last_qso {
            let carry = |field| last.get(field).unwrap_or_default().to_string();
            session.band = carry(Field::Band);
            session.mode = carry(Field::Mode);
            session.freq = carry(Field::Freq);
            session.power = carry(Field::TxPwr);
        }

        if !config.event.is_empty() {
            session.event = EventState::with_own_exchange(&config.event, &config.exchange);
        }

        info!(
            "session started for {:?}, event {:?}, {} worked stations known",
            session.my_call,
            session.event.id().unwrap_or("none"),
            history.worked.len()
        );

        let mut console = Self {
            session,
            worked: history.worked,
            stack: QsoStack::new(),
            current: QsoRecord::new(),
            active: false,
            pending: String::new(),
            quoted: false,
        };
        console.clear();
        Ok(console)
    }

    /// Feeds one keystroke.
    ///
    /// Inside quotes every character except `"` and newline is taken
    /// literally, backspace included.
    pub fn append_char(&mut self, c: char) -> Status {
        if self.quoted {
            return match c {
                QUOTE => {
                    self.quoted = false;
                    self.evaluate_pending()
                }
                '\n' => self.finalize(),
                _ => {
                    self.pending.push(c);
                    Status::Accepted
                }
            };
        }

        match c {
            BACKSPACE => match self.pending.pop() {
                Some(_) => Status::Deleted,
                None => Status::Accepted,
            },
            ' ' => self.evaluate_pending(),
            QUOTE => {
                self.quoted = true;
                Status::Accepted
            }
            '\n' => self.finalize(),
            RESET => {
                self.pending.clear();
                self.clear();
                Status::Accepted
            }
            QUERY => Status::Info(self.current.to_string()),
            _ => {
                self.pending.push(c);
                Status::Accepted
            }
        }
    }

    /// Evaluates one complete token against the in-progress record.
    pub fn evaluate(&mut self, token: &str) -> Status {
        if token.is_empty() {
            return Status::Accepted;
        }
        self.active = true;

        let status = apply(
            classify(token),
            Target {
                rec: &mut self.current,
                session: &mut self.session,
                worked: &self.worked,
            },
        );
        match &status {
            Status::Error(msg) => warn!("token {token:?} rejected: {msg}"),
            other => debug!("token {token:?}: {other:?}"),
        }
        status
    }

    /// Commits the in-progress record to the stack.
    ///
    /// A pending token is evaluated first. The record is committed even when
    /// that token is rejected; its error is then returned instead of the
    /// cache notice.
    pub fn finalize(&mut self) -> Status {
        self.quoted = false;
        let token_status = self.evaluate_pending();
        if !self.active {
            return token_status;
        }

        let rec = self.current.clone();
        let call = rec.call().to_string();
        match self.stack.edit_pos() {
            Some(pos) => {
                self.stack.replace(pos, rec);
                info!("QSO #{} updated", pos + 1);
            }
            None => {
                self.worked.record(&rec);
                let pos = self.stack.push(rec);
                self.session.event.advance();
                info!("QSO #{} cached", pos + 1);
            }
        }
        self.clear();

        if token_status.is_error() {
            token_status
        } else if call.is_empty() {
            Status::warning("Callsign missing for last QSO")
        } else {
            Status::info(format!("Last QSO cached: {call}"))
        }
    }

    /// Resets the in-progress record to the session defaults.
    pub fn clear(&mut self) {
        self.stack.deselect();
        self.active = false;
        self.quoted = false;
        self.current = self.session.seed_record();
    }

    /// Discards the stack, pending input and band/mode/event settings.
    ///
    /// Own station data and the worked index survive.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.stack.clear();
        let s = &mut self.session;
        s.band.clear();
        s.mode.clear();
        s.freq.clear();
        s.power.clear();
        s.comment.clear();
        s.event = EventState::Inactive;
        self.clear();
    }

    /// Pushes an externally loaded record, filling missing mandatory fields.
    pub fn append_qso(&mut self, mut rec: QsoRecord) {
        self.session.fill_mandatory(&mut rec);
        self.worked.record(&rec);
        self.stack.push(rec);
    }

    /// Loads the previous stack entry for editing.
    pub fn load_prev(&mut self) {
        if let Some(pos) = self.stack.select_prev() {
            self.load_selected(pos);
        }
    }

    /// Loads the next stack entry for editing.
    pub fn load_next(&mut self) {
        if let Some(pos) = self.stack.select_next() {
            self.load_selected(pos);
        }
    }

    fn load_selected(&mut self, pos: usize) {
        if let Some(rec) = self.stack.get(pos) {
            debug!("editing QSO #{}", pos + 1);
            self.current = rec.clone();
            self.active = true;
            self.quoted = false;
        }
    }

    /// Deletes the entry being edited and returns its index.
    pub fn delete_selected(&mut self) -> Option<usize> {
        let pos = self.stack.edit_pos()?;
        self.stack.remove(pos)?;
        info!("QSO #{} deleted", pos + 1);
        self.clear();
        Some(pos)
    }

    /// Removes and returns the oldest finalized record.
    pub fn pop(&mut self) -> Option<QsoRecord> {
        self.pop_at(0)
    }

    /// Removes and returns the finalized record at `index`.
    pub fn pop_at(&mut self, index: usize) -> Option<QsoRecord> {
        self.clear();
        self.stack.remove(index)
    }

    pub fn current_qso(&self) -> &QsoRecord {
        &self.current
    }

    pub fn qsos(&self) -> &[QsoRecord] {
        self.stack.as_slice()
    }

    /// True when finalized records await persistence.
    pub fn has_pending(&self) -> bool {
        !self.stack.is_empty()
    }

    pub fn edit_pos(&self) -> Option<usize> {
        self.stack.edit_pos()
    }

    /// Characters typed since the last token boundary.
    pub fn pending_input(&self) -> &str {
        &self.pending
    }

    pub fn is_quoted(&self) -> bool {
        self.quoted
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn worked_before(&self, call: &str) -> Option<&WorkedEntry> {
        self.worked.get(call)
    }

    fn evaluate_pending(&mut self) -> Status {
        let token = std::mem::take(&mut self.pending);
        self.evaluate(&token)
    }
}
