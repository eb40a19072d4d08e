//! Station configuration supplied at session start.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{engine::evaluator::Location, validate::is_callsign};

/// Fatal problems with the startup configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Own callsign does not match the callsign grammar.
    #[error("wrong call format: {0:?}")]
    InvalidCallsign(String),
    /// Own locator is neither a grid nor `Name(GRID)`.
    #[error("wrong locator format: {0:?}")]
    InvalidLocator(String),
    /// An own exchange was given without an event to use it for.
    #[error("exchange {0:?} given without an event")]
    ExchangeWithoutEvent(String),
    /// Config file could not be read.
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    /// Config file is not valid JSON for [`StationConfig`].
    #[error("cannot parse config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Own station data and an optional event to start with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StationConfig {
    /// Own callsign, may be empty.
    pub call: String,
    /// Own locator: `JO30uj` or `Eitelborn(JO30uj)`, may be empty.
    pub locator: String,
    /// Own operator name.
    pub name: String,
    /// Contest or activation program to activate.
    pub event: String,
    /// Own exchange for `event`: start serial or fixed text.
    pub exchange: String,
}

impl StationConfig {
    pub fn new(call: impl Into<String>, locator: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            call: call.into(),
            locator: locator.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Checks callsign, locator and event settings; empty values are allowed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.call.is_empty() && !is_callsign(&self.call) {
            return Err(ConfigError::InvalidCallsign(self.call.clone()));
        }
        if self.event.is_empty() && !self.exchange.is_empty() {
            return Err(ConfigError::ExchangeWithoutEvent(self.exchange.clone()));
        }
        self.location()?;
        Ok(())
    }

    /// Parsed own locator, `None` when unset.
    pub fn location(&self) -> Result<Option<Location>, ConfigError> {
        if self.locator.is_empty() {
            return Ok(None);
        }
        Location::parse(&self.locator)
            .map(Some)
            .ok_or_else(|| ConfigError::InvalidLocator(self.locator.clone()))
    }
}
