//! Resolver configuration.
//!
//! # Responsibility
//! - Hold host-supplied switches that change catalog diagnostics.
//!
//! # Invariants
//! - Every field has a default; an empty config is a valid config.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Environment variable enabling diagnostic (debug) mode.
pub const DEBUG_ENV_VAR: &str = "GEOCATALOG_DEBUG";

/// Host-supplied resolver switches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Reports parameter-derivation failures as warnings when set.
    pub debug: bool,
}

impl ResolverConfig {
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Reads configuration from process environment.
    ///
    /// # Errors
    /// - Returns `ConfigError::InvalidFlag` when `GEOCATALOG_DEBUG` is set to
    ///   an unrecognised value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var(DEBUG_ENV_VAR).ok();
        Self::from_debug_value(raw.as_deref())
    }

    /// Builds configuration from a raw debug flag value.
    pub fn from_debug_value(raw: Option<&str>) -> Result<Self, ConfigError> {
        let debug = match raw {
            None => false,
            Some(value) => parse_flag(DEBUG_ENV_VAR, value)?,
        };
        Ok(Self { debug })
    }
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidFlag {
            name,
            value: other.to_string(),
        }),
    }
}

/// Configuration load errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidFlag { name: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFlag { name, value } => write!(
                f,
                "{name} has unsupported value `{value}`; expected 1|0|true|false|yes|no|on|off"
            ),
        }
    }
}

impl Error for ConfigError {}
