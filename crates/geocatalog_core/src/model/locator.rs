//! URL-like service locator.
//!
//! # Responsibility
//! - Carry the opaque input handed to `ServiceExtension::derive_params`.
//! - Offer cheap scheme/suffix inspection so extensions can decline early.
//!
//! # Invariants
//! - A locator is never empty after trimming.
//! - The raw text is preserved verbatim (minus surrounding whitespace).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static SCHEME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9+.\-]*):").expect("valid scheme regex"));

/// Opaque URL-like locator, usually produced by drag-and-drop or an import
/// dialog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ServiceLocator(String);

impl ServiceLocator {
    /// Parses and normalizes locator text.
    ///
    /// # Errors
    /// - Returns `LocatorError::Empty` for blank input.
    pub fn parse(value: &str) -> Result<Self, LocatorError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(LocatorError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the lowercased URI scheme, if the locator has one.
    ///
    /// Single-letter schemes are treated as Windows drive letters, not
    /// schemes (`C:\data\roads.shp`).
    pub fn scheme(&self) -> Option<String> {
        let captures = SCHEME_RE.captures(&self.0)?;
        let scheme = captures.get(1)?.as_str();
        if scheme.len() == 1 {
            return None;
        }
        Some(scheme.to_ascii_lowercase())
    }

    /// Returns the lowercased suffix after the last `.` of the final path
    /// segment, ignoring any query or fragment.
    pub fn path_extension(&self) -> Option<String> {
        let without_fragment = self.0.split('#').next().unwrap_or_default();
        let path = without_fragment.split('?').next().unwrap_or_default();
        let segment = path.rsplit(['/', '\\']).next().unwrap_or_default();
        let (stem, suffix) = segment.rsplit_once('.')?;
        if stem.is_empty() || suffix.is_empty() {
            return None;
        }
        Some(suffix.to_ascii_lowercase())
    }
}

impl TryFrom<String> for ServiceLocator {
    type Error = LocatorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ServiceLocator> for String {
    fn from(value: ServiceLocator) -> Self {
        value.0
    }
}

impl Display for ServiceLocator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Locator parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocatorError {
    Empty,
}

impl Display for LocatorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "service locator must not be empty"),
        }
    }
}

impl Error for LocatorError {}
