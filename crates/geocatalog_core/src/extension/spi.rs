//! Service extension SPI.
//!
//! # Responsibility
//! - Define the contract every pluggable data-service type implements.
//! - Classify extensions as specific or generic fallbacks.
//!
//! # Invariants
//! - `Ok(None)` from either call means "this extension declines"; it is not
//!   an error.
//! - Extensions never own the handles they create once returned.

use crate::model::locator::ServiceLocator;
use crate::model::params::ParamMap;
use crate::service::handle::ServiceHandle;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ExtensionResult<T> = Result<T, ExtensionError>;

/// Specificity class used to order resolution passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExtensionKind {
    /// Recognises one concrete service type; always probed first.
    Specific,
    /// Broad, low-value fallback probed only when no specific extension
    /// produced a handle.
    Generic,
}

impl ExtensionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Specific => "specific",
            Self::Generic => "generic",
        }
    }

    pub fn is_generic(self) -> bool {
        matches!(self, Self::Generic)
    }
}

/// Pluggable collaborator able to recognise and instantiate one data-service
/// type.
///
/// Implementations may block on I/O inside either call; the catalog imposes
/// no timeout.
pub trait ServiceExtension: Send + Sync {
    /// Stable identifier, e.g. `shapefile` or `wms.1_3`.
    fn extension_id(&self) -> &str;

    /// Declared specificity. Registries may override this at registration.
    fn kind(&self) -> ExtensionKind {
        ExtensionKind::Specific
    }

    /// Derives connection parameters for `locator`, or declines with `None`.
    fn derive_params(&self, locator: &ServiceLocator) -> ExtensionResult<Option<ParamMap>>;

    /// Builds an unconnected handle from `params`, or declines with `None`.
    fn instantiate(&self, params: &ParamMap) -> ExtensionResult<Option<Box<dyn ServiceHandle>>>;
}

/// Failure raised by an extension call.
#[derive(Debug)]
pub enum ExtensionError {
    /// Input was recognised but malformed for this extension.
    InvalidInput(String),
    /// A required parameter is missing or has the wrong shape.
    InvalidParams { key: String, reason: String },
    /// A backing resource could not be reached.
    Unavailable(String),
    Io(std::io::Error),
    /// The call panicked; payload is sanitized.
    Panicked(String),
}

impl ExtensionError {
    pub fn invalid_params(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

impl Display for ExtensionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::InvalidParams { key, reason } => {
                write!(f, "invalid parameter `{key}`: {reason}")
            }
            Self::Unavailable(message) => write!(f, "resource unavailable: {message}"),
            Self::Io(err) => write!(f, "{err}"),
            Self::Panicked(payload) => write!(f, "extension panicked: {payload}"),
        }
    }
}

impl Error for ExtensionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ExtensionError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
