//! Service handle contract.
//!
//! # Responsibility
//! - Describe the unconnected data-source reference returned by resolution.
//!
//! # Invariants
//! - Handles are unvalidated when returned; connecting is the caller's job.
//! - The caller owns every returned handle and is responsible for disposal.

use crate::service::progress::ProgressMonitor;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Untested, unconnected handle to one data source.
pub trait ServiceHandle: Send {
    /// Human-readable identity used in diagnostics, usually the source URL.
    fn identifier(&self) -> &str;

    /// Releases any resources held by the handle.
    fn dispose(&mut self, monitor: &mut dyn ProgressMonitor) -> ServiceResult<()>;
}

/// Failure raised while a handle releases its resources.
#[derive(Debug)]
pub enum ServiceError {
    Io(std::io::Error),
    Release(String),
    /// The disposal panicked; payload is sanitized.
    Panicked(String),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Release(message) => write!(f, "failed to release service: {message}"),
            Self::Panicked(payload) => write!(f, "service disposal panicked: {payload}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Release(_) | Self::Panicked(_) => None,
        }
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
