//! Catalog service resolution.
//!
//! # Responsibility
//! - Turn locators or connection parameters into unvalidated handles.
//! - Provide the collaborator contracts (handles, observers, progress,
//!   diagnostics) the resolver is wired from.

pub(crate) mod boundary;
pub mod diagnostics;
pub mod factory;
pub mod handle;
pub mod interceptor;
pub mod progress;
