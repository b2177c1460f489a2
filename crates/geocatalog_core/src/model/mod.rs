//! Catalog input model.
//!
//! # Responsibility
//! - Define the values exchanged between the catalog and service extensions.
//!
//! # Invariants
//! - Model types carry no behavior that touches I/O.

pub mod locator;
pub mod params;
