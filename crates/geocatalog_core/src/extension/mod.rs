//! Service extension contracts.
//!
//! This module defines the SPI that data-service plugins implement and the
//! in-process registry that orders them for resolution.

pub mod registry;
pub mod spi;
