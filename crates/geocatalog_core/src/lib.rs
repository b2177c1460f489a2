//! Catalog service resolution core for the geocatalog desktop client.
//!
//! Hosts register service extensions, then ask the `ServiceFactory` for
//! candidate handles from a dropped locator or from saved connection
//! parameters.

pub mod config;
pub mod extension;
pub mod logging;
pub mod model;
pub mod service;

pub use config::{ConfigError, ResolverConfig, DEBUG_ENV_VAR};
pub use extension::registry::{
    ExtensionRegistry, ExtensionRegistryError, ExtensionSource, RegisteredExtension,
};
pub use extension::spi::{ExtensionError, ExtensionKind, ExtensionResult, ServiceExtension};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::locator::{LocatorError, ServiceLocator};
pub use model::params::{ParamMap, ParamValue};
pub use service::diagnostics::{
    BufferedDiagnosticSink, DiagnosticRecord, DiagnosticSink, LogDiagnosticSink, Severity,
    DEVELOPER_LOG_TARGET,
};
pub use service::factory::{
    DisposeFailure, DisposeReport, ResolutionId, ServiceFactory, ServiceFactoryBuilder,
};
pub use service::handle::{ServiceError, ServiceHandle, ServiceResult};
pub use service::interceptor::{InterceptorChain, InterceptorError, ServiceInterceptor};
pub use service::progress::{NullProgressMonitor, ProgressMonitor, SubProgressMonitor};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
