//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `geocatalog_core` linkage.
//! - Show which extensions would be probed for a locator given on the
//!   command line (none are registered in the smoke build).

use geocatalog_core::{ExtensionRegistry, ResolverConfig, ServiceFactory, ServiceLocator};
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    println!("geocatalog_core version={}", geocatalog_core::core_version());
    println!(
        "geocatalog_core default_log_level={}",
        geocatalog_core::default_log_level()
    );

    let config = match ResolverConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };
    println!("geocatalog_core debug={}", config.debug);

    let Some(raw) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };
    let locator = match ServiceLocator::parse(&raw) {
        Ok(locator) => locator,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let factory = ServiceFactory::builder(Arc::new(ExtensionRegistry::new()))
        .config(config)
        .build();
    let services = factory.resolve_url(&locator);
    println!(
        "locator={} scheme={} services={}",
        locator,
        locator.scheme().as_deref().unwrap_or("none"),
        services.len()
    );
    log::debug!("event=cli_probe module=cli status=ok services={}", services.len());
    factory.dispose(Some(services), None);
    ExitCode::SUCCESS
}
