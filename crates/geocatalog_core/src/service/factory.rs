//! Catalog service factory.
//!
//! # Responsibility
//! - Probe registered service extensions to build candidate handles from a
//!   locator or from known connection parameters.
//! - Dispose handle lists on behalf of callers.
//!
//! # Invariants
//! - Specific extensions are always tried first; generic extensions are
//!   consulted only when no specific extension produced a handle.
//! - One extension's failure never aborts resolution of the others.
//! - Returned handles are unvalidated; no connection is attempted here.
//! - Resolution with parameters never calls `derive_params`.

use crate::config::ResolverConfig;
use crate::extension::registry::{ExtensionSource, RegisteredExtension};
use crate::extension::spi::{ExtensionError, ExtensionResult};
use crate::model::locator::ServiceLocator;
use crate::model::params::{param_keys_summary, ParamMap};
use crate::service::boundary::call_guarded;
use crate::service::diagnostics::{DiagnosticSink, Severity, DEVELOPER_LOG_TARGET};
use crate::service::handle::{ServiceError, ServiceHandle};
use crate::service::interceptor::{InterceptorChain, ServiceInterceptor};
use crate::service::progress::{NullProgressMonitor, ProgressMonitor, SubProgressMonitor};
use std::error::Error;
use std::sync::Arc;
use uuid::Uuid;

/// Parent progress units allotted to each disposed handle.
const DISPOSE_TICKS_PER_HANDLE: u32 = 10;

/// Correlates log events emitted during one resolution call.
pub type ResolutionId = Uuid;

/// Resolves service handles from registered extensions.
pub struct ServiceFactory {
    extensions: Arc<dyn ExtensionSource>,
    diagnostics: Option<Arc<dyn DiagnosticSink>>,
    interceptors: InterceptorChain,
    config: ResolverConfig,
}

/// Builder wiring the factory's injected collaborators.
pub struct ServiceFactoryBuilder {
    extensions: Arc<dyn ExtensionSource>,
    diagnostics: Option<Arc<dyn DiagnosticSink>>,
    interceptors: InterceptorChain,
    config: ResolverConfig,
}

impl ServiceFactoryBuilder {
    pub fn diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = Some(sink);
        self
    }

    /// Appends one "created" observer; observers run in the order added.
    pub fn interceptor(mut self, interceptor: Arc<dyn ServiceInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    pub fn config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> ServiceFactory {
        ServiceFactory {
            extensions: self.extensions,
            diagnostics: self.diagnostics,
            interceptors: self.interceptors,
            config: self.config,
        }
    }
}

/// Outcome of one `dispose` call.
#[derive(Debug, Default)]
pub struct DisposeReport {
    pub disposed: usize,
    pub failures: Vec<DisposeFailure>,
}

impl DisposeReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// One handle whose disposal failed.
#[derive(Debug)]
pub struct DisposeFailure {
    pub identifier: String,
    pub error: ServiceError,
}

impl ServiceFactory {
    /// Starts a builder with no sink, no interceptors and default config.
    pub fn builder(extensions: Arc<dyn ExtensionSource>) -> ServiceFactoryBuilder {
        ServiceFactoryBuilder {
            extensions,
            diagnostics: None,
            interceptors: InterceptorChain::new(),
            config: ResolverConfig::default(),
        }
    }

    pub fn new(extensions: Arc<dyn ExtensionSource>) -> Self {
        Self::builder(extensions).build()
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Lists candidate handles from every extension that recognises
    /// `locator`.
    ///
    /// # Contract
    /// - Specific extensions derive parameters first; every extension that
    ///   produced parameters is then asked to instantiate, in registry order.
    /// - Generic extensions derive parameters only when the specific pass
    ///   produced no handle.
    /// - Derivation failures are reported as warnings only in debug mode;
    ///   instantiation failures are always reported as errors.
    /// - Returns an empty list when nothing matched.
    pub fn resolve_url(&self, locator: &ServiceLocator) -> Vec<Box<dyn ServiceHandle>> {
        let resolution_id: ResolutionId = Uuid::new_v4();
        let (specific, generic) = partition(self.extensions.service_extensions());

        let mut candidacy: Vec<(&RegisteredExtension, ParamMap)> = Vec::new();
        for entry in &specific {
            match self.derive(entry, locator) {
                Ok(Some(params)) => candidacy.push((entry, params)),
                Ok(None) => {}
                Err(err) => {
                    if self.config.debug {
                        self.report(
                            Severity::Warning,
                            format!(
                                "{} could not create params {}",
                                entry.extension_id(),
                                locator
                            ),
                            &err,
                        );
                    }
                }
            }
        }

        let mut candidates = Vec::new();
        for (entry, params) in &candidacy {
            log::debug!(
                "event=service_candidate module=catalog resolution_id={} extension_id={} params={}",
                resolution_id,
                entry.extension_id(),
                param_keys_summary(params)
            );
            match self.instantiate(entry, params) {
                Ok(Some(service)) => self.accept(service, &mut candidates),
                Ok(None) => {}
                Err(err) => self.report_instantiation_failure(entry, &err),
            }
        }

        let mut used_generic = false;
        if candidates.is_empty() && !generic.is_empty() {
            used_generic = true;
            for entry in &generic {
                let outcome = self.derive(entry, locator).and_then(|params| match params {
                    Some(params) => self.instantiate(entry, &params),
                    None => Ok(None),
                });
                match outcome {
                    Ok(Some(service)) => self.accept(service, &mut candidates),
                    Ok(None) => {}
                    Err(err) => self.report_instantiation_failure(entry, &err),
                }
            }
        }

        log::info!(
            "event=resolve_url module=catalog status=ok resolution_id={} scheme={} specific={} generic={} candidates={} used_generic={} services={}",
            resolution_id,
            locator.scheme().as_deref().unwrap_or("none"),
            specific.len(),
            generic.len(),
            candidacy.len(),
            used_generic,
            candidates.len()
        );
        candidates
    }

    /// Builds handles from already-known connection parameters.
    ///
    /// # Contract
    /// - Specific extensions instantiate first; failures are reported as
    ///   errors.
    /// - Generic extensions run only when the specific pass produced no
    ///   handle; their failures go to the trace channel and the developer
    ///   log target.
    /// - Never calls `derive_params`.
    pub fn resolve_params(&self, params: &ParamMap) -> Vec<Box<dyn ServiceHandle>> {
        let resolution_id: ResolutionId = Uuid::new_v4();
        let (specific, generic) = partition(self.extensions.service_extensions());

        let mut services = Vec::new();
        for entry in &specific {
            match self.instantiate(entry, params) {
                Ok(Some(service)) => self.accept(service, &mut services),
                Ok(None) => {}
                Err(err) => self.report_instantiation_failure(entry, &err),
            }
        }

        let used_generic = services.is_empty();
        if used_generic {
            for entry in &generic {
                match self.instantiate(entry, params) {
                    Ok(Some(service)) => self.accept(service, &mut services),
                    Ok(None) => {}
                    Err(err) => {
                        log::debug!(
                            target: DEVELOPER_LOG_TARGET,
                            "event=generic_instantiate_failed module=catalog resolution_id={} extension_id={} error={:?}",
                            resolution_id,
                            entry.extension_id(),
                            err
                        );
                        self.report(
                            Severity::Trace,
                            format!("{} could not create service", entry.extension_id()),
                            &err,
                        );
                    }
                }
            }
        }

        log::info!(
            "event=resolve_params module=catalog status=ok resolution_id={} params={} specific={} generic={} used_generic={} services={}",
            resolution_id,
            param_keys_summary(params),
            specific.len(),
            generic.len(),
            used_generic,
            services.len()
        );
        services
    }

    /// Disposes every handle in `services`, continuing past failures.
    ///
    /// `None` is a no-op. A missing monitor is replaced with a null monitor.
    pub fn dispose(
        &self,
        services: Option<Vec<Box<dyn ServiceHandle>>>,
        monitor: Option<&mut dyn ProgressMonitor>,
    ) -> DisposeReport {
        let mut report = DisposeReport::default();
        let Some(services) = services else {
            return report;
        };

        let mut fallback = NullProgressMonitor;
        let monitor: &mut dyn ProgressMonitor = match monitor {
            Some(monitor) => monitor,
            None => &mut fallback,
        };

        let total_work = u32::try_from(services.len())
            .unwrap_or(u32::MAX)
            .saturating_mul(DISPOSE_TICKS_PER_HANDLE);
        monitor.begin_task("dispose", total_work);

        for mut service in services {
            let identifier = service.identifier().to_string();
            let mut sub = SubProgressMonitor::new(&mut *monitor, DISPOSE_TICKS_PER_HANDLE);
            let outcome = call_guarded(|| service.dispose(&mut sub), ServiceError::Panicked);
            sub.done();

            match outcome {
                Ok(()) => report.disposed += 1,
                Err(error) => {
                    self.report(Severity::Trace, format!("Dispose {identifier}"), &error);
                    report.failures.push(DisposeFailure { identifier, error });
                }
            }
        }
        monitor.done();

        log::debug!(
            "event=dispose module=catalog status={} disposed={} failed={}",
            if report.is_clean() { "ok" } else { "partial" },
            report.disposed,
            report.failures.len()
        );
        report
    }

    fn derive(
        &self,
        entry: &RegisteredExtension,
        locator: &ServiceLocator,
    ) -> ExtensionResult<Option<ParamMap>> {
        call_guarded(
            || entry.extension.derive_params(locator),
            ExtensionError::Panicked,
        )
    }

    fn instantiate(
        &self,
        entry: &RegisteredExtension,
        params: &ParamMap,
    ) -> ExtensionResult<Option<Box<dyn ServiceHandle>>> {
        call_guarded(
            || entry.extension.instantiate(params),
            ExtensionError::Panicked,
        )
    }

    fn accept(&self, service: Box<dyn ServiceHandle>, into: &mut Vec<Box<dyn ServiceHandle>>) {
        self.interceptors
            .run_created(service.as_ref(), self.diagnostics.as_deref());
        into.push(service);
    }

    fn report_instantiation_failure(&self, entry: &RegisteredExtension, err: &ExtensionError) {
        self.report(
            Severity::Error,
            format!("{} could not create service", entry.extension_id()),
            err,
        );
    }

    fn report(&self, severity: Severity, message: String, cause: &dyn Error) {
        if let Some(sink) = &self.diagnostics {
            sink.report(severity, &message, Some(cause));
        }
    }
}

/// Splits registry entries into `(specific, generic)`, keeping order.
fn partition(
    entries: Vec<RegisteredExtension>,
) -> (Vec<RegisteredExtension>, Vec<RegisteredExtension>) {
    let (generic, specific): (Vec<_>, Vec<_>) = entries
        .into_iter()
        .partition(RegisteredExtension::is_generic);
    (specific, generic)
}

#[cfg(test)]
mod tests {
    use super::partition;
    use crate::extension::registry::RegisteredExtension;
    use crate::extension::spi::{ExtensionKind, ExtensionResult, ServiceExtension};
    use crate::model::locator::ServiceLocator;
    use crate::model::params::ParamMap;
    use crate::service::handle::ServiceHandle;
    use std::sync::Arc;

    struct Idle(&'static str);

    impl ServiceExtension for Idle {
        fn extension_id(&self) -> &str {
            self.0
        }

        fn derive_params(&self, _locator: &ServiceLocator) -> ExtensionResult<Option<ParamMap>> {
            Ok(None)
        }

        fn instantiate(
            &self,
            _params: &ParamMap,
        ) -> ExtensionResult<Option<Box<dyn ServiceHandle>>> {
            Ok(None)
        }
    }

    #[test]
    fn partition_keeps_registry_order_within_each_class() {
        let entries = vec![
            RegisteredExtension::with_kind(Arc::new(Idle("geotools.a")), ExtensionKind::Generic),
            RegisteredExtension::new(Arc::new(Idle("wms"))),
            RegisteredExtension::with_kind(Arc::new(Idle("geotools.b")), ExtensionKind::Generic),
            RegisteredExtension::new(Arc::new(Idle("shapefile"))),
        ];

        let (specific, generic) = partition(entries);
        let ids = |entries: &[RegisteredExtension]| -> Vec<String> {
            entries
                .iter()
                .map(|entry| entry.extension_id().to_string())
                .collect()
        };
        assert_eq!(ids(&specific), vec!["wms", "shapefile"]);
        assert_eq!(ids(&generic), vec!["geotools.a", "geotools.b"]);
    }
}
