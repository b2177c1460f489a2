//! "Created" lifecycle observers.
//!
//! # Responsibility
//! - Let hosts observe every handle the catalog creates before it is handed
//!   back (auditing, decoration of diagnostics, metrics).
//!
//! # Invariants
//! - Observers run in registration order, once per created handle.
//! - A panicking observer is isolated; later observers still run and the
//!   handle is still returned.

use crate::service::boundary::call_guarded;
use crate::service::diagnostics::{DiagnosticSink, Severity};
use crate::service::handle::ServiceHandle;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Observer notified after a handle is instantiated.
pub trait ServiceInterceptor: Send + Sync {
    fn interceptor_id(&self) -> &str;

    fn created(&self, service: &dyn ServiceHandle);
}

/// Failure raised by one observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterceptorError {
    /// The observer panicked; payload is sanitized.
    Panicked(String),
}

impl Display for InterceptorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Panicked(payload) => write!(f, "service interceptor panicked: {payload}"),
        }
    }
}

impl Error for InterceptorError {}

/// Ordered list of "created" observers.
#[derive(Default, Clone)]
pub struct InterceptorChain {
    interceptors: Vec<Arc<dyn ServiceInterceptor>>,
}

impl InterceptorChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, interceptor: Arc<dyn ServiceInterceptor>) {
        self.interceptors.push(interceptor);
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Notifies every observer that `service` was created.
    ///
    /// Returns the number of observers that panicked.
    pub fn run_created(
        &self,
        service: &dyn ServiceHandle,
        diagnostics: Option<&dyn DiagnosticSink>,
    ) -> usize {
        let mut failed = 0;
        for interceptor in &self.interceptors {
            let outcome = call_guarded(
                || {
                    interceptor.created(service);
                    Ok(())
                },
                InterceptorError::Panicked,
            );
            if let Err(err) = outcome {
                failed += 1;
                log::warn!(
                    "event=interceptor_failed module=catalog status=error interceptor_id={} service={}",
                    interceptor.interceptor_id(),
                    service.identifier()
                );
                if let Some(sink) = diagnostics {
                    sink.report(
                        Severity::Error,
                        &format!(
                            "{} failed while intercepting {}",
                            interceptor.interceptor_id(),
                            service.identifier()
                        ),
                        Some(&err),
                    );
                }
            }
        }
        failed
    }
}
