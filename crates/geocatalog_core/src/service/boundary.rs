//! Per-call error boundary for collaborator code.

use crate::logging::panic_payload_text;
use std::panic::{self, AssertUnwindSafe};

/// Runs one collaborator call, converting a panic into `on_panic(payload)`.
///
/// The collaborator is not reused after a panic within the same step, so
/// unwind safety is asserted rather than required.
pub(crate) fn call_guarded<T, E>(
    call: impl FnOnce() -> Result<T, E>,
    on_panic: impl FnOnce(String) -> E,
) -> Result<T, E> {
    match panic::catch_unwind(AssertUnwindSafe(call)) {
        Ok(result) => result,
        Err(payload) => Err(on_panic(panic_payload_text(payload.as_ref()))),
    }
}
