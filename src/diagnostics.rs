//! Soft-failure reporting.
//!
//! Invalid enum writes and out-of-range param values are not errors: the write
//! is ignored or clamped and a warning is reported instead. Warnings go to a
//! [`Diagnostics`] observer injected at context construction, so tests can
//! assert on them without hooking a global console.

use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;

/// Receives the warnings emitted by contexts, nodes and params.
pub trait Diagnostics {
    /// Report one warning. `message` is the complete, formatted text.
    fn warn(&self, message: &str);
}

/// Forwards warnings to `tracing` at `WARN` level. This is the default observer.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn warn(&self, message: &str) {
        tracing::warn!(target: "webaudio_mock", "{}", message);
    }
}

/// Records warnings in memory for later inspection.
///
/// Clones share the same log, so keep one handle in the test and pass another
/// to the context:
///
/// ```
/// # use webaudio_mock::{AudioContext, AudioContextOptions, RecordedWarnings};
/// let warnings = RecordedWarnings::new();
/// let ctx = AudioContext::with_diagnostics(AudioContextOptions::default(), warnings.handle()).unwrap();
/// let mut gain = ctx.create_gain().unwrap();
/// gain.gain_mut().set_value(-5e38).unwrap();
/// assert_eq!(warnings.len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct RecordedWarnings {
    messages: Rc<RefCell<Vec<String>>>,
}

impl RecordedWarnings {
    pub fn new() -> Self {
        Self::default()
    }

    /// A shared handle suitable for injecting into a context.
    pub fn handle(&self) -> Rc<dyn Diagnostics> {
        Rc::new(self.clone())
    }

    /// All recorded warnings, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.messages.borrow().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.messages.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.borrow().is_empty()
    }

    pub fn contains(&self, message: &str) -> bool {
        self.messages.borrow().iter().any(|m| m == message)
    }

    pub fn clear(&self) {
        self.messages.borrow_mut().clear();
    }
}

impl Diagnostics for RecordedWarnings {
    fn warn(&self, message: &str) {
        tracing::debug!(target: "webaudio_mock", warning = message, "recorded warning");
        self.messages.borrow_mut().push(message.to_owned());
    }
}

impl fmt::Debug for RecordedWarnings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.messages.borrow().iter()).finish()
    }
}

/// The observer used when none is injected.
pub(crate) fn default_diagnostics() -> Rc<dyn Diagnostics> {
    Rc::new(TracingDiagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_one_log() {
        let warnings = RecordedWarnings::new();
        let handle = warnings.handle();
        handle.warn("first");
        handle.warn("second");

        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings.last().as_deref(), Some("second"));
        assert!(warnings.contains("first"));

        warnings.clear();
        assert!(warnings.is_empty());
    }

    #[test]
    fn tracing_observer_does_not_panic_without_subscriber() {
        TracingDiagnostics.warn("nobody is listening");
    }
}
