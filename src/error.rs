//! Error types for webaudio-mock.
//!
//! Every hard failure carries the exact text a browser would throw, so
//! `err.to_string()` can be compared verbatim with a real implementation.

use core::fmt;

use thiserror::Error;

use crate::math::JsNumber;

/// The JavaScript error class a failure corresponds to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A plain `Error`.
    Error,
    TypeError,
    /// A `DOMException` with the given name, e.g. `NotSupportedError`.
    DomException(&'static str),
}

pub(crate) const NOT_SUPPORTED: ErrorKind = ErrorKind::DomException("NotSupportedError");
pub(crate) const INDEX_SIZE: ErrorKind = ErrorKind::DomException("IndexSizeError");
pub(crate) const INVALID_STATE: ErrorKind = ErrorKind::DomException("InvalidStateError");

/// Error type for webaudio-mock operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Illegal constructor")]
    IllegalConstructor,

    #[error("Failed to construct '{interface}': {reason}")]
    Construct {
        interface: String,
        kind: ErrorKind,
        reason: String,
    },

    /// A node subtype declared an invalid number of inputs or outputs.
    #[error("Failed to define '{interface}': {reason}")]
    Define {
        interface: String,
        kind: ErrorKind,
        reason: String,
    },

    #[error("Failed to set the '{property}' property on '{interface}': {reason}")]
    SetProperty {
        property: &'static str,
        interface: &'static str,
        kind: ErrorKind,
        reason: String,
    },

    #[error("Failed to execute '{method}' on '{interface}': {reason}")]
    Execute {
        method: &'static str,
        interface: &'static str,
        kind: ErrorKind,
        reason: String,
    },

    #[error("already using mocked version of Web Audio API")]
    AlreadyMocked,

    #[error("already using the original version of Web Audio API")]
    AlreadyOriginal,

    #[error("min cannot be more than max, but received min: {min}, max: {max}")]
    InvalidRange { min: JsNumber, max: JsNumber },

    #[error("Method not implemented.")]
    NotImplemented { method: &'static str },
}

impl Error {
    pub(crate) fn construct(interface: impl Into<String>, kind: ErrorKind, reason: impl fmt::Display) -> Self {
        Error::Construct {
            interface: interface.into(),
            kind,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn define(interface: impl Into<String>, reason: impl fmt::Display) -> Self {
        Error::Define {
            interface: interface.into(),
            kind: INDEX_SIZE,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn set_property(
        property: &'static str,
        interface: &'static str,
        kind: ErrorKind,
        reason: impl fmt::Display,
    ) -> Self {
        Error::SetProperty {
            property,
            interface,
            kind,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn execute(
        method: &'static str,
        interface: &'static str,
        kind: ErrorKind,
        reason: impl fmt::Display,
    ) -> Self {
        Error::Execute {
            method,
            interface,
            kind,
            reason: reason.to_string(),
        }
    }

    /// The JavaScript error class this failure would be thrown as.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::IllegalConstructor | Error::InvalidRange { .. } => ErrorKind::TypeError,
            Error::Construct { kind, .. }
            | Error::Define { kind, .. }
            | Error::SetProperty { kind, .. }
            | Error::Execute { kind, .. } => *kind,
            Error::AlreadyMocked | Error::AlreadyOriginal | Error::NotImplemented { .. } => ErrorKind::Error,
        }
    }
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;

// Reason fragments shared by several interfaces.

pub(crate) fn arguments_required(present: usize) -> String {
    format!("1 argument required, but only {} present", present)
}

pub(crate) fn outside_range(what: &str, value: f64, min: f64, max: f64) -> String {
    format!(
        "The {} provided ({}) is outside the range [{}, {}]",
        what,
        JsNumber(value),
        JsNumber(min),
        JsNumber(max)
    )
}

pub(crate) const NON_FINITE_FLOAT: &str = "The provided float value is non-finite.";
