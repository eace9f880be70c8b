//! Automatable numeric parameters.

use alloc::rc::Rc;
use core::fmt;

use crate::diagnostics::Diagnostics;
use crate::enums::AutomationRate;
use crate::error::{Error, ErrorKind, Result, NON_FINITE_FLOAT};
use crate::interface::{Instance, Interface};
use crate::math::{clamp, JsNumber};

const INTERFACE: &str = "AudioParam";

/// Everything needed to define an [`AudioParam`].
///
/// The automation rate is kept as text so that an invalid rate can be rejected
/// with the same message a browser produces.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioParamDescriptor {
    pub automation_rate: String,
    pub default_value: f64,
    pub min_value: f64,
    pub max_value: f64,
    /// Initial value; `default_value` when absent.
    pub value: Option<f64>,
}

impl AudioParamDescriptor {
    pub fn new(automation_rate: impl AsRef<str>, default_value: f64, min_value: f64, max_value: f64) -> Self {
        Self {
            automation_rate: automation_rate.as_ref().to_owned(),
            default_value,
            min_value,
            max_value,
            value: None,
        }
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }
}

/// A single automatable value with a fixed nominal range.
///
/// The value is always inside `[min_value, max_value]`: finite writes outside
/// the range are clamped and reported to the diagnostics observer, non-finite
/// writes are rejected and leave the value untouched.
///
/// Numbers are kept as given and only narrowed to `f32` when read, so a write
/// equal to a bound compares equal to it.
pub struct AudioParam {
    automation_rate: AutomationRate,
    value: f64,
    default_value: f64,
    min_value: f64,
    max_value: f64,
    diagnostics: Rc<dyn Diagnostics>,
}

impl AudioParam {
    /// `AudioParam` cannot be constructed directly; params only exist as
    /// members of the node that owns them.
    pub fn new() -> Result<Self> {
        Err(Error::IllegalConstructor)
    }

    /// Builds a param for an owning node.
    pub fn define(descriptor: &AudioParamDescriptor, diagnostics: Rc<dyn Diagnostics>) -> Result<Self> {
        let automation_rate: AutomationRate = descriptor
            .automation_rate
            .parse::<AutomationRate>()
            .map_err(|invalid| read_error("automationRate", invalid))?;

        let default_value = float("defaultValue", descriptor.default_value)?;
        let min_value = float("minValue", descriptor.min_value)?;
        let max_value = float("maxValue", descriptor.max_value)?;
        let value = float("value", descriptor.value.unwrap_or(default_value))?;

        if min_value > max_value {
            return Err(Error::InvalidRange {
                min: JsNumber(min_value),
                max: JsNumber(max_value),
            });
        }

        let mut param = Self {
            automation_rate,
            value: default_value,
            default_value,
            min_value,
            max_value,
            diagnostics,
        };
        param.store(value)?;

        Ok(param)
    }

    pub fn automation_rate(&self) -> AutomationRate {
        self.automation_rate
    }

    /// Invalid rates are ignored with a warning.
    pub fn set_automation_rate<R: AsRef<str>>(&mut self, rate: R) {
        match rate.as_ref().parse::<AutomationRate>() {
            Ok(rate) => self.automation_rate = rate,
            Err(invalid) => self.diagnostics.warn(&invalid.to_string()),
        }
    }

    pub fn value(&self) -> f32 {
        self.value as f32
    }

    pub fn set_value(&mut self, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(Error::set_property(
                "value",
                INTERFACE,
                ErrorKind::TypeError,
                NON_FINITE_FLOAT,
            ));
        }

        self.store(value)
    }

    pub fn default_value(&self) -> f32 {
        self.default_value as f32
    }

    pub fn min_value(&self) -> f32 {
        self.min_value as f32
    }

    pub fn max_value(&self) -> f32 {
        self.max_value as f32
    }

    fn store(&mut self, value: f64) -> Result<()> {
        let clamped = clamp(value, self.min_value, self.max_value)?;

        if clamped != value {
            self.diagnostics.warn(&format!(
                "value {} outside nominal range [{}, {}]; value will be clamped",
                JsNumber(value),
                JsNumber(self.min_value),
                JsNumber(self.max_value)
            ));
        }

        self.value = clamped;
        Ok(())
    }
}

impl Instance for AudioParam {
    fn interface(&self) -> Interface {
        Interface::AudioParam
    }
}

impl fmt::Debug for AudioParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioParam")
            .field("automation_rate", &self.automation_rate)
            .field("value", &self.value)
            .field("default_value", &self.default_value)
            .field("min_value", &self.min_value)
            .field("max_value", &self.max_value)
            .finish()
    }
}

/// Descriptor fields are `float`s: they must stay finite once narrowed.
fn float(field: &str, value: f64) -> Result<f64> {
    if (value as f32).is_finite() {
        Ok(value)
    } else {
        Err(read_error(field, NON_FINITE_FLOAT))
    }
}

fn read_error(field: &str, reason: impl fmt::Display) -> Error {
    Error::construct(
        INTERFACE,
        ErrorKind::TypeError,
        format!(
            "Failed to read the '{}' property from 'AudioParamDescriptor': {}",
            field, reason
        ),
    )
}
