//! Numeric helpers shared by the validation code.

use core::fmt;

use crate::error::{Error, Result};

/// Constrain `value` into `[min, max]`.
///
/// Fails when the range itself is inverted.
///
/// ```
/// # use webaudio_mock::math::clamp;
/// assert_eq!(clamp(11.0, 0.0, 10.0).unwrap(), 10.0);
/// assert!(clamp(0.0, 1.0, -1.0).is_err());
/// ```
pub fn clamp(value: f64, min: f64, max: f64) -> Result<f64> {
    if min > max {
        return Err(Error::InvalidRange {
            min: JsNumber(min),
            max: JsNumber(max),
        });
    }

    Ok(value.min(max).max(min))
}

/// Returns `percent` of the width of `[min, max]`.
///
/// `range_percent(0.25, -1.0, 1.0)` is `0.5`: a quarter of a range two units wide.
pub fn range_percent(percent: f64, min: f64, max: f64) -> Result<f64> {
    if min > max {
        return Err(Error::InvalidRange {
            min: JsNumber(min),
            max: JsNumber(max),
        });
    }

    Ok((max - min) * percent)
}

/// Formats a number the way a JavaScript engine stringifies it.
///
/// Error and warning messages embed the offending number, and callers compare
/// those messages verbatim, so `1.0` must print as `1`, infinities as
/// `Infinity` and large magnitudes as `5e+38`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JsNumber(pub f64);

impl fmt::Display for JsNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.0;

        if n.is_nan() {
            return f.write_str("NaN");
        }
        if n.is_infinite() {
            return f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" });
        }
        if n == 0.0 {
            // covers -0 as well
            return f.write_str("0");
        }

        let magnitude = n.abs();
        if magnitude >= 1e21 || magnitude < 1e-6 {
            let exp = format!("{:e}", n);
            return match exp.split_once('e') {
                Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                    write!(f, "{}e+{}", mantissa, exponent)
                }
                _ => f.write_str(&exp),
            };
        }

        write!(f, "{}", n)
    }
}

impl From<f32> for JsNumber {
    fn from(n: f32) -> Self {
        JsNumber(n as f64)
    }
}

impl From<f64> for JsNumber {
    fn from(n: f64) -> Self {
        JsNumber(n)
    }
}
