//! The realtime audio context.

use alloc::rc::Rc;

use delegate::delegate;

use crate::base_context::{AsBaseAudioContext, BaseAudioContext};
use crate::constants::SAMPLE_RATE_DEFAULT;
use crate::diagnostics::{default_diagnostics, Diagnostics};
use crate::enums::{AudioContextLatencyCategory, AudioContextState};
use crate::error::{Error, ErrorKind, Result, INVALID_STATE};
use crate::event::{Event, Listener, ListenerId};
use crate::interface::{Instance, Interface};
use crate::math::clamp;
use crate::nodes::{DelayNode, GainNode};

const INTERFACE: &str = "AudioContext";

/// Latency clamps for a numeric hint, in seconds.
const BASE_LATENCY_RANGE: (f64, f64) = (0.005, 0.5);
const OUTPUT_LATENCY_RANGE: (f64, f64) = (0.009, 1.0);

/// How much output latency the caller is willing to trade for stability.
#[derive(Clone, Debug, PartialEq)]
pub enum LatencyHint {
    /// A category name such as `"playback"`, validated on construction.
    Category(String),
    /// A preferred latency in seconds.
    Seconds(f64),
}

impl From<AudioContextLatencyCategory> for LatencyHint {
    fn from(category: AudioContextLatencyCategory) -> Self {
        LatencyHint::Category(category.as_str().to_owned())
    }
}

impl From<&str> for LatencyHint {
    fn from(category: &str) -> Self {
        LatencyHint::Category(category.to_owned())
    }
}

impl From<String> for LatencyHint {
    fn from(category: String) -> Self {
        LatencyHint::Category(category)
    }
}

impl From<f64> for LatencyHint {
    fn from(seconds: f64) -> Self {
        LatencyHint::Seconds(seconds)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AudioContextOptions {
    /// Defaults to `interactive`.
    pub latency_hint: Option<LatencyHint>,
    /// Defaults to 44100 Hz.
    pub sample_rate: Option<f64>,
}

impl AudioContextOptions {
    pub fn with_latency_hint(mut self, hint: impl Into<LatencyHint>) -> Self {
        self.latency_hint = Some(hint.into());
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: f64) -> Self {
        self.sample_rate = Some(sample_rate);
        self
    }
}

/// A context that would play to an output device.
///
/// It starts `running`. [`suspend`](Self::suspend) and [`resume`](Self::resume)
/// toggle between `running` and `suspended`, [`close`](Self::close) is terminal.
#[derive(Debug)]
pub struct AudioContext {
    base: BaseAudioContext,
    base_latency: f64,
    output_latency: f64,
}

impl AudioContext {
    pub fn new(options: AudioContextOptions) -> Result<Self> {
        Self::with_diagnostics(options, default_diagnostics())
    }

    /// Like [`new`](Self::new), reporting warnings to `diagnostics`.
    pub fn with_diagnostics(options: AudioContextOptions, diagnostics: Rc<dyn Diagnostics>) -> Result<Self> {
        let (base_latency, output_latency) = match &options.latency_hint {
            Some(hint) => latencies(hint)?,
            None => category_latencies(AudioContextLatencyCategory::default()),
        };

        let base = BaseAudioContext::define(
            Interface::AudioContext,
            AudioContextState::Running,
            options.sample_rate.unwrap_or(SAMPLE_RATE_DEFAULT),
            diagnostics,
        )?;

        Ok(Self {
            base,
            base_latency,
            output_latency,
        })
    }

    /// Processing latency in seconds.
    pub fn base_latency(&self) -> f64 {
        self.base_latency
    }

    /// Estimated time between rendering and audible output, in seconds.
    pub fn output_latency(&self) -> f64 {
        self.output_latency
    }

    pub async fn suspend(&self) -> Result<()> {
        self.ensure_open("suspend")?;
        self.base.transition(AudioContextState::Suspended);
        Ok(())
    }

    pub async fn resume(&self) -> Result<()> {
        self.ensure_open("resume")?;
        self.base.transition(AudioContextState::Running);
        Ok(())
    }

    pub async fn close(&self) -> Result<()> {
        self.ensure_open("close")?;
        self.base.transition(AudioContextState::Closed);
        Ok(())
    }

    fn ensure_open(&self, method: &'static str) -> Result<()> {
        if self.base.state() == AudioContextState::Closed {
            return Err(Error::execute(
                method,
                INTERFACE,
                INVALID_STATE,
                format!("Cannot {} a closed AudioContext.", method),
            ));
        }
        Ok(())
    }

    delegate! {
        to self.base {
            pub fn sample_rate(&self) -> f32;
            pub fn current_time(&self) -> f64;
            pub fn state(&self) -> AudioContextState;
            pub fn add_event_listener<F: Fn(&Event) + 'static>(&self, event_type: &str, listener: F) -> ListenerId;
            pub fn remove_event_listener(&self, id: ListenerId) -> bool;
            pub fn set_onstatechange(&self, handler: Option<Listener>);
            pub fn has_onstatechange(&self) -> bool;
            pub fn create_gain(&self) -> Result<GainNode>;
            pub fn create_delay(&self, max_delay_time: Option<f64>) -> Result<DelayNode>;
        }
    }
}

fn category_latencies(category: AudioContextLatencyCategory) -> (f64, f64) {
    match category {
        AudioContextLatencyCategory::Interactive => (0.005, 0.009),
        AudioContextLatencyCategory::Balanced => (0.011, 0.022),
        AudioContextLatencyCategory::Playback => (0.025, 0.051),
    }
}

fn latencies(hint: &LatencyHint) -> Result<(f64, f64)> {
    match hint {
        LatencyHint::Category(name) => {
            let category = name.parse::<AudioContextLatencyCategory>().map_err(|_| {
                latency_hint_error(format!(
                    "The provided value {} is not a valid enum value of type AudioContextLatencyCategory.",
                    name
                ))
            })?;
            Ok(category_latencies(category))
        }
        LatencyHint::Seconds(seconds) if !seconds.is_finite() => {
            Err(latency_hint_error("The provided double value is non-finite.".to_owned()))
        }
        LatencyHint::Seconds(seconds) => {
            let base = clamp(*seconds, BASE_LATENCY_RANGE.0, BASE_LATENCY_RANGE.1)?;
            let output = clamp(2.0 * base, OUTPUT_LATENCY_RANGE.0, OUTPUT_LATENCY_RANGE.1)?;
            Ok((base, output))
        }
    }
}

fn latency_hint_error(reason: String) -> Error {
    Error::construct(
        INTERFACE,
        ErrorKind::TypeError,
        format!(
            "Failed to read the 'latencyHint' property from 'AudioContextOptions': {}",
            reason
        ),
    )
}

impl Instance for AudioContext {
    fn interface(&self) -> Interface {
        Interface::AudioContext
    }
}

impl AsBaseAudioContext for AudioContext {
    fn base_context(&self) -> &BaseAudioContext {
        &self.base
    }
}
