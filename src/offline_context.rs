//! The offline (render-to-buffer) audio context.

use alloc::rc::Rc;

use delegate::delegate;

use crate::base_context::{AsBaseAudioContext, BaseAudioContext};
use crate::buffer::AudioBuffer;
use crate::constants::{NUMBER_OF_CHANNELS_DEFAULT, NUMBER_OF_CHANNELS_MAX, NUMBER_OF_CHANNELS_MIN, OFFLINE_LENGTH_MIN};
use crate::diagnostics::{default_diagnostics, Diagnostics};
use crate::enums::AudioContextState;
use crate::error::{arguments_required, outside_range, Error, ErrorKind, Result, NOT_SUPPORTED};
use crate::event::{Event, Listener, ListenerId};
use crate::interface::{Instance, Interface};
use crate::math::JsNumber;
use crate::nodes::{DelayNode, GainNode};

const INTERFACE: &str = "OfflineAudioContext";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OfflineAudioContextOptions {
    /// Defaults to 1.
    pub number_of_channels: Option<f64>,
    /// Number of frames to render.
    pub length: f64,
    pub sample_rate: f64,
}

impl OfflineAudioContextOptions {
    pub fn new(length: f64, sample_rate: f64) -> Self {
        Self {
            number_of_channels: None,
            length,
            sample_rate,
        }
    }

    pub fn with_number_of_channels(mut self, number_of_channels: f64) -> Self {
        self.number_of_channels = Some(number_of_channels);
        self
    }
}

/// One constructor argument, for callers that resolve the overloads at runtime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Argument {
    Options(OfflineAudioContextOptions),
    Number(f64),
}

impl From<OfflineAudioContextOptions> for Argument {
    fn from(options: OfflineAudioContextOptions) -> Self {
        Argument::Options(options)
    }
}

impl From<f64> for Argument {
    fn from(number: f64) -> Self {
        Argument::Number(number)
    }
}

/// A context that renders into a buffer of fixed length.
///
/// Its state stays `suspended`; rendering is not modelled.
#[derive(Debug)]
pub struct OfflineAudioContext {
    base: BaseAudioContext,
    length: usize,
    number_of_channels: u32,
}

impl OfflineAudioContext {
    pub fn new(options: OfflineAudioContextOptions) -> Result<Self> {
        Self::from_arguments(&[Argument::Options(options)])
    }

    /// The positional form: `(numberOfChannels, length, sampleRate)`.
    pub fn with_length(number_of_channels: f64, length: f64, sample_rate: f64) -> Result<Self> {
        Self::from_arguments(&[
            Argument::Number(number_of_channels),
            Argument::Number(length),
            Argument::Number(sample_rate),
        ])
    }

    /// Resolves between the options form and the positional form.
    ///
    /// Arguments past the third are ignored.
    pub fn from_arguments(arguments: &[Argument]) -> Result<Self> {
        Self::from_arguments_with_diagnostics(arguments, default_diagnostics())
    }

    pub fn from_arguments_with_diagnostics(arguments: &[Argument], diagnostics: Rc<dyn Diagnostics>) -> Result<Self> {
        let (number_of_channels, length, sample_rate) = match arguments {
            [] => {
                return Err(Error::construct(
                    INTERFACE,
                    ErrorKind::TypeError,
                    arguments_required(0),
                ))
            }
            [Argument::Options(options)] => (
                options.number_of_channels.unwrap_or(NUMBER_OF_CHANNELS_DEFAULT),
                options.length,
                options.sample_rate,
            ),
            [Argument::Number(channels), Argument::Number(length), Argument::Number(sample_rate), ..] => {
                (*channels, *length, *sample_rate)
            }
            _ => {
                return Err(Error::construct(
                    INTERFACE,
                    ErrorKind::TypeError,
                    "Overload resolution failed.",
                ))
            }
        };

        Self::build(number_of_channels, length, sample_rate, diagnostics)
    }

    fn build(number_of_channels: f64, length: f64, sample_rate: f64, diagnostics: Rc<dyn Diagnostics>) -> Result<Self> {
        if !(NUMBER_OF_CHANNELS_MIN..=NUMBER_OF_CHANNELS_MAX).contains(&number_of_channels) {
            return Err(Error::construct(
                INTERFACE,
                NOT_SUPPORTED,
                outside_range(
                    "number of channels",
                    number_of_channels,
                    NUMBER_OF_CHANNELS_MIN,
                    NUMBER_OF_CHANNELS_MAX,
                ),
            ));
        }

        if !length.is_finite() || length < OFFLINE_LENGTH_MIN {
            return Err(Error::construct(
                INTERFACE,
                NOT_SUPPORTED,
                format!(
                    "The number of frames provided ({}) is less than the minimum bound ({})",
                    JsNumber(length),
                    JsNumber(OFFLINE_LENGTH_MIN)
                ),
            ));
        }

        let base = BaseAudioContext::define(
            Interface::OfflineAudioContext,
            AudioContextState::Suspended,
            sample_rate,
            diagnostics,
        )?;

        Ok(Self {
            base,
            length: length as usize,
            number_of_channels: number_of_channels as u32,
        })
    }

    /// Frames the rendered buffer would hold.
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn number_of_channels(&self) -> u32 {
        self.number_of_channels
    }

    pub async fn start_rendering(&self) -> Result<AudioBuffer> {
        Err(Error::NotImplemented {
            method: "startRendering",
        })
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

impl Instance for OfflineAudioContext {
    fn interface(&self) -> Interface {
        Interface::OfflineAudioContext
    }
}

impl AsBaseAudioContext for OfflineAudioContext {
    fn base_context(&self) -> &BaseAudioContext {
        &self.base
    }
}
