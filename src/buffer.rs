//! Fixed-size sample buffers.

use crate::base_context::validate_sample_rate;
use crate::constants::{NUMBER_OF_CHANNELS_DEFAULT, NUMBER_OF_CHANNELS_MAX, NUMBER_OF_CHANNELS_MIN};
use crate::error::{arguments_required, outside_range, Error, ErrorKind, Result, INDEX_SIZE, NOT_SUPPORTED};
use crate::interface::{Instance, Interface};
use crate::math::JsNumber;

const INTERFACE: &str = "AudioBuffer";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AudioBufferOptions {
    /// Frames per channel.
    pub length: f64,
    /// Defaults to 1.
    pub number_of_channels: Option<f64>,
    pub sample_rate: f64,
}

impl AudioBufferOptions {
    pub fn new(length: f64, sample_rate: f64) -> Self {
        Self {
            length,
            number_of_channels: None,
            sample_rate,
        }
    }

    pub fn with_number_of_channels(mut self, number_of_channels: f64) -> Self {
        self.number_of_channels = Some(number_of_channels);
        self
    }
}

/// Shape of a block of PCM audio. No samples are stored: every channel reads
/// back as silence.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioBuffer {
    length: usize,
    number_of_channels: u32,
    sample_rate: f32,
}

impl AudioBuffer {
    /// Passing `None` mirrors calling the constructor with no arguments.
    pub fn new<O: Into<Option<AudioBufferOptions>>>(options: O) -> Result<Self> {
        let options = options.into().ok_or_else(|| {
            Error::construct(INTERFACE, ErrorKind::TypeError, arguments_required(0))
        })?;

        let length = options.length;
        if !length.is_finite() || length <= 0.0 {
            return Err(Error::construct(
                INTERFACE,
                NOT_SUPPORTED,
                format!(
                    "The number of frames provided ({}) is less than or equal to the minimum bound (0)",
                    JsNumber(length)
                ),
            ));
        }

        let number_of_channels = options.number_of_channels.unwrap_or(NUMBER_OF_CHANNELS_DEFAULT);
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

        validate_sample_rate(INTERFACE, options.sample_rate)?;

        Ok(Self {
            length: length as usize,
            number_of_channels: number_of_channels as u32,
            sample_rate: options.sample_rate as f32,
        })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn number_of_channels(&self) -> u32 {
        self.number_of_channels
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Length in seconds.
    pub fn duration(&self) -> f64 {
        self.length as f64 / self.sample_rate as f64
    }

    /// A fresh zero-filled copy of `channel`.
    pub fn get_channel_data<C: Into<Option<f64>>>(&self, channel: C) -> Result<Vec<f32>> {
        let channel = channel.into().ok_or_else(|| {
            Error::execute(
                "getChannelData",
                INTERFACE,
                ErrorKind::TypeError,
                format!("{}.", arguments_required(0)),
            )
        })?;

        let last = self.number_of_channels as f64 - 1.0;
        if !(0.0..=last).contains(&channel) {
            return Err(Error::execute(
                "getChannelData",
                INTERFACE,
                INDEX_SIZE,
                format!(
                    "channel index ({}) exceeds number of channels ({})",
                    JsNumber(channel),
                    self.number_of_channels
                ),
            ));
        }

        Ok(vec![0.0; self.length])
    }
}

impl Instance for AudioBuffer {
    fn interface(&self) -> Interface {
        Interface::AudioBuffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn shape_and_duration() {
        let buffer = AudioBuffer::new(AudioBufferOptions::new(22050.0, 44100.0)).unwrap();
        assert_eq!(buffer.length(), 22050);
        assert_eq!(buffer.number_of_channels(), 1);
        assert_eq!(buffer.sample_rate(), 44100.0);
        assert_relative_eq!(buffer.duration(), 0.5);
        assert!(buffer.instance_of(Interface::AudioBuffer));
    }

    #[test]
    fn missing_options() {
        let err = AudioBuffer::new(None).unwrap_err();
        assert_eq!(err.to_string(), "Failed to construct 'AudioBuffer': 1 argument required, but only 0 present");
        assert_eq!(err.kind(), ErrorKind::TypeError);
    }

    #[test]
    fn validates_length_then_channels_then_sample_rate() {
        let err = AudioBuffer::new(AudioBufferOptions::new(0.0, 0.0).with_number_of_channels(0.0)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to construct 'AudioBuffer': \
             The number of frames provided (0) is less than or equal to the minimum bound (0)"
        );

        let err = AudioBuffer::new(AudioBufferOptions::new(1.0, 0.0).with_number_of_channels(33.0)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to construct 'AudioBuffer': The number of channels provided (33) is outside the range [1, 32]"
        );

        let err = AudioBuffer::new(AudioBufferOptions::new(1.0, 100000.0)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to construct 'AudioBuffer': The sample rate provided (100000) is outside the range [8000, 96000]"
        );
        assert_eq!(err.kind(), NOT_SUPPORTED);
    }

    #[test]
    fn channel_data_is_silent() {
        let buffer = AudioBuffer::new(AudioBufferOptions::new(4.0, 8000.0).with_number_of_channels(2.0)).unwrap();
        assert_eq!(buffer.get_channel_data(1.0).unwrap(), vec![0.0; 4]);

        let mut first = buffer.get_channel_data(0.0).unwrap();
        first[0] = 1.0;
        assert_eq!(buffer.get_channel_data(0.0).unwrap()[0], 0.0);
    }

    #[test]
    fn channel_data_argument_checks() {
        let buffer = AudioBuffer::new(AudioBufferOptions::new(4.0, 8000.0).with_number_of_channels(2.0)).unwrap();

        let err = buffer.get_channel_data(None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to execute 'getChannelData' on 'AudioBuffer': 1 argument required, but only 0 present."
        );

        for (bad, shown) in [(2.0, "2"), (-1.0, "-1"), (f64::NAN, "NaN")] {
            let err = buffer.get_channel_data(bad).unwrap_err();
            assert_eq!(
                err.to_string(),
                format!(
                    "Failed to execute 'getChannelData' on 'AudioBuffer': \
                     channel index ({}) exceeds number of channels (2)",
                    shown
                )
            );
            assert_eq!(err.kind(), INDEX_SIZE);
        }
    }
}
