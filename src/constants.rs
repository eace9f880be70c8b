//! Limits shared by the contexts, nodes and buffers.

/// Lowest sample rate every user agent guarantees.
pub const SAMPLE_RATE_MIN: f64 = 8000.0;
/// Highest sample rate every user agent guarantees.
pub const SAMPLE_RATE_MAX: f64 = 96000.0;
/// Sample rate of an [`AudioContext`](crate::AudioContext) built without one.
pub const SAMPLE_RATE_DEFAULT: f64 = 44100.0;

pub const NUMBER_OF_CHANNELS_MIN: f64 = 1.0;
pub const NUMBER_OF_CHANNELS_MAX: f64 = 32.0;
pub const NUMBER_OF_CHANNELS_DEFAULT: f64 = 1.0;

/// `channelCount` shares the channel limits but defaults to stereo.
pub const CHANNEL_COUNT_DEFAULT: f64 = 2.0;

pub const NUMBER_OF_PORTS_MIN: f64 = 0.0;
pub const NUMBER_OF_PORTS_MAX: f64 = 6.0;

/// Frames an [`OfflineAudioContext`](crate::OfflineAudioContext) must render at minimum.
pub const OFFLINE_LENGTH_MIN: f64 = 1.0;

/// Bound of the largest finite single-precision float, the range of an unbounded param.
pub const FLOAT_RANGE: f64 = f32::MAX as f64;

/// `maxDelayTime` must lie strictly inside `(0, DELAY_TIME_MAX)` seconds.
pub const DELAY_TIME_MAX: f64 = 180.0;
pub const MAX_DELAY_TIME_DEFAULT: f64 = 1.0;
