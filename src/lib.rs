//! In-memory stand-ins for the Web Audio API.
//!
//! Contexts, nodes, params and buffers here validate their inputs and fail with
//! the same messages a browser does, without producing any sound:
//! - Hard failures are returned as [`Error`], whose `Display` is the browser text
//! - Soft failures (clamped params, ignored enum writes) go to a [`Diagnostics`] observer
//! - [`global::mock`] / [`global::unmock`] swap the mocks into a per-thread global namespace
//!
//! ```
//! use webaudio_mock::{AsBaseAudioContext, AudioContext, AudioContextOptions, Instance, Interface};
//!
//! let ctx = AudioContext::new(AudioContextOptions::default()).unwrap();
//! let mut gain = ctx.create_gain().unwrap();
//!
//! gain.gain_mut().set_value(0.5).unwrap();
//! assert_eq!(gain.gain().value(), 0.5);
//! assert!(gain.instance_of(Interface::AudioNode));
//! assert!(gain.context() == ctx.base_context());
//! ```

extern crate alloc;

mod audio_context;
mod base_context;
mod buffer;
pub mod constants;
mod diagnostics;
mod enums;
mod error;
mod event;
pub mod global;
mod interface;
pub mod math;
mod node;
pub mod nodes;
mod offline_context;
mod param;

pub use audio_context::{AudioContext, AudioContextOptions, LatencyHint};
pub use base_context::{AsBaseAudioContext, BaseAudioContext};
pub use buffer::{AudioBuffer, AudioBufferOptions};
pub use diagnostics::{Diagnostics, RecordedWarnings, TracingDiagnostics};
pub use enums::{
    AudioContextLatencyCategory, AudioContextState, AutomationRate, ChannelCountMode, ChannelInterpretation,
    InvalidEnumValue,
};
pub use error::{Error, ErrorKind, Result};
pub use event::{Event, Listener, ListenerId, STATE_CHANGE};
pub use global::{mock, unmock, Binding, GlobalScope, MockInstaller};
pub use interface::{Instance, Interface};
pub use node::{AsAudioNode, AudioNode, AudioNodeOptions, ChannelOptions, NodeDefinition};
pub use nodes::{DelayNode, DelayOptions, GainNode, GainOptions};
pub use offline_context::{Argument, OfflineAudioContext, OfflineAudioContextOptions};
pub use param::{AudioParam, AudioParamDescriptor};
