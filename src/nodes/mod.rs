//! Built-in audio nodes.
//!
//! ## Effects ([`effect`])
//!
//! One input, one output, one automatable param each:
//! - [`GainNode`] - scales its input by `gain`
//! - [`DelayNode`] - holds its input back by `delayTime`
//!
//! Every node embeds an [`AudioNode`](crate::AudioNode) for its channel
//! configuration and forwards the common accessors to it. Custom subtypes can
//! be declared through [`AudioNode::define`](crate::AudioNode::define).

pub mod effect;

pub use effect::{DelayNode, DelayOptions, GainNode, GainOptions};
