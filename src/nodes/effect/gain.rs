//! Gain effect - scales its input by an automatable factor

use delegate::delegate;

use crate::base_context::{AsBaseAudioContext, BaseAudioContext};
use crate::constants::FLOAT_RANGE;
use crate::enums::{AutomationRate, ChannelCountMode, ChannelInterpretation};
use crate::error::{Error, ErrorKind, Result, NON_FINITE_FLOAT};
use crate::interface::{Instance, Interface};
use crate::node::{AsAudioNode, AudioNode, AudioNodeOptions, ChannelOptions, NodeDefinition};
use crate::param::{AudioParam, AudioParamDescriptor};

const INTERFACE: &str = "GainNode";
const GAIN_DEFAULT: f64 = 1.0;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GainOptions {
    /// Initial gain, 1 when absent.
    pub gain: Option<f64>,
    pub audio_node: AudioNodeOptions,
}

impl GainOptions {
    pub fn with_gain(mut self, gain: f64) -> Self {
        self.gain = Some(gain);
        self
    }
}

impl ChannelOptions for GainOptions {
    fn channel_options_mut(&mut self) -> &mut AudioNodeOptions {
        &mut self.audio_node
    }
}

/// A one-in, one-out node with a single `gain` param.
///
/// The param is unbounded in practice: its range is the full finite `f32`
/// range.
#[derive(Debug)]
pub struct GainNode {
    node: AudioNode,
    gain: AudioParam,
}

impl GainNode {
    pub fn new(context: &impl AsBaseAudioContext, options: GainOptions) -> Result<Self> {
        let node = AudioNode::define(&NodeDefinition::new(INTERFACE), context, &options.audio_node)?;

        let initial = options.gain.unwrap_or(GAIN_DEFAULT);
        if !initial.is_finite() {
            return Err(Error::construct(
                INTERFACE,
                ErrorKind::TypeError,
                format!("Failed to read the 'gain' property from 'GainOptions': {}", NON_FINITE_FLOAT),
            ));
        }

        let descriptor = AudioParamDescriptor::new(AutomationRate::ARate, GAIN_DEFAULT, -FLOAT_RANGE, FLOAT_RANGE)
            .with_value(initial);
        let gain = AudioParam::define(&descriptor, context.base_context().diagnostics())?;

        Ok(Self { node, gain })
    }

    pub fn gain(&self) -> &AudioParam {
        &self.gain
    }

    pub fn gain_mut(&mut self) -> &mut AudioParam {
        &mut self.gain
    }

    delegate! {
        to self.node {
            pub fn context(&self) -> &BaseAudioContext;
            pub fn number_of_inputs(&self) -> u32;
            pub fn number_of_outputs(&self) -> u32;
            pub fn channel_count(&self) -> u32;
            pub fn set_channel_count(&mut self, count: f64) -> Result<()>;
            pub fn channel_count_mode(&self) -> ChannelCountMode;
            pub fn set_channel_count_mode<M: AsRef<str>>(&mut self, mode: M);
            pub fn channel_interpretation(&self) -> ChannelInterpretation;
            pub fn set_channel_interpretation<I: AsRef<str>>(&mut self, interpretation: I);
            pub fn connect<N: AsAudioNode>(&self, destination: &N) -> Result<()>;
            pub fn disconnect(&self) -> Result<()>;
        }
    }
}

impl Instance for GainNode {
    fn interface(&self) -> Interface {
        Interface::GainNode
    }
}

impl AsAudioNode for GainNode {
    fn audio_node(&self) -> &AudioNode {
        &self.node
    }

    fn audio_node_mut(&mut self) -> &mut AudioNode {
        &mut self.node
    }
}
