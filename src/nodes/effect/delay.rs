//! Delay effect - holds its input back by an automatable time

use delegate::delegate;

use crate::base_context::{AsBaseAudioContext, BaseAudioContext};
use crate::constants::{DELAY_TIME_MAX, MAX_DELAY_TIME_DEFAULT};
use crate::enums::{AutomationRate, ChannelCountMode, ChannelInterpretation};
use crate::error::{Error, ErrorKind, Result, NON_FINITE_FLOAT, NOT_SUPPORTED};
use crate::interface::{Instance, Interface};
use crate::math::JsNumber;
use crate::node::{AsAudioNode, AudioNode, AudioNodeOptions, ChannelOptions, NodeDefinition};
use crate::param::{AudioParam, AudioParamDescriptor};

const INTERFACE: &str = "DelayNode";
const DELAY_TIME_DEFAULT: f64 = 0.0;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DelayOptions {
    /// Initial delay in seconds, 0 when absent.
    pub delay_time: Option<f64>,
    /// Upper bound of `delayTime` in seconds, 1 when absent.
    pub max_delay_time: Option<f64>,
    pub audio_node: AudioNodeOptions,
}

impl DelayOptions {
    pub fn with_delay_time(mut self, delay_time: f64) -> Self {
        self.delay_time = Some(delay_time);
        self
    }

    pub fn with_max_delay_time(mut self, max_delay_time: f64) -> Self {
        self.max_delay_time = Some(max_delay_time);
        self
    }
}

impl ChannelOptions for DelayOptions {
    fn channel_options_mut(&mut self) -> &mut AudioNodeOptions {
        &mut self.audio_node
    }
}

/// A one-in, one-out node with a `delayTime` param bounded by `maxDelayTime`.
#[derive(Debug)]
pub struct DelayNode {
    node: AudioNode,
    delay_time: AudioParam,
}

impl DelayNode {
    pub fn new(context: &impl AsBaseAudioContext, options: DelayOptions) -> Result<Self> {
        let node = AudioNode::define(&NodeDefinition::new(INTERFACE), context, &options.audio_node)?;

        let max_delay_time = options.max_delay_time.unwrap_or(MAX_DELAY_TIME_DEFAULT);
        if !(max_delay_time > 0.0 && max_delay_time < DELAY_TIME_MAX) {
            return Err(Error::construct(
                INTERFACE,
                NOT_SUPPORTED,
                format!(
                    "The max delay time provided ({}) is outside the range (0, {}).",
                    JsNumber(max_delay_time),
                    JsNumber(DELAY_TIME_MAX)
                ),
            ));
        }

        let initial = options.delay_time.unwrap_or(DELAY_TIME_DEFAULT);
        if !initial.is_finite() {
            return Err(Error::construct(
                INTERFACE,
                ErrorKind::TypeError,
                format!("Failed to read the 'delayTime' property from 'DelayOptions': {}", NON_FINITE_FLOAT),
            ));
        }

        let descriptor = AudioParamDescriptor::new(AutomationRate::ARate, DELAY_TIME_DEFAULT, 0.0, max_delay_time)
            .with_value(initial);
        let delay_time = AudioParam::define(&descriptor, context.base_context().diagnostics())?;

        Ok(Self { node, delay_time })
    }

    pub fn delay_time(&self) -> &AudioParam {
        &self.delay_time
    }

    pub fn delay_time_mut(&mut self) -> &mut AudioParam {
        &mut self.delay_time
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

impl Instance for DelayNode {
    fn interface(&self) -> Interface {
        Interface::DelayNode
    }
}

impl AsAudioNode for DelayNode {
    fn audio_node(&self) -> &AudioNode {
        &self.node
    }

    fn audio_node_mut(&mut self) -> &mut AudioNode {
        &mut self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RecordedWarnings;
    use crate::{AudioContext, AudioContextOptions};

    fn context(warnings: &RecordedWarnings) -> AudioContext {
        AudioContext::with_diagnostics(AudioContextOptions::default(), warnings.handle()).unwrap()
    }

    #[test]
    fn defaults() {
        let warnings = RecordedWarnings::new();
        let ctx = context(&warnings);
        let node = DelayNode::new(&ctx, DelayOptions::default()).unwrap();

        assert_eq!(node.delay_time().value(), 0.0);
        assert_eq!(node.delay_time().default_value(), 0.0);
        assert_eq!(node.delay_time().min_value(), 0.0);
        assert_eq!(node.delay_time().max_value(), 1.0);
        assert_eq!(node.delay_time().automation_rate(), AutomationRate::ARate);
        assert_eq!((node.number_of_inputs(), node.number_of_outputs()), (1, 1));
        assert!(node.instance_of(Interface::AudioNode));
        assert!(node.instance_of(Interface::EventTarget));
    }

    #[test]
    fn max_delay_time_bounds_the_param() {
        let warnings = RecordedWarnings::new();
        let ctx = context(&warnings);
        let mut node = DelayNode::new(&ctx, DelayOptions::default().with_max_delay_time(5.0)).unwrap();
        assert_eq!(node.delay_time().max_value(), 5.0);

        node.delay_time_mut().set_value(7.5).unwrap();
        assert_eq!(node.delay_time().value(), 5.0);
        assert_eq!(
            warnings.messages(),
            ["value 7.5 outside nominal range [0, 5]; value will be clamped"]
        );
    }

    #[test]
    fn fractional_max_delay_time_is_not_clamped() {
        let warnings = RecordedWarnings::new();
        let ctx = context(&warnings);

        let mut node = DelayNode::new(
            &ctx,
            DelayOptions::default().with_max_delay_time(0.7).with_delay_time(0.7),
        )
        .unwrap();
        assert_eq!(node.delay_time().value(), 0.7);
        assert_eq!(node.delay_time().max_value(), 0.7);

        node.delay_time_mut().set_value(0.7).unwrap();
        assert!(warnings.is_empty());

        node.delay_time_mut().set_value(0.9).unwrap();
        assert_eq!(
            warnings.messages(),
            ["value 0.9 outside nominal range [0, 0.7]; value will be clamped"]
        );
    }

    #[test]
    fn max_delay_time_must_be_inside_open_range() {
        let warnings = RecordedWarnings::new();
        let ctx = context(&warnings);

        for (bad, shown) in [(0.0, "0"), (180.0, "180"), (-1.0, "-1"), (f64::NAN, "NaN")] {
            let err = DelayNode::new(&ctx, DelayOptions::default().with_max_delay_time(bad)).unwrap_err();
            assert_eq!(
                err.to_string(),
                format!(
                    "Failed to construct 'DelayNode': The max delay time provided ({}) is outside the range (0, 180).",
                    shown
                )
            );
            assert_eq!(err.kind(), NOT_SUPPORTED);
        }
    }

    #[test]
    fn initial_delay_time() {
        let warnings = RecordedWarnings::new();
        let ctx = context(&warnings);

        let node = DelayNode::new(&ctx, DelayOptions::default().with_delay_time(0.5)).unwrap();
        assert_eq!(node.delay_time().value(), 0.5);

        let node = DelayNode::new(&ctx, DelayOptions::default().with_delay_time(2.0)).unwrap();
        assert_eq!(node.delay_time().value(), 1.0);
        assert_eq!(warnings.len(), 1);

        let err = DelayNode::new(&ctx, DelayOptions::default().with_delay_time(f64::NEG_INFINITY)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to construct 'DelayNode': Failed to read the 'delayTime' property from 'DelayOptions': \
             The provided float value is non-finite."
        );
    }

    #[test]
    fn created_through_context() {
        let warnings = RecordedWarnings::new();
        let ctx = context(&warnings);

        let node = ctx.create_delay(Some(3.0)).unwrap();
        assert_eq!(node.delay_time().max_value(), 3.0);
        assert!(node.context() == ctx.base_context());

        assert!(ctx.create_delay(Some(200.0)).is_err());
        assert_eq!(ctx.create_delay(None).unwrap().delay_time().max_value(), 1.0);
    }
}
