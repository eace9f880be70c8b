//! The node base shared by every concrete node type.

use alloc::rc::Rc;
use core::fmt;

use crate::base_context::{AsBaseAudioContext, BaseAudioContext};
use crate::constants::{
    CHANNEL_COUNT_DEFAULT, NUMBER_OF_CHANNELS_MAX, NUMBER_OF_CHANNELS_MIN, NUMBER_OF_PORTS_MAX,
    NUMBER_OF_PORTS_MIN,
};
use crate::diagnostics::Diagnostics;
use crate::enums::{ChannelCountMode, ChannelInterpretation};
use crate::error::{outside_range, Error, ErrorKind, Result, NOT_SUPPORTED};
use crate::interface::{Instance, Interface};
use crate::math::JsNumber;

/// Channel configuration accepted by every node constructor.
///
/// The enum fields are kept as text so invalid values can be reported the way
/// a browser reports them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AudioNodeOptions {
    pub channel_count: Option<f64>,
    pub channel_count_mode: Option<String>,
    pub channel_interpretation: Option<String>,
}

/// Builder methods shared by all node option records.
pub trait ChannelOptions: Sized {
    fn channel_options_mut(&mut self) -> &mut AudioNodeOptions;

    fn with_channel_count(mut self, count: f64) -> Self {
        self.channel_options_mut().channel_count = Some(count);
        self
    }

    fn with_channel_count_mode(mut self, mode: impl AsRef<str>) -> Self {
        self.channel_options_mut().channel_count_mode = Some(mode.as_ref().to_owned());
        self
    }

    fn with_channel_interpretation(mut self, interpretation: impl AsRef<str>) -> Self {
        self.channel_options_mut().channel_interpretation = Some(interpretation.as_ref().to_owned());
        self
    }
}

impl ChannelOptions for AudioNodeOptions {
    fn channel_options_mut(&mut self) -> &mut AudioNodeOptions {
        self
    }
}

/// Names a node subtype and declares its port arity.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeDefinition {
    pub name: String,
    pub number_of_inputs: f64,
    pub number_of_outputs: f64,
}

impl NodeDefinition {
    /// A one-input, one-output subtype.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number_of_inputs: 1.0,
            number_of_outputs: 1.0,
        }
    }

    pub fn with_inputs(mut self, count: f64) -> Self {
        self.number_of_inputs = count;
        self
    }

    pub fn with_outputs(mut self, count: f64) -> Self {
        self.number_of_outputs = count;
        self
    }
}

/// Common state of a node in an audio graph.
///
/// `AudioNode` itself is abstract. Concrete nodes embed one built through
/// [`AudioNode::define`], which is also the way to declare a custom subtype:
///
/// ```
/// use webaudio_mock::{AudioContext, AudioContextOptions, AudioNode, AudioNodeOptions, NodeDefinition};
///
/// let ctx = AudioContext::new(AudioContextOptions::default()).unwrap();
/// let definition = NodeDefinition::new("SplitterNode").with_outputs(2.0);
/// let node = AudioNode::define(&definition, &ctx, &AudioNodeOptions::default()).unwrap();
///
/// assert_eq!(node.number_of_outputs(), 2);
/// assert_eq!(node.channel_count(), 2);
/// ```
pub struct AudioNode {
    name: String,
    context: BaseAudioContext,
    number_of_inputs: u32,
    number_of_outputs: u32,
    channel_count: u32,
    channel_count_mode: ChannelCountMode,
    channel_interpretation: ChannelInterpretation,
    diagnostics: Rc<dyn Diagnostics>,
}

impl AudioNode {
    /// `AudioNode` is abstract; see [`AudioNode::define`].
    pub fn new() -> Result<Self> {
        Err(Error::IllegalConstructor)
    }

    /// Builds the node base for the subtype described by `definition`.
    pub fn define(
        definition: &NodeDefinition,
        context: &impl AsBaseAudioContext,
        options: &AudioNodeOptions,
    ) -> Result<Self> {
        let name = definition.name.as_str();
        let number_of_inputs = port_count(name, "numberOfInputs", definition.number_of_inputs)?;
        let number_of_outputs = port_count(name, "numberOfOutputs", definition.number_of_outputs)?;

        let channel_count = options.channel_count.unwrap_or(CHANNEL_COUNT_DEFAULT);
        if !valid_channel_count(channel_count) {
            return Err(Error::construct(name, NOT_SUPPORTED, channel_count_range(channel_count)));
        }

        let channel_count_mode = match &options.channel_count_mode {
            Some(mode) => mode
                .parse::<ChannelCountMode>()
                .map_err(|invalid| option_error(name, "channelCountMode", invalid))?,
            None => ChannelCountMode::default(),
        };
        let channel_interpretation = match &options.channel_interpretation {
            Some(interpretation) => interpretation
                .parse::<ChannelInterpretation>()
                .map_err(|invalid| option_error(name, "channelInterpretation", invalid))?,
            None => ChannelInterpretation::default(),
        };

        let context = context.base_context().clone();
        let diagnostics = context.diagnostics();

        Ok(Self {
            name: name.to_owned(),
            context,
            number_of_inputs,
            number_of_outputs,
            channel_count: channel_count as u32,
            channel_count_mode,
            channel_interpretation,
            diagnostics,
        })
    }

    /// Subtype name used in error messages, e.g. `GainNode`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The context this node was created in.
    pub fn context(&self) -> &BaseAudioContext {
        &self.context
    }

    pub fn number_of_inputs(&self) -> u32 {
        self.number_of_inputs
    }

    pub fn number_of_outputs(&self) -> u32 {
        self.number_of_outputs
    }

    pub fn channel_count(&self) -> u32 {
        self.channel_count
    }

    pub fn set_channel_count(&mut self, count: f64) -> Result<()> {
        if !valid_channel_count(count) {
            return Err(Error::set_property(
                "channelCount",
                "AudioNode",
                NOT_SUPPORTED,
                channel_count_range(count),
            ));
        }
        self.channel_count = count as u32;
        Ok(())
    }

    pub fn channel_count_mode(&self) -> ChannelCountMode {
        self.channel_count_mode
    }

    /// Invalid modes are ignored with a warning.
    pub fn set_channel_count_mode<M: AsRef<str>>(&mut self, mode: M) {
        match mode.as_ref().parse::<ChannelCountMode>() {
            Ok(mode) => self.channel_count_mode = mode,
            Err(invalid) => self.diagnostics.warn(&invalid.to_string()),
        }
    }

    pub fn channel_interpretation(&self) -> ChannelInterpretation {
        self.channel_interpretation
    }

    /// Invalid interpretations are ignored with a warning.
    pub fn set_channel_interpretation<I: AsRef<str>>(&mut self, interpretation: I) {
        match interpretation.as_ref().parse::<ChannelInterpretation>() {
            Ok(interpretation) => self.channel_interpretation = interpretation,
            Err(invalid) => self.diagnostics.warn(&invalid.to_string()),
        }
    }

    /// Audio routing is not modelled.
    pub fn connect<N: AsAudioNode>(&self, _destination: &N) -> Result<()> {
        Err(Error::NotImplemented { method: "connect" })
    }

    pub fn disconnect(&self) -> Result<()> {
        Err(Error::NotImplemented { method: "disconnect" })
    }
}

fn port_count(interface: &str, field: &str, count: f64) -> Result<u32> {
    if !(NUMBER_OF_PORTS_MIN..=NUMBER_OF_PORTS_MAX).contains(&count) {
        return Err(Error::define(
            interface,
            format!(
                "{} {} is out of [{}, {}] range",
                field,
                JsNumber(count),
                JsNumber(NUMBER_OF_PORTS_MIN),
                JsNumber(NUMBER_OF_PORTS_MAX)
            ),
        ));
    }
    Ok(count as u32)
}

fn valid_channel_count(count: f64) -> bool {
    (NUMBER_OF_CHANNELS_MIN..=NUMBER_OF_CHANNELS_MAX).contains(&count)
}

fn channel_count_range(count: f64) -> String {
    outside_range("channel count", count, NUMBER_OF_CHANNELS_MIN, NUMBER_OF_CHANNELS_MAX)
}

fn option_error(interface: &str, field: &str, reason: impl fmt::Display) -> Error {
    Error::construct(
        interface,
        ErrorKind::TypeError,
        format!(
            "Failed to read the '{}' property from 'AudioNodeOptions': {}",
            field, reason
        ),
    )
}

impl Instance for AudioNode {
    fn interface(&self) -> Interface {
        Interface::AudioNode
    }
}

impl fmt::Debug for AudioNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioNode")
            .field("name", &self.name)
            .field("number_of_inputs", &self.number_of_inputs)
            .field("number_of_outputs", &self.number_of_outputs)
            .field("channel_count", &self.channel_count)
            .field("channel_count_mode", &self.channel_count_mode)
            .field("channel_interpretation", &self.channel_interpretation)
            .finish()
    }
}

/// Anything that is, or wraps, an [`AudioNode`].
pub trait AsAudioNode: Instance {
    fn audio_node(&self) -> &AudioNode;
    fn audio_node_mut(&mut self) -> &mut AudioNode;
}

impl AsAudioNode for AudioNode {
    fn audio_node(&self) -> &AudioNode {
        self
    }

    fn audio_node_mut(&mut self) -> &mut AudioNode {
        self
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

    fn node(ctx: &AudioContext, options: &AudioNodeOptions) -> Result<AudioNode> {
        AudioNode::define(&NodeDefinition::new("TestNode"), ctx, options)
    }

    #[test]
    fn direct_construction_is_illegal() {
        assert_eq!(AudioNode::new().unwrap_err(), Error::IllegalConstructor);
    }

    #[test]
    fn defaults() {
        let warnings = RecordedWarnings::new();
        let ctx = context(&warnings);
        let n = node(&ctx, &AudioNodeOptions::default()).unwrap();

        assert_eq!(n.name(), "TestNode");
        assert_eq!(n.number_of_inputs(), 1);
        assert_eq!(n.number_of_outputs(), 1);
        assert_eq!(n.channel_count(), 2);
        assert_eq!(n.channel_count_mode(), ChannelCountMode::Max);
        assert_eq!(n.channel_interpretation(), ChannelInterpretation::Speakers);
        assert!(n.context() == ctx.base_context());
    }

    #[test]
    fn port_counts_are_bounded() {
        let warnings = RecordedWarnings::new();
        let ctx = context(&warnings);

        let definition = NodeDefinition::new("TestNode").with_inputs(-1.0);
        let err = AudioNode::define(&definition, &ctx, &AudioNodeOptions::default()).unwrap_err();
        assert_eq!(err.to_string(), "Failed to define 'TestNode': numberOfInputs -1 is out of [0, 6] range");

        let definition = NodeDefinition::new("TestNode").with_outputs(7.0);
        let err = AudioNode::define(&definition, &ctx, &AudioNodeOptions::default()).unwrap_err();
        assert_eq!(err.to_string(), "Failed to define 'TestNode': numberOfOutputs 7 is out of [0, 6] range");

        let definition = NodeDefinition::new("SourceNode").with_inputs(0.0).with_outputs(6.0);
        let n = AudioNode::define(&definition, &ctx, &AudioNodeOptions::default()).unwrap();
        assert_eq!((n.number_of_inputs(), n.number_of_outputs()), (0, 6));
    }

    #[test]
    fn construction_validates_channel_options() {
        let warnings = RecordedWarnings::new();
        let ctx = context(&warnings);

        let err = node(&ctx, &AudioNodeOptions::default().with_channel_count(0.0)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to construct 'TestNode': The channel count provided (0) is outside the range [1, 32]"
        );
        assert_eq!(err.kind(), NOT_SUPPORTED);

        let err = node(&ctx, &AudioNodeOptions::default().with_channel_count_mode("loud")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to construct 'TestNode': Failed to read the 'channelCountMode' property from \
             'AudioNodeOptions': The provided value 'loud' is not a valid enum value of type ChannelCountMode."
        );

        let err = node(&ctx, &AudioNodeOptions::default().with_channel_interpretation("mono")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeError);

        let n = node(
            &ctx,
            &AudioNodeOptions::default()
                .with_channel_count(4.0)
                .with_channel_count_mode(ChannelCountMode::Explicit)
                .with_channel_interpretation("discrete"),
        )
        .unwrap();
        assert_eq!(n.channel_count(), 4);
        assert_eq!(n.channel_count_mode(), ChannelCountMode::Explicit);
        assert_eq!(n.channel_interpretation(), ChannelInterpretation::Discrete);
    }

    #[test]
    fn channel_count_setter_rejects_out_of_range() {
        let warnings = RecordedWarnings::new();
        let ctx = context(&warnings);
        let mut n = node(&ctx, &AudioNodeOptions::default()).unwrap();

        for bad in [0.0, 33.0, f64::NAN] {
            let err = n.set_channel_count(bad).unwrap_err();
            assert!(err
                .to_string()
                .starts_with("Failed to set the 'channelCount' property on 'AudioNode': The channel count provided"));
        }
        assert_eq!(n.channel_count(), 2);

        n.set_channel_count(32.0).unwrap();
        assert_eq!(n.channel_count(), 32);
    }

    #[test]
    fn invalid_enum_writes_warn_and_keep_value() {
        let warnings = RecordedWarnings::new();
        let ctx = context(&warnings);
        let mut n = node(&ctx, &AudioNodeOptions::default()).unwrap();

        n.set_channel_count_mode("everything");
        n.set_channel_interpretation("surround");
        assert_eq!(n.channel_count_mode(), ChannelCountMode::Max);
        assert_eq!(n.channel_interpretation(), ChannelInterpretation::Speakers);
        assert_eq!(
            warnings.messages(),
            [
                "The provided value 'everything' is not a valid enum value of type ChannelCountMode.",
                "The provided value 'surround' is not a valid enum value of type ChannelInterpretation."
            ]
        );

        n.set_channel_count_mode("clamped-max");
        assert_eq!(n.channel_count_mode(), ChannelCountMode::ClampedMax);
    }

    #[test]
    fn routing_is_not_implemented() {
        let warnings = RecordedWarnings::new();
        let ctx = context(&warnings);
        let a = node(&ctx, &AudioNodeOptions::default()).unwrap();
        let b = node(&ctx, &AudioNodeOptions::default()).unwrap();

        assert_eq!(a.connect(&b).unwrap_err().to_string(), "Method not implemented.");
        assert_eq!(a.disconnect().unwrap_err(), Error::NotImplemented { method: "disconnect" });
    }
}
