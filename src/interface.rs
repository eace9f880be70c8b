//! The interface hierarchy, standing in for JavaScript prototype chains.
//!
//! Rust types do not inherit, so each mocked object reports the most derived
//! [`Interface`] it implements and `instance_of` walks the parent chain.

use core::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Interface {
    EventTarget,
    BaseAudioContext,
    AudioContext,
    OfflineAudioContext,
    AudioNode,
    GainNode,
    DelayNode,
    AudioParam,
    AudioBuffer,
}

impl Interface {
    /// Every interface the installer knows how to bind, in binding order.
    pub const MOCKABLE: [Interface; 8] = [
        Interface::AudioBuffer,
        Interface::AudioContext,
        Interface::AudioNode,
        Interface::AudioParam,
        Interface::BaseAudioContext,
        Interface::DelayNode,
        Interface::GainNode,
        Interface::OfflineAudioContext,
    ];

    /// The global name the interface is exposed under.
    pub fn name(self) -> &'static str {
        match self {
            Interface::EventTarget => "EventTarget",
            Interface::BaseAudioContext => "BaseAudioContext",
            Interface::AudioContext => "AudioContext",
            Interface::OfflineAudioContext => "OfflineAudioContext",
            Interface::AudioNode => "AudioNode",
            Interface::GainNode => "GainNode",
            Interface::DelayNode => "DelayNode",
            Interface::AudioParam => "AudioParam",
            Interface::AudioBuffer => "AudioBuffer",
        }
    }

    pub fn parent(self) -> Option<Interface> {
        match self {
            Interface::EventTarget | Interface::AudioParam | Interface::AudioBuffer => None,
            Interface::BaseAudioContext | Interface::AudioNode => Some(Interface::EventTarget),
            Interface::AudioContext | Interface::OfflineAudioContext => Some(Interface::BaseAudioContext),
            Interface::GainNode | Interface::DelayNode => Some(Interface::AudioNode),
        }
    }

    /// Abstract interfaces reject direct construction with `Illegal constructor`.
    pub fn is_abstract(self) -> bool {
        matches!(
            self,
            Interface::BaseAudioContext | Interface::AudioNode | Interface::AudioParam
        )
    }

    /// Whether `self` is `ancestor` or inherits from it.
    pub fn extends(self, ancestor: Interface) -> bool {
        let mut current = Some(self);
        while let Some(interface) = current {
            if interface == ancestor {
                return true;
            }
            current = interface.parent();
        }
        false
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An object that belongs to the interface hierarchy.
pub trait Instance {
    /// The most derived interface this object implements.
    fn interface(&self) -> Interface;

    /// The `instanceof` check.
    fn instance_of(&self, interface: Interface) -> bool {
        self.interface().extends(interface)
    }
}
