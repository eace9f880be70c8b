//! String-valued enumerations of the Web Audio API.
//!
//! Each enum parses from (and prints as) its Web IDL string, so setters can
//! accept either a typed variant or raw text and report invalid text the way a
//! browser does.

use core::fmt;
use core::str::FromStr;

/// A string that is not a member of a Web IDL enumeration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidEnumValue {
    pub type_name: &'static str,
    pub value: String,
}

impl fmt::Display for InvalidEnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "The provided value '{}' is not a valid enum value of type {}.",
            self.value, self.type_name
        )
    }
}

impl std::error::Error for InvalidEnumValue {}

macro_rules! idl_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $value:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The Web IDL string for this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $value, )+
                }
            }
        }

        impl FromStr for $name {
            type Err = InvalidEnumValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $value => Ok($name::$variant), )+
                    _ => Err(InvalidEnumValue {
                        type_name: stringify!($name),
                        value: s.to_owned(),
                    }),
                }
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

idl_enum! {
    /// Whether a param is sampled per frame or once per render quantum.
    pub enum AutomationRate {
        #[default]
        ARate => "a-rate",
        KRate => "k-rate",
    }
}

idl_enum! {
    /// How a node computes the number of channels it mixes to.
    pub enum ChannelCountMode {
        #[default]
        Max => "max",
        ClampedMax => "clamped-max",
        Explicit => "explicit",
    }
}

idl_enum! {
    /// How input channels are mapped when up- or down-mixing.
    pub enum ChannelInterpretation {
        #[default]
        Speakers => "speakers",
        Discrete => "discrete",
    }
}

idl_enum! {
    pub enum AudioContextState {
        #[default]
        Suspended => "suspended",
        Running => "running",
        Closed => "closed",
    }
}

idl_enum! {
    /// Named latency preference for an [`AudioContext`](crate::AudioContext).
    pub enum AudioContextLatencyCategory {
        Balanced => "balanced",
        #[default]
        Interactive => "interactive",
        Playback => "playback",
    }
}
