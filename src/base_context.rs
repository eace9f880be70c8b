//! State shared by every audio context.

use alloc::rc::Rc;
use core::cell::{Cell, RefCell};
use core::fmt;

use crate::constants::{SAMPLE_RATE_MAX, SAMPLE_RATE_MIN};
use crate::diagnostics::Diagnostics;
use crate::enums::AudioContextState;
use crate::error::{outside_range, Error, Result, NOT_SUPPORTED};
use crate::event::{Event, EventTarget, Listener, ListenerId, STATE_CHANGE};
use crate::interface::{Instance, Interface};
use crate::nodes::{DelayNode, DelayOptions, GainNode, GainOptions};

struct ContextInner {
    interface: Interface,
    sample_rate: f32,
    state: Cell<AudioContextState>,
    events: RefCell<EventTarget>,
    diagnostics: Rc<dyn Diagnostics>,
}

/// Handle to the root of an audio graph.
///
/// This is the `BaseAudioContext` part of every context. Handles are cheap to
/// clone and compare by identity: nodes keep a clone as their `context`, and
/// `node.context() == ctx.base_context()` holds only for the context that
/// created the node.
#[derive(Clone)]
pub struct BaseAudioContext {
    inner: Rc<ContextInner>,
}

impl BaseAudioContext {
    /// `BaseAudioContext` is abstract; build an [`AudioContext`](crate::AudioContext)
    /// or an [`OfflineAudioContext`](crate::OfflineAudioContext) instead.
    pub fn new() -> Result<Self> {
        Err(Error::IllegalConstructor)
    }

    /// Validates the sample rate on behalf of a concrete context.
    pub(crate) fn define(
        interface: Interface,
        state: AudioContextState,
        sample_rate: f64,
        diagnostics: Rc<dyn Diagnostics>,
    ) -> Result<Self> {
        if interface.is_abstract() {
            return Err(Error::IllegalConstructor);
        }
        validate_sample_rate(interface.name(), sample_rate)?;

        Ok(Self {
            inner: Rc::new(ContextInner {
                interface,
                sample_rate: sample_rate as f32,
                state: Cell::new(state),
                events: RefCell::new(EventTarget::default()),
                diagnostics,
            }),
        })
    }

    pub fn sample_rate(&self) -> f32 {
        self.inner.sample_rate
    }

    /// Time does not advance in the mock, so this is always zero.
    pub fn current_time(&self) -> f64 {
        0.0
    }

    pub fn state(&self) -> AudioContextState {
        self.inner.state.get()
    }

    /// Moves to `state` and notifies listeners. A no-op when already there.
    pub(crate) fn transition(&self, state: AudioContextState) {
        let previous = self.inner.state.replace(state);
        if previous == state {
            return;
        }

        tracing::debug!(
            interface = self.inner.interface.name(),
            from = previous.as_str(),
            to = state.as_str(),
            "context state changed"
        );

        let event = Event {
            event_type: STATE_CHANGE,
            state,
        };
        let targets = self.inner.events.borrow().dispatch_targets(&event);
        for listener in targets {
            listener(&event);
        }
    }

    pub fn add_event_listener<F>(&self, event_type: &str, listener: F) -> ListenerId
    where
        F: Fn(&Event) + 'static,
    {
        self.inner
            .events
            .borrow_mut()
            .add_listener(event_type, Rc::new(listener))
    }

    /// Returns whether a listener was removed.
    pub fn remove_event_listener(&self, id: ListenerId) -> bool {
        self.inner.events.borrow_mut().remove_listener(id)
    }

    /// Assigns the `onstatechange` slot, detaching whatever was there before.
    pub fn set_onstatechange(&self, handler: Option<Listener>) {
        self.inner.events.borrow_mut().set_handler(handler);
    }

    pub fn has_onstatechange(&self) -> bool {
        self.inner.events.borrow().has_handler()
    }

    pub fn create_gain(&self) -> Result<GainNode> {
        GainNode::new(self, GainOptions::default())
    }

    pub fn create_delay(&self, max_delay_time: Option<f64>) -> Result<DelayNode> {
        let options = DelayOptions {
            max_delay_time,
            ..DelayOptions::default()
        };
        DelayNode::new(self, options)
    }

    pub(crate) fn diagnostics(&self) -> Rc<dyn Diagnostics> {
        Rc::clone(&self.inner.diagnostics)
    }
}

pub(crate) fn validate_sample_rate(interface: &str, sample_rate: f64) -> Result<()> {
    if !sample_rate.is_finite() || sample_rate < SAMPLE_RATE_MIN || sample_rate > SAMPLE_RATE_MAX {
        return Err(Error::construct(
            interface,
            NOT_SUPPORTED,
            outside_range("sample rate", sample_rate, SAMPLE_RATE_MIN, SAMPLE_RATE_MAX),
        ));
    }
    Ok(())
}

impl PartialEq for BaseAudioContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for BaseAudioContext {}

impl Instance for BaseAudioContext {
    fn interface(&self) -> Interface {
        self.inner.interface
    }
}

impl fmt::Debug for BaseAudioContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseAudioContext")
            .field("interface", &self.inner.interface)
            .field("sample_rate", &self.inner.sample_rate)
            .field("state", &self.inner.state.get())
            .finish()
    }
}

/// Anything that is, or wraps, a [`BaseAudioContext`].
///
/// Node constructors take `&impl AsBaseAudioContext` so they accept every
/// context flavour.
pub trait AsBaseAudioContext: Instance {
    fn base_context(&self) -> &BaseAudioContext;
}

impl AsBaseAudioContext for BaseAudioContext {
    fn base_context(&self) -> &BaseAudioContext {
        self
    }
}
