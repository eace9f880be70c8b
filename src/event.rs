//! Minimal event dispatch for context state changes.

use alloc::rc::Rc;

use crate::enums::AudioContextState;

pub const STATE_CHANGE: &str = "statechange";

/// An event delivered to context listeners.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    /// Event type, e.g. `"statechange"`.
    pub event_type: &'static str,
    /// State of the context at dispatch time.
    pub state: AudioContextState,
}

pub type Listener = Rc<dyn Fn(&Event)>;

/// Identifies a registered listener so it can be removed again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Listener storage behind a context.
///
/// `dispatch_targets` hands out clones of the matching listeners instead of
/// calling them, so callers can release their borrow before running user code.
#[derive(Default)]
pub(crate) struct EventTarget {
    listeners: Vec<(ListenerId, String, Listener)>,
    handler: Option<Listener>,
    next_id: u64,
}

impl EventTarget {
    pub fn add_listener(&mut self, event_type: &str, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, event_type.to_owned(), listener));
        id
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Replaces the `on<event>` handler; the previous one is detached.
    pub fn set_handler(&mut self, handler: Option<Listener>) {
        self.handler = handler;
    }

    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Registered listeners first, in registration order, then the handler slot.
    pub fn dispatch_targets(&self, event: &Event) -> Vec<Listener> {
        self.listeners
            .iter()
            .filter(|(_, event_type, _)| event_type == event.event_type)
            .map(|(_, _, listener)| Rc::clone(listener))
            .chain(self.handler.iter().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    fn event() -> Event {
        Event {
            event_type: STATE_CHANGE,
            state: AudioContextState::Running,
        }
    }

    #[test]
    fn dispatches_to_matching_listeners_and_handler() {
        let calls = Rc::new(Cell::new(0));
        let mut target = EventTarget::default();

        let counter = Rc::clone(&calls);
        target.add_listener(STATE_CHANGE, Rc::new(move |_: &Event| counter.set(counter.get() + 1)));
        target.add_listener("complete", Rc::new(|_: &Event| panic!("wrong event type")));
        let counter = Rc::clone(&calls);
        target.set_handler(Some(Rc::new(move |_: &Event| counter.set(counter.get() + 10))));

        for listener in target.dispatch_targets(&event()) {
            listener(&event());
        }
        assert_eq!(calls.get(), 11);
    }

    #[test]
    fn removed_listener_is_not_called() {
        let mut target = EventTarget::default();
        let id = target.add_listener(STATE_CHANGE, Rc::new(|_: &Event| panic!("removed")));

        assert!(target.remove_listener(id));
        assert!(!target.remove_listener(id));
        assert!(target.dispatch_targets(&event()).is_empty());
    }
}
