//! Installing the mocks into a global namespace.
//!
//! The namespace stands in for a browser's global object. It is scoped to
//! the current thread, so every test thread gets an isolated "realm".
//!
//! ```
//! use webaudio_mock::{global, Binding, Interface};
//!
//! global::set_global("AudioContext", Binding::Host("native AudioContext".into()));
//!
//! global::mock().unwrap();
//! assert_eq!(global::get_global("AudioContext"), Some(Binding::Mock(Interface::AudioContext)));
//! assert_eq!(global::get_global("GainNode"), Some(Binding::Mock(Interface::GainNode)));
//!
//! global::unmock().unwrap();
//! assert_eq!(global::get_global("AudioContext"), Some(Binding::Host("native AudioContext".into())));
//! assert_eq!(global::get_global("GainNode"), None);
//! ```

use core::cell::RefCell;

use hashbrown::HashMap;
use itertools::Itertools;

use crate::error::{Error, Result};
use crate::interface::Interface;

/// What a global name refers to.
///
/// A mocked name carries the [`Interface`] it stands for. Code that looks a
/// constructor up by name dispatches on it:
///
/// ```
/// use webaudio_mock::{global, AudioContext, AudioContextOptions, Binding, Interface};
///
/// fn construct_audio_context() -> Option<AudioContext> {
///     match global::get_global("AudioContext")? {
///         Binding::Mock(Interface::AudioContext) => AudioContext::new(AudioContextOptions::default()).ok(),
///         Binding::Mock(_) | Binding::Host(_) => None,
///     }
/// }
///
/// assert!(construct_audio_context().is_none());
/// global::mock().unwrap();
/// assert!(construct_audio_context().is_some());
/// global::unmock().unwrap();
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Binding {
    /// One of the mock interfaces in this crate.
    Mock(Interface),
    /// Something the host environment provided, identified by description.
    Host(String),
}

impl Binding {
    /// The mock interface behind this binding, if any.
    pub fn interface(&self) -> Option<Interface> {
        match self {
            Binding::Mock(interface) => Some(*interface),
            Binding::Host(_) => None,
        }
    }
}

/// A set of global name bindings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlobalScope {
    bindings: HashMap<String, Binding>,
}

impl GlobalScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    /// Binds `name`, returning what it was bound to before.
    pub fn set(&mut self, name: impl Into<String>, binding: Binding) -> Option<Binding> {
        self.bindings.insert(name.into(), binding)
    }

    pub fn remove(&mut self, name: &str) -> Option<Binding> {
        self.bindings.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Swaps mock interfaces into a [`GlobalScope`] and back out again.
///
/// `mock` captures whatever each tracked name was bound to (including nothing)
/// and `unmock` restores exactly that. Calling either twice in a row fails
/// before touching the scope.
#[derive(Clone, Debug)]
pub struct MockInstaller {
    interfaces: Vec<Interface>,
    originals: Option<Vec<(Interface, Option<Binding>)>>,
}

impl Default for MockInstaller {
    fn default() -> Self {
        Self::with_interfaces(Interface::MOCKABLE.iter().copied())
    }
}

impl MockInstaller {
    /// Tracks every mockable interface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracks only `interfaces`, in the given order. Duplicates are dropped.
    pub fn with_interfaces(interfaces: impl IntoIterator<Item = Interface>) -> Self {
        Self {
            interfaces: interfaces.into_iter().unique().collect(),
            originals: None,
        }
    }

    pub fn interfaces(&self) -> &[Interface] {
        &self.interfaces
    }

    pub fn is_mocked(&self) -> bool {
        self.originals.is_some()
    }

    pub fn mock(&mut self, scope: &mut GlobalScope) -> Result<()> {
        if self.is_mocked() {
            return Err(Error::AlreadyMocked);
        }

        let originals = self
            .interfaces
            .iter()
            .map(|&interface| (interface, scope.set(interface.name(), Binding::Mock(interface))))
            .collect();
        self.originals = Some(originals);

        tracing::info!(
            interfaces = %self.interfaces.iter().map(|i| i.name()).join(", "),
            "using mocked version of Web Audio API"
        );
        Ok(())
    }

    pub fn unmock(&mut self, scope: &mut GlobalScope) -> Result<()> {
        let originals = self.originals.take().ok_or(Error::AlreadyOriginal)?;

        for (interface, original) in originals.into_iter().rev() {
            match original {
                Some(binding) => scope.set(interface.name(), binding),
                None => scope.remove(interface.name()),
            };
        }

        tracing::info!("back to the original version of Web Audio API");
        Ok(())
    }
}

thread_local! {
    static SCOPE: RefCell<GlobalScope> = RefCell::new(GlobalScope::new());
    static INSTALLER: RefCell<MockInstaller> = RefCell::new(MockInstaller::new());
}

/// Installs the mocks into this thread's global namespace.
pub fn mock() -> Result<()> {
    INSTALLER.with(|installer| SCOPE.with(|scope| installer.borrow_mut().mock(&mut scope.borrow_mut())))
}

/// Restores this thread's global namespace to its state before [`mock`].
pub fn unmock() -> Result<()> {
    INSTALLER.with(|installer| SCOPE.with(|scope| installer.borrow_mut().unmock(&mut scope.borrow_mut())))
}

pub fn is_mocked() -> bool {
    INSTALLER.with(|installer| installer.borrow().is_mocked())
}

/// Changes which interfaces [`mock`] installs on this thread.
///
/// Fails while the mocks are installed, since `unmock` has to restore the
/// names it captured.
pub fn set_interfaces(interfaces: impl IntoIterator<Item = Interface>) -> Result<()> {
    INSTALLER.with(|installer| {
        let mut installer = installer.borrow_mut();
        if installer.is_mocked() {
            return Err(Error::AlreadyMocked);
        }
        *installer = MockInstaller::with_interfaces(interfaces);
        Ok(())
    })
}

pub fn get_global(name: &str) -> Option<Binding> {
    SCOPE.with(|scope| scope.borrow().get(name).cloned())
}

/// The mock interface `name` currently resolves to, or `None` when the name
/// is unbound or belongs to the host.
pub fn resolve(name: &str) -> Option<Interface> {
    get_global(name).as_ref().and_then(Binding::interface)
}

pub fn set_global(name: &str, binding: Binding) -> Option<Binding> {
    SCOPE.with(|scope| scope.borrow_mut().set(name, binding))
}

pub fn remove_global(name: &str) -> Option<Binding> {
    SCOPE.with(|scope| scope.borrow_mut().remove(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(name: &str) -> Binding {
        Binding::Host(format!("native {}", name))
    }

    #[test]
    fn mock_binds_every_tracked_name() {
        let mut scope = GlobalScope::new();
        let mut installer = MockInstaller::new();

        installer.mock(&mut scope).unwrap();
        assert!(installer.is_mocked());
        assert_eq!(scope.len(), 8);
        for interface in Interface::MOCKABLE.iter() {
            assert_eq!(scope.get(interface.name()), Some(&Binding::Mock(*interface)));
        }
    }

    #[test]
    fn unmock_restores_values_and_absence() {
        let mut scope = GlobalScope::new();
        scope.set("AudioContext", host("AudioContext"));
        scope.set("fetch", host("fetch"));
        let before = scope.clone();

        let mut installer = MockInstaller::new();
        installer.mock(&mut scope).unwrap();
        installer.unmock(&mut scope).unwrap();

        assert_eq!(scope, before);
        assert!(!scope.contains("GainNode"));
        assert!(!installer.is_mocked());
    }

    #[test]
    fn double_calls_fail_without_side_effects() {
        let mut scope = GlobalScope::new();
        let mut installer = MockInstaller::new();

        assert_eq!(installer.unmock(&mut scope).unwrap_err(), Error::AlreadyOriginal);
        assert!(scope.is_empty());

        installer.mock(&mut scope).unwrap();
        let mocked = scope.clone();
        let err = installer.mock(&mut scope).unwrap_err();
        assert_eq!(err.to_string(), "already using mocked version of Web Audio API");
        assert_eq!(scope, mocked);

        installer.unmock(&mut scope).unwrap();
        let err = installer.unmock(&mut scope).unwrap_err();
        assert_eq!(err.to_string(), "already using the original version of Web Audio API");
    }

    #[test]
    fn originals_are_recaptured_on_each_mock() {
        let mut scope = GlobalScope::new();
        let mut installer = MockInstaller::with_interfaces(vec![Interface::AudioContext]);

        installer.mock(&mut scope).unwrap();
        installer.unmock(&mut scope).unwrap();
        scope.set("AudioContext", host("AudioContext"));

        installer.mock(&mut scope).unwrap();
        installer.unmock(&mut scope).unwrap();
        assert_eq!(scope.get("AudioContext"), Some(&host("AudioContext")));
    }

    #[test]
    fn configured_subset_leaves_other_names_alone() {
        let mut scope = GlobalScope::new();
        scope.set("GainNode", host("GainNode"));
        let mut installer =
            MockInstaller::with_interfaces(vec![Interface::AudioContext, Interface::AudioContext]);
        assert_eq!(installer.interfaces(), [Interface::AudioContext]);

        installer.mock(&mut scope).unwrap();
        assert_eq!(scope.get("AudioContext"), Some(&Binding::Mock(Interface::AudioContext)));
        assert_eq!(scope.get("GainNode"), Some(&host("GainNode")));
    }

    #[test]
    fn resolve_reports_only_mocked_names() {
        set_global("OfflineAudioContext", Binding::Host("native".to_owned()));
        assert_eq!(resolve("OfflineAudioContext"), None);
        assert_eq!(resolve("GainNode"), None);

        mock().unwrap();
        assert_eq!(resolve("OfflineAudioContext"), Some(Interface::OfflineAudioContext));
        assert_eq!(resolve("GainNode"), Some(Interface::GainNode));
        assert_eq!(resolve("AudioWorkletNode"), None);
        unmock().unwrap();

        assert_eq!(resolve("OfflineAudioContext"), None);
        assert_eq!(get_global("OfflineAudioContext").and_then(|b| b.interface()), None);
        remove_global("OfflineAudioContext");
    }

    #[test]
    fn thread_scoped_free_functions() {
        assert!(!is_mocked());
        set_global("OfflineAudioContext", host("OfflineAudioContext"));

        set_interfaces(vec![Interface::OfflineAudioContext, Interface::AudioBuffer]).unwrap();
        mock().unwrap();
        assert!(is_mocked());
        assert_eq!(set_interfaces(Interface::MOCKABLE.iter().copied()), Err(Error::AlreadyMocked));
        assert_eq!(get_global("AudioBuffer"), Some(Binding::Mock(Interface::AudioBuffer)));
        assert_eq!(get_global("AudioContext"), None);

        unmock().unwrap();
        assert_eq!(get_global("OfflineAudioContext"), Some(host("OfflineAudioContext")));
        assert_eq!(get_global("AudioBuffer"), None);
        assert_eq!(remove_global("OfflineAudioContext"), Some(host("OfflineAudioContext")));
    }
}
