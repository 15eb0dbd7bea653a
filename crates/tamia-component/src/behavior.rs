//! Behavior descriptors
//!
//! A `Behavior` type describes one kind of component: its method table,
//! which methods get bound, and the lifecycle hooks. Every hook has a
//! default, so a behavior only implements what it needs.

use tamia_dom::Event;

use crate::{BehaviorResult, Component};

/// A component method. The component plays the role of `this`.
pub type Method<B> = fn(&mut Component<B>, &Event) -> BehaviorResult;

/// Named methods of a behavior, looked up when binding
pub struct Methods<B: Behavior> {
    entries: Vec<(&'static str, Method<B>)>,
}

impl<B: Behavior> Methods<B> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Add a method. A later entry with the same name replaces the earlier one.
    pub fn with(mut self, name: &'static str, method: Method<B>) -> Self {
        self.entries.retain(|(n, _)| *n != name);
        self.entries.push((name, method));
        self
    }

    /// Look up a method by name
    pub fn get(&self, name: &str) -> Option<Method<B>> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, m)| *m)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(n, _)| *n)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<B: Behavior> Default for Methods<B> {
    fn default() -> Self {
        Self::new()
    }
}

/// Behavior of a component type.
///
/// Hooks run in this order during construction:
/// `is_initializable`, then `is_supported`, then exactly one of `init` or
/// `fallback`. Errors returned from hooks are not caught; they abort
/// construction and reach the caller unchanged.
pub trait Behavior: Sized + 'static {
    /// Method table of this behavior
    fn methods() -> Methods<Self> {
        Methods::new()
    }

    /// Methods to bind to each instance. Bound methods are stored under
    /// the method name plus the configured suffix (`toggle` -> `toggle_`).
    fn binded() -> &'static [&'static str] {
        &[]
    }

    /// Whether the component should be initialized at all.
    ///
    /// Returning `false` leaves an inert instance: no states, no markers.
    fn is_initializable(_this: &Component<Self>) -> BehaviorResult<bool> {
        Ok(true)
    }

    /// Whether the environment supports this component
    fn is_supported(_this: &Component<Self>) -> BehaviorResult<bool> {
        Ok(true)
    }

    /// Setup for supported environments; the `ok` state is added afterwards
    fn init(_this: &mut Component<Self>) -> BehaviorResult {
        Ok(())
    }

    /// Degraded setup; the `unsupported` state is added afterwards
    fn fallback(_this: &mut Component<Self>) -> BehaviorResult {
        Ok(())
    }

    /// Teardown hook. Markers and listeners are left to the behavior.
    fn destroy(_this: &mut Component<Self>) -> BehaviorResult {
        Ok(())
    }
}
