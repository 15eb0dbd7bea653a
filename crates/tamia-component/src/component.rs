//! Component lifecycle and state markers
//!
//! A `Component` is bound to one root element. Its states are mirrored onto
//! the root's class list as `<state_prefix><name>` tokens; every other class
//! is left alone, in order.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use tamia_dom::{ElementRef, Event, NodeId, TokenList};

use crate::{Behavior, BehaviorResult, BoundMethod, ComponentConfig, ComponentError, Method, Methods};

/// State added after a successful `init`
pub const OK_STATE: &str = "ok";
/// State added after `fallback`
pub const UNSUPPORTED_STATE: &str = "unsupported";

/// One component instance, as seen from behavior hooks and methods
pub struct Component<B: Behavior> {
    elem: ElementRef,
    config: ComponentConfig,
    initializable: bool,
    supported: bool,
    /// `None` until the component is known to be initializable
    states: Option<BTreeMap<String, bool>>,
    methods: Methods<B>,
    handlers: HashMap<String, BoundMethod<B>>,
    behavior: B,
}

impl<B: Behavior> Component<B> {
    /// Root element handle
    pub fn elem(&self) -> &ElementRef {
        &self.elem
    }

    /// Root node ID
    pub fn root(&self) -> NodeId {
        self.elem.id()
    }

    pub fn config(&self) -> &ComponentConfig {
        &self.config
    }

    /// Result of `is_initializable` at construction
    pub fn is_initializable(&self) -> bool {
        self.initializable
    }

    /// Result of `is_supported` at construction (false if never checked)
    pub fn is_supported(&self) -> bool {
        self.supported
    }

    pub fn behavior(&self) -> &B {
        &self.behavior
    }

    pub fn behavior_mut(&mut self) -> &mut B {
        &mut self.behavior
    }

    /// Bound method by its bound name, e.g. `toggle_`
    pub fn handler(&self, name: &str) -> Option<&BoundMethod<B>> {
        self.handlers.get(name)
    }

    /// Call an unbound method from the method table on this instance
    pub fn call(&mut self, method: &str, event: &Event) -> Result<(), ComponentError> {
        let Some(f) = self.methods.get(method) else {
            return Err(ComponentError::Binding { method: method.to_string() });
        };
        f(self, event)?;
        Ok(())
    }

    /// Sub-elements called `name` (class `<element_prefix><name>`)
    pub fn find(&self, name: &str) -> Vec<ElementRef> {
        self.elem.find_by_class(&self.config.element_class(name))
    }

    /// Whether the root currently occupies a layout box
    pub fn is_visible(&self) -> bool {
        self.elem.geometry().has_box()
    }

    pub fn has_state(&self, name: &str) -> bool {
        self.states
            .as_ref()
            .and_then(|states| states.get(name))
            .copied()
            .unwrap_or(false)
    }

    /// Names of all active states
    pub fn states(&self) -> impl Iterator<Item = &str> {
        self.states
            .iter()
            .flatten()
            .filter(|(_, on)| **on)
            .map(|(name, _)| name.as_str())
    }

    pub fn add_state(&mut self, name: &str) {
        self.toggle_state(name, Some(true));
    }

    pub fn remove_state(&mut self, name: &str) {
        self.toggle_state(name, Some(false));
    }

    /// Set a state (or flip it when `value` is `None`) and rewrite the
    /// root's state markers. No-op on a non-initializable component, and
    /// for names that cannot form a single class token.
    pub fn toggle_state(&mut self, name: &str, value: Option<bool>) {
        let Some(states) = self.states.as_mut() else {
            return;
        };
        if !TokenList::is_valid_token(name) {
            tracing::debug!("ignoring invalid state name {:?} on {:?}", name, self.elem.id());
            return;
        }
        let value = value.unwrap_or_else(|| !states.get(name).copied().unwrap_or(false));
        states.insert(name.to_string(), value);
        self.update_states();
    }

    fn update_states(&self) {
        let Some(states) = &self.states else {
            return;
        };
        let active = states
            .iter()
            .filter(|(_, on)| **on)
            .map(|(name, _)| name.as_str());
        let prefix = self.config.state_prefix.as_str();

        self.elem.update_class_list(|list| list.replace_prefixed(prefix, active));
        tracing::trace!("component {:?} classes now {:?}", self.root(), self.elem.class_name());
    }

    fn fill_states(&mut self) {
        let classes = self.elem.class_list();
        let states = classes
            .prefixed(&self.config.state_prefix)
            .map(|name| (name.to_string(), true))
            .collect();
        self.states = Some(states);
    }

    /// Steps 3-5 of construction: initializability, state seeding and
    /// the support check
    fn start(&mut self) -> BehaviorResult {
        self.initializable = B::is_initializable(self)?;
        if !self.initializable {
            tracing::debug!("component {:?} not initializable, left inert", self.root());
            return Ok(());
        }

        self.fill_states();

        self.supported = B::is_supported(self)?;
        if self.supported {
            B::init(self)?;
            self.add_state(OK_STATE);
        } else {
            tracing::debug!("component {:?} unsupported, running fallback", self.root());
            B::fallback(self)?;
            self.add_state(UNSUPPORTED_STATE);
        }
        Ok(())
    }
}

/// Owning handle to a component instance.
///
/// Cloning shares the same instance.
pub struct Controller<B: Behavior> {
    inner: Rc<RefCell<Component<B>>>,
    /// Root node, readable while the instance is borrowed
    node: NodeId,
}

impl<B: Behavior> Controller<B> {
    /// Bind `behavior` to `elem` with the default naming conventions
    pub fn new(elem: ElementRef, behavior: B) -> Result<Self, ComponentError> {
        Self::with_config(elem, behavior, ComponentConfig::default())
    }

    /// Bind `behavior` to `elem`.
    ///
    /// Fails before any side effect if `elem` is not an element or a
    /// method listed in `B::binded()` is missing. Hook errors propagate
    /// as `ComponentError::Behavior`; markers already written stay.
    pub fn with_config(
        elem: ElementRef,
        behavior: B,
        config: ComponentConfig,
    ) -> Result<Self, ComponentError> {
        if !elem.is_element() {
            return Err(ComponentError::InvalidRoot {
                node: elem.id(),
                found: elem.node_type(),
            });
        }

        // Validate the whole list before creating anything
        let methods = B::methods();
        let mut binded: Vec<(String, Method<B>)> = Vec::with_capacity(B::binded().len());
        for name in B::binded() {
            let method = methods.get(name).ok_or_else(|| ComponentError::Binding {
                method: name.to_string(),
            })?;
            binded.push((config.bound_name(name), method));
        }
        if !binded.is_empty() {
            tracing::debug!("binding {} method(s) on {:?}", binded.len(), elem.id());
        }

        let node = elem.id();
        let inner = Rc::new_cyclic(|weak| {
            let handlers = binded
                .into_iter()
                .map(|(name, method)| (name.clone(), BoundMethod::new(name, method, weak.clone())))
                .collect();
            RefCell::new(Component {
                elem,
                config,
                initializable: false,
                supported: false,
                states: None,
                methods,
                handlers,
                behavior,
            })
        });

        inner.borrow_mut().start()?;
        Ok(Self { inner, node })
    }

    /// Borrow the instance.
    ///
    /// # Panics
    ///
    /// Panics if the instance is mutably borrowed, e.g. from inside one of
    /// its own hooks or bound methods. The other accessors on this handle
    /// borrow the same way; use [`Controller::try_borrow`] where that can
    /// happen.
    pub fn borrow(&self) -> Ref<'_, Component<B>> {
        self.inner.borrow()
    }

    /// Borrow the instance mutably.
    ///
    /// # Panics
    ///
    /// Panics if the instance is already borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, Component<B>> {
        self.inner.borrow_mut()
    }

    /// Borrow the instance, failing with `InUse` instead of panicking
    pub fn try_borrow(&self) -> Result<Ref<'_, Component<B>>, ComponentError> {
        self.inner.try_borrow().map_err(|_| self.in_use())
    }

    /// Borrow the instance mutably, failing with `InUse` instead of panicking
    pub fn try_borrow_mut(&self) -> Result<RefMut<'_, Component<B>>, ComponentError> {
        self.inner.try_borrow_mut().map_err(|_| self.in_use())
    }

    fn in_use(&self) -> ComponentError {
        ComponentError::InUse { node: self.node }
    }

    pub fn root(&self) -> ElementRef {
        self.inner.borrow().elem.clone()
    }

    pub fn is_initializable(&self) -> bool {
        self.inner.borrow().initializable
    }

    pub fn is_supported(&self) -> bool {
        self.inner.borrow().supported
    }

    pub fn is_visible(&self) -> bool {
        self.inner.borrow().is_visible()
    }

    pub fn has_state(&self, name: &str) -> bool {
        self.inner.borrow().has_state(name)
    }

    /// Names of all active states
    pub fn states(&self) -> Vec<String> {
        self.inner.borrow().states().map(String::from).collect()
    }

    pub fn add_state(&self, name: &str) {
        self.inner.borrow_mut().add_state(name);
    }

    pub fn remove_state(&self, name: &str) {
        self.inner.borrow_mut().remove_state(name);
    }

    pub fn toggle_state(&self, name: &str, value: Option<bool>) {
        self.inner.borrow_mut().toggle_state(name, value);
    }

    /// Bound method by its bound name
    pub fn handler(&self, name: &str) -> Option<BoundMethod<B>> {
        self.inner.borrow().handler(name).cloned()
    }

    /// Run the behavior's destroy hook. Markers stay on the root.
    pub fn destroy(&self) -> Result<(), ComponentError> {
        let mut component = self.inner.borrow_mut();
        tracing::debug!("destroying component {:?}", component.root());
        B::destroy(&mut component)?;
        Ok(())
    }
}

impl<B: Behavior> Clone for Controller<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
            node: self.node,
        }
    }
}
