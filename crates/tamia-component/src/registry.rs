//! Component registry
//!
//! Maps component-type names to behaviors and mounts one controller per
//! matching root element under a container.

use std::any::Any;
use std::collections::HashMap;

use tamia_dom::ElementRef;

use crate::{Behavior, ComponentConfig, ComponentError, Controller};

/// Type-erased view of a `Controller<B>`
pub trait AnyController {
    fn root(&self) -> ElementRef;
    fn is_initializable(&self) -> bool;
    fn is_supported(&self) -> bool;
    fn is_visible(&self) -> bool;
    fn has_state(&self, name: &str) -> bool;
    fn add_state(&self, name: &str);
    fn remove_state(&self, name: &str);
    fn toggle_state(&self, name: &str, value: Option<bool>);
    fn destroy(&self) -> Result<(), ComponentError>;
    fn as_any(&self) -> &dyn Any;
}

impl<B: Behavior> AnyController for Controller<B> {
    fn root(&self) -> ElementRef {
        Controller::root(self)
    }

    fn is_initializable(&self) -> bool {
        Controller::is_initializable(self)
    }

    fn is_supported(&self) -> bool {
        Controller::is_supported(self)
    }

    fn is_visible(&self) -> bool {
        Controller::is_visible(self)
    }

    fn has_state(&self, name: &str) -> bool {
        Controller::has_state(self, name)
    }

    fn add_state(&self, name: &str) {
        Controller::add_state(self, name)
    }

    fn remove_state(&self, name: &str) {
        Controller::remove_state(self, name)
    }

    fn toggle_state(&self, name: &str, value: Option<bool>) {
        Controller::toggle_state(self, name, value)
    }

    fn destroy(&self) -> Result<(), ComponentError> {
        Controller::destroy(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A controller created by the registry
pub struct Mounted {
    /// Component-type name it was registered under
    pub name: String,
    pub controller: Box<dyn AnyController>,
}

impl Mounted {
    /// Recover the typed controller
    pub fn downcast<B: Behavior>(&self) -> Option<&Controller<B>> {
        self.controller.as_any().downcast_ref::<Controller<B>>()
    }
}

type Factory = Box<dyn Fn(ElementRef, &ComponentConfig) -> Result<Box<dyn AnyController>, ComponentError>>;

/// Component-type name to behavior mapping
pub struct Registry {
    config: ComponentConfig,
    factories: HashMap<String, Factory>,
}

impl Registry {
    /// Create a registry with the default naming conventions
    pub fn new() -> Self {
        Self::with_config(ComponentConfig::default())
    }

    pub fn with_config(config: ComponentConfig) -> Self {
        Self {
            config,
            factories: HashMap::new(),
        }
    }

    pub fn config(&self) -> &ComponentConfig {
        &self.config
    }

    /// Register a component type. `make` builds the per-instance behavior
    /// value; registering a name again replaces the previous factory.
    pub fn register<B, F>(&mut self, name: &str, make: F) -> &mut Self
    where
        B: Behavior,
        F: Fn() -> B + 'static,
    {
        let factory: Factory = Box::new(
            move |elem: ElementRef, config: &ComponentConfig| -> Result<Box<dyn AnyController>, ComponentError> {
                let controller = Controller::with_config(elem, make(), config.clone())?;
                Ok(Box::new(controller))
            },
        );
        self.factories.insert(name.to_string(), factory);
        self
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Mount a controller on every descendant of `container` whose
    /// component attribute names a registered type, in document order.
    ///
    /// Roots already initialized by an earlier call are skipped, as are
    /// unregistered names. Inert (non-initializable) instances are returned
    /// but not marked, so a later call retries them. The first construction
    /// error stops the walk.
    pub fn init_components(&self, container: &ElementRef) -> Result<Vec<Mounted>, ComponentError> {
        let mut mounted = Vec::new();

        for elem in container.find_by_attribute(&self.config.component_attribute) {
            if elem.has_attribute(&self.config.initialized_attribute) {
                continue;
            }
            let Some(name) = elem.attribute(&self.config.component_attribute) else {
                continue;
            };
            let Some(factory) = self.factories.get(&name) else {
                tracing::debug!("No component registered as {:?}, skipping {:?}", name, elem.id());
                continue;
            };

            let controller = factory(elem.clone(), &self.config)?;
            if controller.is_initializable() {
                elem.set_attribute(&self.config.initialized_attribute, "yes");
            }
            tracing::debug!("Mounted {} on {:?}", name, elem.id());
            mounted.push(Mounted { name, controller });
        }

        Ok(mounted)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
