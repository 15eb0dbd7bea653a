//! Bound methods
//!
//! A method fixed to one component instance, usable as an event listener.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tamia_dom::{Event, Listener};

use crate::{Behavior, Component, ComponentError, Method};

/// Method bound to one component instance
pub struct BoundMethod<B: Behavior> {
    name: String,
    method: Method<B>,
    target: Weak<RefCell<Component<B>>>,
}

impl<B: Behavior> BoundMethod<B> {
    pub(crate) fn new(name: String, method: Method<B>, target: Weak<RefCell<Component<B>>>) -> Self {
        Self { name, method, target }
    }

    /// Bound name, e.g. `toggle_`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Call the method on its instance
    pub fn call(&self, event: &Event) -> Result<(), ComponentError> {
        let target = self.target.upgrade().ok_or_else(|| ComponentError::Detached {
            method: self.name.clone(),
        })?;
        let mut component = target.try_borrow_mut().map_err(|_| ComponentError::Busy {
            method: self.name.clone(),
        })?;

        tracing::trace!("calling bound method {}", self.name);
        (self.method)(&mut *component, event)?;
        Ok(())
    }

    /// Adapt into a DOM event listener
    pub fn listener(&self) -> Listener {
        let bound = self.clone();
        Rc::new(move |event: &Event| bound.call(event).map_err(ComponentError::into_anyhow))
    }
}

impl<B: Behavior> Clone for BoundMethod<B> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            method: self.method,
            target: Weak::clone(&self.target),
        }
    }
}

impl<B: Behavior> fmt::Debug for BoundMethod<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundMethod")
            .field("name", &self.name)
            .field("attached", &(self.target.strong_count() > 0))
            .finish()
    }
}
