//! DOM Events
//!
//! Listener registration and bubbling dispatch.

use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::NodeId;

/// Result of a listener invocation. The first error aborts dispatch.
pub type ListenerResult = anyhow::Result<()>;

/// Event listener
pub type Listener = Rc<dyn Fn(&Event) -> ListenerResult>;

/// DOM event
#[derive(Debug, Clone)]
pub struct Event {
    event_type: String,
    target: Cell<NodeId>,
    current_target: Cell<NodeId>,
    bubbles: bool,
    default_prevented: Cell<bool>,
    propagation_stopped: Cell<bool>,
}

impl Event {
    /// Create a bubbling event
    pub fn new(event_type: &str) -> Self {
        Self {
            event_type: event_type.to_string(),
            target: Cell::new(NodeId::NONE),
            current_target: Cell::new(NodeId::NONE),
            bubbles: true,
            default_prevented: Cell::new(false),
            propagation_stopped: Cell::new(false),
        }
    }

    /// Create an event that only reaches its target
    pub fn non_bubbling(event_type: &str) -> Self {
        Self {
            bubbles: false,
            ..Self::new(event_type)
        }
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Node the event was dispatched to
    pub fn target(&self) -> NodeId {
        self.target.get()
    }

    /// Node whose listeners are currently running
    pub fn current_target(&self) -> NodeId {
        self.current_target.get()
    }

    pub fn bubbles(&self) -> bool {
        self.bubbles
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    /// Stop bubbling after the current node's listeners finish
    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }

    pub(crate) fn begin(&self, target: NodeId) {
        self.target.set(target);
        self.propagation_stopped.set(false);
    }

    pub(crate) fn set_current_target(&self, node: NodeId) {
        self.current_target.set(node);
    }
}

/// Listener table keyed by node and event type
#[derive(Default)]
pub(crate) struct ListenerTable {
    map: HashMap<(NodeId, String), Vec<Listener>>,
}

impl ListenerTable {
    pub(crate) fn add(&mut self, node: NodeId, event_type: &str, listener: Listener) {
        self.map
            .entry((node, event_type.to_string()))
            .or_default()
            .push(listener);
    }

    /// Snapshot of the listeners for one node, safe to call after the
    /// document borrow is released
    pub(crate) fn snapshot(&self, node: NodeId, event_type: &str) -> Vec<Listener> {
        self.map
            .get(&(node, event_type.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn count(&self, node: NodeId) -> usize {
        self.map
            .iter()
            .filter(|((n, _), _)| *n == node)
            .map(|(_, v)| v.len())
            .sum()
    }
}

impl fmt::Debug for ListenerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total: usize = self.map.values().map(Vec::len).sum();
        f.debug_struct("ListenerTable").field("listeners", &total).finish()
    }
}
