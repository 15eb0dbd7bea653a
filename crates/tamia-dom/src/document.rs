//! Document - High-level document API

use std::cell::RefCell;
use std::rc::Rc;

use crate::events::ListenerTable;
use crate::{DomTree, Listener, NodeId};

/// Document shared between the page and the components bound to it
pub type SharedDocument = Rc<RefCell<Document>>;

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
    listeners: ListenerTable,
}

impl Document {
    /// Create a new document with html/head/body
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        tree.append_child(tree.root(), html);
        tree.append_child(html, head);
        tree.append_child(html, body);

        Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
            listeners: ListenerTable::default(),
        }
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
            listeners: ListenerTable::default(),
        }
    }

    /// Locate html/head/body after the tree was built externally
    pub fn finalize(&mut self) {
        let root = self.tree.root();
        self.html_element = self.child_named(root, "html");
        if self.html_element.is_valid() {
            self.head_element = self.child_named(self.html_element, "head");
            self.body_element = self.child_named(self.html_element, "body");
        }
    }

    fn child_named(&self, parent: NodeId, tag: &str) -> NodeId {
        self.tree
            .children(parent)
            .find(|(_, node)| node.as_element().is_some_and(|e| e.name == tag))
            .map_or(NodeId::NONE, |(id, _)| id)
    }

    /// Wrap for sharing with components
    pub fn into_shared(self) -> SharedDocument {
        Rc::new(RefCell::new(self))
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get document title
    pub fn title(&self) -> String {
        if !self.head_element.is_valid() {
            return String::new();
        }

        let title = self.child_named(self.head_element, "title");
        self.tree
            .children(title)
            .find_map(|(_, child)| child.as_text())
            .map(|t| t.trim().to_string())
            .unwrap_or_default()
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .find(|(_, node)| node.as_element().is_some_and(|e| e.id.as_deref() == Some(id)))
            .map(|(node_id, _)| node_id)
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Register a listener on a node
    pub fn add_event_listener(&mut self, node: NodeId, event_type: &str, listener: Listener) {
        self.listeners.add(node, event_type, listener);
    }

    /// Snapshot the listeners registered on a node for an event type
    pub fn listeners(&self, node: NodeId, event_type: &str) -> Vec<Listener> {
        self.listeners.snapshot(node, event_type)
    }

    /// Number of listeners registered on a node, across all event types
    pub fn listener_count(&self, node: NodeId) -> usize {
        self.listeners.count(node)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
