//! Element reference
//!
//! A node ID paired with the shared document it lives in. This is the
//! query-capable handle components hold on to: class list, attributes,
//! geometry, descendant lookup and events.

use std::fmt;
use std::rc::Rc;

use crate::{
    ElementGeometry, Event, Listener, ListenerResult, Node, NodeId, NodeType, SharedDocument,
    TokenList,
};

/// Handle to one node of a shared document
#[derive(Clone)]
pub struct ElementRef {
    doc: SharedDocument,
    id: NodeId,
}

impl ElementRef {
    /// Reference a node. The node need not be an element; check with
    /// [`ElementRef::is_element`].
    pub fn new(doc: &SharedDocument, id: NodeId) -> Self {
        Self { doc: Rc::clone(doc), id }
    }

    /// Reference the document's <body>
    pub fn body(doc: &SharedDocument) -> Self {
        let id = doc.borrow().body();
        Self::new(doc, id)
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn document(&self) -> &SharedDocument {
        &self.doc
    }

    fn with_node<R>(&self, f: impl FnOnce(&Node) -> R) -> Option<R> {
        let doc = self.doc.borrow();
        let result = doc.tree.get(self.id).map(f);
        result
    }

    /// Node type, or `None` if the ID is not in the document
    pub fn node_type(&self) -> Option<NodeType> {
        self.with_node(Node::node_type)
    }

    pub fn is_element(&self) -> bool {
        self.node_type() == Some(NodeType::Element)
    }

    /// Lowercased tag name
    pub fn tag_name(&self) -> Option<String> {
        self.with_node(|n| n.as_element().map(|e| e.name.clone())).flatten()
    }

    /// Copy of the class list (empty for non-elements)
    pub fn class_list(&self) -> TokenList {
        self.with_node(|n| n.as_element().map(|e| e.classes.clone()))
            .flatten()
            .unwrap_or_default()
    }

    /// Serialized `class` attribute
    pub fn class_name(&self) -> String {
        self.class_list().value()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.with_node(|n| n.as_element().is_some_and(|e| e.classes.contains(class)))
            .unwrap_or(false)
    }

    /// Read-modify-write of the class list under a single document borrow
    pub fn update_class_list<R>(&self, f: impl FnOnce(&mut TokenList) -> R) -> Option<R> {
        let mut doc = self.doc.borrow_mut();
        let elem = doc.tree.get_mut(self.id)?.as_element_mut()?;
        Some(f(&mut elem.classes))
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.doc.borrow().tree.get_attribute(self.id, name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.with_node(|n| n.as_element().is_some_and(|e| e.has_attr(name)))
            .unwrap_or(false)
    }

    pub fn set_attribute(&self, name: &str, value: &str) {
        self.doc.borrow_mut().tree.set_attribute(self.id, name, value);
    }

    /// Current layout box (zero for non-elements)
    pub fn geometry(&self) -> ElementGeometry {
        self.with_node(|n| n.as_element().map(|e| e.geometry))
            .flatten()
            .unwrap_or_default()
    }

    /// Parent node, if attached
    pub fn parent(&self) -> Option<ElementRef> {
        let parent = self.with_node(|n| n.parent)?;
        parent.is_valid().then(|| Self::new(&self.doc, parent))
    }

    /// All descendant elements in document order
    pub fn descendants(&self) -> Vec<ElementRef> {
        self.descendants_where(|_| true)
    }

    /// Descendant elements carrying `class`, in document order
    pub fn find_by_class(&self, class: &str) -> Vec<ElementRef> {
        self.descendants_where(|n| n.as_element().is_some_and(|e| e.classes.contains(class)))
    }

    /// Descendant elements carrying attribute `name`, in document order
    pub fn find_by_attribute(&self, name: &str) -> Vec<ElementRef> {
        self.descendants_where(|n| n.as_element().is_some_and(|e| e.has_attr(name)))
    }

    fn descendants_where(&self, pred: impl Fn(&Node) -> bool) -> Vec<ElementRef> {
        let doc = self.doc.borrow();
        let found = doc.tree
            .descendants(self.id)
            .filter(|(_, n)| n.is_element() && pred(n))
            .map(|(id, _)| Self::new(&self.doc, id))
            .collect();
        found
    }

    /// Register an event listener on this node
    pub fn on(&self, event_type: &str, listener: Listener) {
        self.doc
            .borrow_mut()
            .add_event_listener(self.id, event_type, listener);
    }

    /// Dispatch an event at this node, bubbling to the document.
    ///
    /// Listeners run with no document borrow held, so they may freely
    /// read and mutate the document.
    pub fn dispatch(&self, event: &Event) -> ListenerResult {
        let path: Vec<NodeId> = {
            let doc = self.doc.borrow();
            let ancestors: Vec<NodeId> = doc.tree.ancestors(self.id).collect();
            std::iter::once(self.id).chain(ancestors).collect()
        };

        event.begin(self.id);
        tracing::trace!("dispatch {} at {:?}", event.event_type(), self.id);

        for node in path {
            let listeners = self.doc.borrow().listeners(node, event.event_type());
            event.set_current_target(node);
            for listener in listeners {
                listener(event)?;
            }
            if !event.bubbles() || event.propagation_stopped() {
                break;
            }
        }
        Ok(())
    }
}

impl PartialEq for ElementRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && Rc::ptr_eq(&self.doc, &other.doc)
    }
}

impl Eq for ElementRef {}

impl fmt::Debug for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = self.doc.try_borrow().ok().and_then(|doc| {
            doc.tree.get(self.id).and_then(|n| n.as_element().map(|e| e.name.clone()))
        });
        f.debug_struct("ElementRef")
            .field("id", &self.id)
            .field("tag", &tag)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Document;
    use std::cell::Cell;

    fn sample() -> (SharedDocument, NodeId, NodeId) {
        let mut doc = Document::default();
        let body = doc.body();
        let tree = doc.tree_mut();
        let outer = tree.create_element("div");
        let inner = tree.create_element("button");
        tree.append_child(body, outer);
        tree.append_child(outer, inner);
        tree.set_attribute(outer, "class", "pony is-pink");
        tree.set_attribute(inner, "class", "pony__button js-toggle");
        (doc.into_shared(), outer, inner)
    }

    #[test]
    fn test_class_list_update() {
        let (doc, outer, _) = sample();
        let elem = ElementRef::new(&doc, outer);

        elem.update_class_list(|list| list.add(&["is-active"]));
        assert_eq!(elem.class_name(), "pony is-pink is-active");
        assert!(elem.has_class("is-active"));
    }

    #[test]
    fn test_non_element_update_is_none() {
        let (doc, _, _) = sample();
        let text = doc.borrow_mut().tree_mut().create_text("hi");
        let elem = ElementRef::new(&doc, text);
        assert!(!elem.is_element());
        assert!(elem.update_class_list(|_| ()).is_none());
    }

    #[test]
    fn test_find_by_class() {
        let (doc, outer, inner) = sample();
        let found = ElementRef::new(&doc, outer).find_by_class("js-toggle");
        assert_eq!(found, vec![ElementRef::new(&doc, inner)]);
    }

    #[test]
    fn test_dispatch_bubbles_and_stops() {
        let (doc, outer, inner) = sample();
        let hits = Rc::new(Cell::new(0));

        let counter = Rc::clone(&hits);
        ElementRef::new(&doc, outer).on("click", Rc::new(move |event: &Event| {
            counter.set(counter.get() + 1);
            event.stop_propagation();
            Ok(())
        }));
        let counter = Rc::clone(&hits);
        ElementRef::body(&doc).on("click", Rc::new(move |_: &Event| {
            counter.set(counter.get() + 100);
            Ok(())
        }));

        ElementRef::new(&doc, inner).dispatch(&Event::new("click")).unwrap();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_listener_may_mutate_document() {
        let (doc, outer, _) = sample();
        let elem = ElementRef::new(&doc, outer);
        let target = elem.clone();
        elem.on("click", Rc::new(move |_: &Event| {
            target.update_class_list(|list| list.toggle("is-open", None));
            Ok(())
        }));

        elem.dispatch(&Event::new("click")).unwrap();
        assert!(elem.has_class("is-open"));
    }

    #[test]
    fn test_listener_error_aborts() {
        let (doc, outer, _) = sample();
        let elem = ElementRef::new(&doc, outer);
        elem.on("click", Rc::new(|_: &Event| -> ListenerResult { anyhow::bail!("boom") }));

        let err = elem.dispatch(&Event::new("click")).unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}
