//! Edge case tests for tamia-component
//!
//! Construction failures, inert instances and error propagation.

use std::cell::Cell;

use tamia_component::{
    Behavior, BehaviorResult, Component, ComponentConfig, ComponentError, Controller, Methods,
    Registry, OK_STATE,
};
use tamia_dom::{Document, ElementGeometry, ElementRef, Event, NodeId, NodeType, SharedDocument};

fn page() -> (SharedDocument, NodeId) {
    let mut doc = Document::default();
    let body = doc.body();
    let div = doc.tree_mut().create_element("div");
    doc.tree_mut().append_child(body, div);
    doc.tree_mut().set_attribute(div, "class", "widget is-pink");
    doc.tree_mut().set_attribute(div, "data-component", "widget");
    (doc.into_shared(), div)
}

thread_local! {
    static HOOK_CALLS: Cell<u32> = const { Cell::new(0) };
}

fn hook_calls() -> u32 {
    HOOK_CALLS.with(Cell::get)
}

fn record_hook() {
    HOOK_CALLS.with(|c| c.set(c.get() + 1));
}

/// Declares `onClick` for binding but never defines it
#[derive(Default)]
struct Broken;

impl Broken {
    fn toggle(this: &mut Component<Self>, _event: &Event) -> BehaviorResult {
        this.toggle_state("open", None);
        Ok(())
    }
}

impl Behavior for Broken {
    fn methods() -> Methods<Self> {
        Methods::new().with("toggle", Self::toggle)
    }

    fn binded() -> &'static [&'static str] {
        &["toggle", "onClick"]
    }

    fn is_initializable(_this: &Component<Self>) -> BehaviorResult<bool> {
        record_hook();
        Ok(true)
    }

    fn init(_this: &mut Component<Self>) -> BehaviorResult {
        record_hook();
        Ok(())
    }

    fn fallback(_this: &mut Component<Self>) -> BehaviorResult {
        record_hook();
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("widget exploded")]
struct Exploded;

#[derive(Default)]
struct FailsInInit;

impl Behavior for FailsInInit {
    fn init(this: &mut Component<Self>) -> BehaviorResult {
        this.add_state("half-done");
        Err(Exploded.into())
    }
}

#[derive(Default)]
struct FailsSupportCheck;

impl Behavior for FailsSupportCheck {
    fn is_supported(_this: &Component<Self>) -> BehaviorResult<bool> {
        anyhow::bail!("cannot probe environment")
    }

    fn init(_this: &mut Component<Self>) -> BehaviorResult {
        record_hook();
        Ok(())
    }

    fn fallback(_this: &mut Component<Self>) -> BehaviorResult {
        record_hook();
        Ok(())
    }
}

#[derive(Default)]
struct OnlyWhenVisible;

impl Behavior for OnlyWhenVisible {
    fn is_initializable(this: &Component<Self>) -> BehaviorResult<bool> {
        Ok(this.is_visible())
    }
}

/// Dispatches at its own root during init, re-entering itself
#[derive(Default)]
struct Reentrant;

impl Reentrant {
    fn poke(this: &mut Component<Self>, _event: &Event) -> BehaviorResult {
        this.add_state("poked");
        Ok(())
    }
}

impl Behavior for Reentrant {
    fn methods() -> Methods<Self> {
        Methods::new().with("poke", Self::poke)
    }

    fn binded() -> &'static [&'static str] {
        &["poke"]
    }

    fn init(this: &mut Component<Self>) -> BehaviorResult {
        let poke = this.handler("poke_").cloned();
        if let Some(poke) = poke {
            this.elem().on("poke", poke.listener());
        }
        this.elem().dispatch(&Event::new("poke"))
    }
}

#[derive(Default)]
struct Clicker;

impl Clicker {
    fn click(this: &mut Component<Self>, _event: &Event) -> BehaviorResult {
        this.toggle_state("clicked", None);
        Ok(())
    }
}

impl Behavior for Clicker {
    fn methods() -> Methods<Self> {
        Methods::new().with("click", Self::click)
    }

    fn binded() -> &'static [&'static str] {
        &["click"]
    }
}

#[derive(Default)]
struct Destroyable {
    destroyed: bool,
}

impl Behavior for Destroyable {
    fn destroy(this: &mut Component<Self>) -> BehaviorResult {
        this.behavior_mut().destroyed = true;
        Ok(())
    }
}

#[derive(Default)]
struct Plain;

impl Behavior for Plain {}

#[test]
fn test_invalid_roots_rejected() {
    let (doc, _) = page();
    let text = doc.borrow_mut().tree_mut().create_text("hello");
    let comment = doc.borrow_mut().tree_mut().create_comment("note");
    let fragment = doc.borrow_mut().tree_mut().create_fragment();

    let cases = [
        (text, Some(NodeType::Text)),
        (comment, Some(NodeType::Comment)),
        (fragment, Some(NodeType::DocumentFragment)),
        (NodeId::ROOT, Some(NodeType::Document)),
        (NodeId::NONE, None),
    ];

    for (node, expected) in cases {
        let result = Controller::new(ElementRef::new(&doc, node), Plain);
        match result {
            Err(ComponentError::InvalidRoot { node: got, found }) => {
                assert_eq!(got, node);
                assert_eq!(found, expected);
            }
            _ => panic!("expected InvalidRoot for {node:?}"),
        }
    }
}

#[test]
fn test_missing_bound_method_fails_before_hooks() {
    let (doc, div) = page();
    let root = ElementRef::new(&doc, div);
    let before = hook_calls();

    let result = Controller::new(root.clone(), Broken);

    match result {
        Err(ComponentError::Binding { method }) => assert_eq!(method, "onClick"),
        _ => panic!("expected Binding error"),
    }
    assert_eq!(hook_calls(), before);
    assert_eq!(root.class_name(), "widget is-pink");
}

#[test]
fn test_not_initializable_is_inert() {
    let (doc, div) = page();
    let root = ElementRef::new(&doc, div);

    let ctrl = Controller::new(root.clone(), OnlyWhenVisible).unwrap();
    assert!(!ctrl.is_initializable());
    assert!(!ctrl.is_supported());
    assert!(!ctrl.has_state("pink"));
    assert!(!ctrl.has_state(OK_STATE));
    assert!(ctrl.states().is_empty());

    ctrl.add_state("open");
    ctrl.toggle_state("pink", None);
    assert!(!ctrl.has_state("open"));
    assert_eq!(root.class_name(), "widget is-pink");
}

#[test]
fn test_visible_root_initializes() {
    let (doc, div) = page();
    doc.borrow_mut()
        .tree_mut()
        .set_geometry(div, ElementGeometry::from_xywh(0.0, 0.0, 0.0, 12.0));

    let ctrl = Controller::new(ElementRef::new(&doc, div), OnlyWhenVisible).unwrap();
    assert!(ctrl.is_visible());
    assert!(ctrl.has_state(OK_STATE));
}

#[test]
fn test_init_error_propagates_without_rollback() {
    let (doc, div) = page();
    let root = ElementRef::new(&doc, div);

    let err = match Controller::new(root.clone(), FailsInInit) {
        Err(err) => err,
        Ok(_) => panic!("init error swallowed"),
    };

    assert_eq!(err.to_string(), "widget exploded");
    match err {
        ComponentError::Behavior(inner) => assert!(inner.downcast_ref::<Exploded>().is_some()),
        other => panic!("unexpected error {other:?}"),
    }
    // Marker written before the failure stays, `ok` never arrives
    assert!(root.has_class("is-half-done"));
    assert!(!root.has_class("is-ok"));
}

#[test]
fn test_support_check_error_skips_both_paths() {
    let (doc, div) = page();
    let root = ElementRef::new(&doc, div);

    let before = hook_calls();

    let err = Controller::new(root.clone(), FailsSupportCheck).err();
    assert_eq!(err.map(|e| e.to_string()).as_deref(), Some("cannot probe environment"));
    assert_eq!(hook_calls(), before);
    assert!(!root.has_class("is-ok"));
    assert!(!root.has_class("is-unsupported"));
}

#[test]
fn test_reentrant_call_reports_busy() {
    let (doc, div) = page();

    let err = match Controller::new(ElementRef::new(&doc, div), Reentrant) {
        Err(err) => err,
        Ok(_) => panic!("re-entrant call went unnoticed"),
    };
    let ComponentError::Behavior(inner) = err else {
        panic!("expected behavior error");
    };
    assert!(matches!(
        inner.downcast_ref::<ComponentError>(),
        Some(ComponentError::Busy { method }) if method == "poke_"
    ));
}

#[test]
fn test_bound_method_detaches_with_component() {
    let (doc, div) = page();
    let ctrl = Controller::new(ElementRef::new(&doc, div), Clicker).unwrap();
    let bound = ctrl.handler("click_").unwrap();
    bound.call(&Event::new("click")).unwrap();
    assert!(ctrl.has_state("clicked"));

    drop(ctrl);
    let err = bound.call(&Event::new("click")).unwrap_err();
    assert!(matches!(err, ComponentError::Detached { ref method } if method == "click_"));
}

#[test]
fn test_destroy_keeps_markers() {
    let (doc, div) = page();
    let root = ElementRef::new(&doc, div);
    let ctrl = Controller::new(root.clone(), Destroyable::default()).unwrap();
    ctrl.add_state("open");

    ctrl.destroy().unwrap();

    assert!(ctrl.borrow().behavior().destroyed);
    assert!(root.has_class("is-open"));
    assert!(root.has_class("is-ok"));
}

#[test]
fn test_bare_prefix_marker_ignored() {
    let (doc, div) = page();
    let root = ElementRef::new(&doc, div);
    root.set_attribute("class", "widget is- is-pink");

    let ctrl = Controller::new(root.clone(), Plain).unwrap();
    assert!(!ctrl.has_state(""));
    assert_eq!(root.class_name(), "widget is-ok is-pink");
}

#[test]
fn test_state_names_must_be_single_tokens() {
    let (doc, div) = page();
    let root = ElementRef::new(&doc, div);
    let ctrl = Controller::new(root.clone(), Plain).unwrap();
    let before = root.class_name();

    ctrl.add_state("");
    ctrl.add_state("a b");
    ctrl.toggle_state("tab\tname", None);

    assert!(!ctrl.has_state(""));
    assert!(!ctrl.has_state("a b"));
    assert_eq!(root.class_name(), before);
    assert!(!root.has_class("b"));

    // Markers still rebuild the same state set
    let reseeded = Controller::new(root.clone(), Plain).unwrap();
    assert_eq!(reseeded.states(), ctrl.states());
}

#[test]
fn test_controller_in_use_reports_error() {
    let (doc, div) = page();
    let ctrl = Controller::new(ElementRef::new(&doc, div), Plain).unwrap();

    let guard = ctrl.borrow_mut();
    assert!(matches!(ctrl.try_borrow(), Err(ComponentError::InUse { node }) if node == div));
    assert!(matches!(ctrl.try_borrow_mut(), Err(ComponentError::InUse { .. })));
    drop(guard);

    assert!(ctrl.try_borrow_mut().is_ok());
    assert!(ctrl.try_borrow().unwrap().has_state("pink"));
}

#[test]
fn test_custom_prefixes() {
    let (doc, div) = page();
    let root = ElementRef::new(&doc, div);
    root.set_attribute("class", "widget state--pink is-legacy");

    let config = ComponentConfig {
        state_prefix: "state--".to_string(),
        ..ComponentConfig::default()
    };
    let ctrl = Controller::with_config(root.clone(), Plain, config.clone()).unwrap();

    assert!(ctrl.has_state("pink"));
    assert!(!ctrl.has_state("legacy"));
    assert_eq!(root.class_name(), "widget is-legacy state--ok state--pink");

    let registry = Registry::with_config(config);
    assert_eq!(registry.config().state_prefix, "state--");
}

#[test]
fn test_registry_error_stops_walk() {
    let (doc, div) = page();
    let mut registry = Registry::new();
    registry.register("widget", FailsInInit::default);

    let result = registry.init_components(&ElementRef::body(&doc));
    assert!(result.is_err());
    assert!(!ElementRef::new(&doc, div).has_attribute("data-component-initialized"));
}

#[test]
fn test_registry_leaves_inert_roots_unmarked() {
    let (doc, div) = page();
    let mut registry = Registry::new();
    registry.register("widget", || OnlyWhenVisible);
    let body = ElementRef::body(&doc);

    let first = registry.init_components(&body).unwrap();
    assert_eq!(first.len(), 1);
    assert!(!first[0].controller.is_initializable());

    doc.borrow_mut()
        .tree_mut()
        .set_geometry(div, ElementGeometry::from_xywh(0.0, 0.0, 100.0, 20.0));
    let second = registry.init_components(&body).unwrap();
    assert_eq!(second.len(), 1);
    assert!(second[0].controller.has_state(OK_STATE));

    assert!(registry.init_components(&body).unwrap().is_empty());
}
