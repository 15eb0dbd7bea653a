//! Example: mount a toggling component on a parsed page

use tamia_component::{Behavior, BehaviorResult, Component, Methods, Registry};
use tamia_dom::{ElementRef, Event};
use tracing_subscriber::EnvFilter;

const PAGE: &str = r#"
    <div class="pink-pony is-pink" data-component="pony">
        <button class="pink-pony__button js-toggle">To pink or not to pink?</button>
    </div>
"#;

#[derive(Default)]
struct Pony;

impl Pony {
    fn toggle(this: &mut Component<Self>, _event: &Event) -> BehaviorResult {
        this.toggle_state("pink", None);
        Ok(())
    }
}

impl Behavior for Pony {
    fn methods() -> Methods<Self> {
        Methods::new().with("toggle", Self::toggle)
    }

    fn binded() -> &'static [&'static str] {
        &["toggle"]
    }

    fn init(this: &mut Component<Self>) -> BehaviorResult {
        if let Some(toggle) = this.handler("toggle_").cloned() {
            for button in this.find("toggle") {
                button.on("click", toggle.listener());
            }
        }
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let doc = tamia_html::parse(PAGE)?.into_shared();

    let mut registry = Registry::new();
    registry.register("pony", Pony::default);
    let mounted = registry.init_components(&ElementRef::body(&doc))?;

    for component in &mounted {
        let root = component.controller.root();
        println!("{}: {}", component.name, root.class_name());

        for button in root.find_by_class("js-toggle") {
            button.dispatch(&Event::new("click"))?;
        }
        println!("{} after click: {}", component.name, root.class_name());
    }

    Ok(())
}
