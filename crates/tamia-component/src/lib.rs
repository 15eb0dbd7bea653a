//! Tamia components
//!
//! Binds behavior to DOM elements and keeps named boolean states in sync
//! with `is-*` class markers on the component root.
//!
//! # Example
//! ```rust,ignore
//! use tamia_component::{Behavior, Component, BehaviorResult, Methods, Registry};
//! use tamia_dom::Event;
//!
//! #[derive(Default)]
//! struct Pony;
//!
//! impl Pony {
//!     fn toggle(this: &mut Component<Self>, _event: &Event) -> BehaviorResult {
//!         this.toggle_state("pink", None);
//!         Ok(())
//!     }
//! }
//!
//! impl Behavior for Pony {
//!     fn methods() -> Methods<Self> {
//!         Methods::new().with("toggle", Self::toggle)
//!     }
//!
//!     fn binded() -> &'static [&'static str] {
//!         &["toggle"]
//!     }
//!
//!     fn init(this: &mut Component<Self>) -> BehaviorResult {
//!         if let Some(toggle) = this.handler("toggle_") {
//!             this.elem().on("click", toggle.listener());
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let mut registry = Registry::new();
//! registry.register("pony", Pony::default);
//! let mounted = registry.init_components(&body)?;
//! ```

mod behavior;
mod bound;
mod component;
mod config;
mod error;
mod registry;

pub use behavior::{Behavior, Method, Methods};
pub use bound::BoundMethod;
pub use component::{Component, Controller, OK_STATE, UNSUPPORTED_STATE};
pub use config::ComponentConfig;
pub use error::{BehaviorResult, ComponentError};
pub use registry::{AnyController, Mounted, Registry};
