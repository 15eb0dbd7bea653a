//! Tamia DOM - Document Object Model host
//!
//! Small arena DOM that components bind to: nodes, class token lists,
//! element geometry and event listeners.

mod node;
mod tree;
mod classlist;
mod geometry;
mod document;
mod element_ref;
mod events;

pub use node::{Node, NodeData, NodeType, ElementData, Attribute};
pub use tree::DomTree;
pub use classlist::TokenList;
pub use geometry::ElementGeometry;
pub use document::{Document, SharedDocument};
pub use element_ref::ElementRef;
pub use events::{Event, Listener, ListenerResult};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this ID points at a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Raw arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
