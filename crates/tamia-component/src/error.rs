//! Component errors

use tamia_dom::{NodeId, NodeType};

/// Result type of behavior hooks and methods
pub type BehaviorResult<T = ()> = anyhow::Result<T>;

/// Component error
#[derive(Debug, thiserror::Error)]
pub enum ComponentError {
    /// The root passed to the constructor is missing or not an element
    #[error("No DOM element passed to component constructor (node {node:?} is {found:?})")]
    InvalidRoot {
        node: NodeId,
        found: Option<NodeType>,
    },

    /// A method listed for binding is missing from the method table
    #[error("Component method `{method}` does not exist or is not a function")]
    Binding { method: String },

    /// A bound method outlived the component it was bound to
    #[error("Bound method `{method}` called after its component was dropped")]
    Detached { method: String },

    /// A bound method was called while its component was already borrowed
    #[error("Bound method `{method}` called re-entrantly while its component is in use")]
    Busy { method: String },

    /// The component was already borrowed through its controller
    #[error("Component on node {node:?} is already in use")]
    InUse { node: NodeId },

    /// Error raised by a behavior hook or method, passed through untouched
    #[error(transparent)]
    Behavior(#[from] anyhow::Error),
}

impl ComponentError {
    /// Convert for use where an `anyhow::Error` is expected, unwrapping
    /// behavior errors instead of nesting them
    pub fn into_anyhow(self) -> anyhow::Error {
        match self {
            Self::Behavior(err) => err,
            other => anyhow::Error::new(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_behavior_error_is_transparent() {
        let err = ComponentError::from(anyhow::anyhow!("no ponies today"));
        assert_eq!(err.to_string(), "no ponies today");
        assert_eq!(err.into_anyhow().to_string(), "no ponies today");
    }

    #[test]
    fn test_binding_message_names_method() {
        let err = ComponentError::Binding { method: "onClick".to_string() };
        assert!(err.to_string().contains("onClick"));
    }
}
