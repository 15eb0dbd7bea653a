//! Component Configuration

/// Naming conventions shared by components and the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentConfig {
    /// Class prefix marking a state on the component root
    pub state_prefix: String,

    /// Class prefix marking a sub-element inside a component
    pub element_prefix: String,

    /// Attribute naming the component type of a root element
    pub component_attribute: String,

    /// Attribute the registry sets on roots it has initialized
    pub initialized_attribute: String,

    /// Suffix appended to a method name to form its bound name
    pub bound_suffix: String,
}

impl ComponentConfig {
    /// Marker token for a state name
    pub fn state_token(&self, name: &str) -> String {
        format!("{}{}", self.state_prefix, name)
    }

    /// Class of the sub-elements called `name`
    pub fn element_class(&self, name: &str) -> String {
        format!("{}{}", self.element_prefix, name)
    }

    /// Bound name of a method
    pub fn bound_name(&self, method: &str) -> String {
        format!("{}{}", method, self.bound_suffix)
    }
}

impl Default for ComponentConfig {
    fn default() -> Self {
        Self {
            state_prefix: "is-".to_string(),
            element_prefix: "js-".to_string(),
            component_attribute: "data-component".to_string(),
            initialized_attribute: "data-component-initialized".to_string(),
            bound_suffix: "_".to_string(),
        }
    }
}
