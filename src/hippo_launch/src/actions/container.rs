//! Container groups for composable nodes
//!
//! Every component of a group is loaded into one host process. The members
//! share that process's lifetime: when the host exits, all of them do.

use crate::{
    actions::{Descriptor, DescriptorKind},
    error::{GraphError, Result},
    ir::{Condition, Expr},
};

#[derive(Debug, Clone, PartialEq)]
pub struct ContainerGroup {
    pub name: Expr,
    pub namespace: Option<Expr>,
    pub package: Expr,
    pub executable: Expr,
    pub output: Option<String>,
    pub enabled: bool,
    pub condition: Option<Condition>,
    components: Vec<Descriptor>,
}

impl ContainerGroup {
    /// A single-threaded `rclcpp_components` container
    pub fn new(name: impl Into<Expr>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            package: Expr::literal("rclcpp_components"),
            executable: Expr::literal("component_container"),
            output: None,
            enabled: true,
            condition: None,
            components: Vec::new(),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<Expr>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Host the components in a different container executable
    pub fn with_executable(mut self, package: impl Into<Expr>, executable: impl Into<Expr>) -> Self {
        self.package = package.into();
        self.executable = executable.into();
        self
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Add a component. Standalone process descriptors are rejected.
    pub fn add(&mut self, component: Descriptor) -> Result<()> {
        if component.kind() != DescriptorKind::InProcessComponent {
            return Err(GraphError::InvalidDescriptorKind {
                container: self.name.to_string(),
                executable: component.label(),
            });
        }
        self.components.push(component);
        Ok(())
    }

    pub fn with_components(
        mut self,
        components: impl IntoIterator<Item = Descriptor>,
    ) -> Result<Self> {
        for component in components {
            self.add(component)?;
        }
        Ok(self)
    }

    pub fn components(&self) -> &[Descriptor] {
        &self.components
    }
}
