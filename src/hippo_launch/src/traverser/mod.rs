//! Launch description traversal
//!
//! `GraphTraverser` runs the resolve phase of one launch description and
//! walks its entities to produce a `LaunchGraph`. Entity handling lives in
//! `entity`, includes in `include`.

mod entity;
mod include;
pub mod namespace;

use crate::{
    actions::Descriptor,
    arguments::{ArgumentRegistry, LaunchArguments},
    description::{Entity, LaunchDescription},
    error::Result,
    params::{MergePolicy, ParameterSource},
    record::{ArgumentRecord, LaunchGraph},
    substitution::LaunchContext,
};
use std::collections::HashSet;

/// Builds the launch graph of a single launch description
pub struct GraphTraverser {
    context: LaunchContext,
    policy: MergePolicy,
    graph: LaunchGraph,
    /// `(name, namespace)` of every node, container and component claimed so far
    identities: HashSet<(String, String)>,
}

impl GraphTraverser {
    /// Resolve `description` against `overrides` and compose its graph
    ///
    /// `base` carries the package prefixes and the namespace the
    /// description is placed under.
    pub fn build(
        description: &LaunchDescription,
        overrides: &LaunchArguments,
        base: LaunchContext,
        policy: MergePolicy,
    ) -> Result<LaunchGraph> {
        validate_forwarding(description.arguments(), description.entities())?;

        let context = description.arguments().resolve_all(overrides, base)?;
        let mut traverser = Self {
            context,
            policy,
            graph: LaunchGraph::new(description.name()),
            identities: HashSet::new(),
        };
        traverser.record_arguments(description.arguments());
        traverser.traverse_entities(description.entities())?;

        log::debug!(
            "Built '{}': {} nodes, {} containers, {} includes",
            description.name(),
            traverser.graph.node.len(),
            traverser.graph.container.len(),
            traverser.graph.include.len()
        );
        Ok(traverser.graph)
    }

    fn record_arguments(&mut self, registry: &ArgumentRegistry) {
        self.graph.arguments = registry
            .iter()
            .map(|argument| ArgumentRecord {
                name: argument.name.clone(),
                description: argument.description.clone(),
                default: argument.default.as_ref().map(ToString::to_string),
                choices: argument.choices.clone(),
                value: self
                    .context
                    .get_configuration(&argument.name)
                    .unwrap_or_default()
                    .to_string(),
            })
            .collect();
    }
}

/// Every forwarded list must only name arguments declared by `registry`
///
/// Checked before resolution so a misspelt name fails the build even when
/// the entity forwarding it is disabled.
fn validate_forwarding(registry: &ArgumentRegistry, entities: &[Entity]) -> Result<()> {
    let check_descriptor = |descriptor: &Descriptor| -> Result<()> {
        for source in &descriptor.parameters {
            if let ParameterSource::Forwarded(forwarded) = source {
                registry.validate_forwarded(forwarded)?;
            }
        }
        Ok(())
    };

    for entity in entities {
        match entity {
            Entity::Node(node) => check_descriptor(node)?,
            Entity::Container(container) => {
                for component in container.components() {
                    check_descriptor(component)?;
                }
            }
            Entity::Scope(scope) => validate_forwarding(registry, &scope.members)?,
            Entity::Include(include) => registry.validate_forwarded(&include.arguments)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        arguments::ForwardedArguments, error::GraphError, ir::Expr, params::ParameterMap,
    };

    #[test]
    fn test_argument_records() {
        let mut description = LaunchDescription::new("test");
        description
            .declare_argument("vehicle_name", None, "Vehicle name used as namespace.")
            .unwrap();
        description
            .declare_argument(
                "use_sim_time",
                Some(Expr::literal("false")),
                "Decide if simulation time is used.",
            )
            .unwrap();

        let graph = GraphTraverser::build(
            &description,
            &LaunchArguments::new().with("vehicle_name", "uuv00"),
            LaunchContext::new(),
            MergePolicy::Reject,
        )
        .unwrap();

        assert_eq!(graph.arguments.len(), 2);
        assert_eq!(graph.arguments[0].name, "vehicle_name");
        assert_eq!(graph.arguments[0].default, None);
        assert_eq!(graph.arguments[0].value, "uuv00");
        assert_eq!(graph.arguments[1].default, Some("false".to_string()));
        assert_eq!(graph.arguments[1].value, "false");
    }

    #[test]
    fn test_disabled_entity_still_validated() {
        let mut description = LaunchDescription::new("test");
        description.add(
            Descriptor::node("hardware", "spotlight_node")
                .with_parameters(ForwardedArguments::new().with(["vehicle_nmae"]))
                .disabled(),
        );

        let err = GraphTraverser::build(
            &description,
            &LaunchArguments::new(),
            LaunchContext::new(),
            MergePolicy::Reject,
        )
        .unwrap_err();
        assert!(matches!(err, GraphError::UnknownArgument(name) if name == "vehicle_nmae"));
    }

    #[test]
    fn test_inline_maps_need_no_declaration() {
        let mut description = LaunchDescription::new("test");
        description.add(
            Descriptor::node("mjpeg_cam", "mjpeg_cam_node")
                .with_parameters(ParameterMap::new().set("device_id", 0)),
        );
        let graph = GraphTraverser::build(
            &description,
            &LaunchArguments::new(),
            LaunchContext::new(),
            MergePolicy::Reject,
        )
        .unwrap();
        assert_eq!(graph.node.len(), 1);
    }
}
