use super::GraphTraverser;
use crate::{
    actions::Include,
    arguments::LaunchArguments,
    error::{GraphError, Result},
    ir::Expr,
    record::IncludeRecord,
    substitution::LaunchContext,
};

impl GraphTraverser {
    /// Build an included description under the current namespace
    ///
    /// Forwarded names carry the value they resolved to here. Extras are
    /// handed over unevaluated and resolve against the included
    /// description's own arguments.
    pub(super) fn process_include(&mut self, include: &Include) -> Result<()> {
        let mut overrides = LaunchArguments::new();
        for name in include.arguments.names() {
            let value = self
                .context
                .get_configuration(name)
                .ok_or_else(|| GraphError::UnknownArgument(name.clone()))?;
            overrides.insert(name.clone(), Expr::literal(value));
        }
        for (name, value) in include.arguments.extra() {
            overrides.insert(name.clone(), value.clone());
        }

        let namespace = self.context.current_namespace();
        let source = include.description.name().to_string();
        log::info!("Including launch description '{}' under '{}'", source, namespace);
        if !overrides.is_empty() {
            let names: Vec<&str> = overrides.names().collect();
            log::debug!("Include args: {:?}", names);
        }

        let base = LaunchContext::new()
            .with_package_prefixes(self.context.package_prefixes().to_vec())
            .with_base_namespace(namespace.clone());
        let graph = GraphTraverser::build(&include.description, &overrides, base, self.policy)?;

        for node in graph.all_nodes() {
            self.claim_identity(&node.name, &node.namespace)?;
        }
        for container in graph.all_containers() {
            self.claim_identity(&container.name, &container.namespace)?;
            for component in &container.components {
                self.claim_identity(&component.node_name, &component.namespace)?;
            }
        }

        let launch_arguments = overrides
            .names()
            .filter_map(|name| {
                graph
                    .argument(name)
                    .map(|argument| (name.to_string(), argument.value.clone()))
            })
            .collect();

        self.graph.include.push(IncludeRecord {
            source,
            namespace,
            launch_arguments,
            graph,
        });
        Ok(())
    }
}
