use super::GraphTraverser;
use crate::{
    actions::{ContainerGroup, Descriptor, NamespaceScope},
    condition::should_include,
    description::Entity,
    error::{GraphError, Result},
    record::CommandGenerator,
};

impl GraphTraverser {
    pub(super) fn traverse_entities(&mut self, entities: &[Entity]) -> Result<()> {
        for entity in entities {
            self.traverse_entity(entity)?;
        }
        Ok(())
    }

    fn traverse_entity(&mut self, entity: &Entity) -> Result<()> {
        match entity {
            Entity::Node(node) => self.traverse_node(node),
            Entity::Container(container) => self.traverse_container(container),
            Entity::Scope(scope) => self.traverse_scope(scope),
            Entity::Include(include) => {
                if !should_include(include.enabled, include.condition.as_ref(), &self.context)? {
                    log::debug!("Skipping include of '{}'", include.description.name());
                    return Ok(());
                }
                self.process_include(include)
            }
        }
    }

    fn traverse_node(&mut self, node: &Descriptor) -> Result<()> {
        if !should_include(node.enabled, node.condition.as_ref(), &self.context)? {
            log::debug!("Skipping node {}", node.label());
            return Ok(());
        }

        let record = CommandGenerator::generate_node_record(node, &self.context, self.policy)?;
        self.claim_identity(&record.name, &record.namespace)?;
        log::debug!("Node {}", record.fully_qualified_name());
        self.graph.node.push(record);
        Ok(())
    }

    fn traverse_container(&mut self, container: &ContainerGroup) -> Result<()> {
        if !should_include(container.enabled, container.condition.as_ref(), &self.context)? {
            log::debug!("Skipping container {}", container.name);
            return Ok(());
        }

        let mut record = CommandGenerator::generate_container_record(container, &self.context)?;
        self.claim_identity(&record.name, &record.namespace)?;
        let target = record.fully_qualified_name();

        for component in container.components() {
            if !should_include(component.enabled, component.condition.as_ref(), &self.context)? {
                log::debug!("Skipping component {} of {}", component.label(), target);
                continue;
            }
            let loaded = CommandGenerator::generate_component_record(
                component,
                &target,
                &self.context,
                self.policy,
            )?;
            self.claim_identity(&loaded.node_name, &loaded.namespace)?;
            record.components.push(loaded);
        }

        log::debug!(
            "Container {} with {} components",
            target,
            record.components.len()
        );
        self.graph.container.push(record);
        Ok(())
    }

    fn traverse_scope(&mut self, scope: &NamespaceScope) -> Result<()> {
        if !should_include(scope.enabled, scope.condition.as_ref(), &self.context)? {
            log::debug!("Skipping scope {:?}", scope.prefix.as_ref().map(ToString::to_string));
            return Ok(());
        }

        let pushed = match &scope.prefix {
            Some(prefix) => {
                let namespace = prefix.resolve(&self.context)?;
                self.context.push_namespace(&namespace);
                true
            }
            None => false,
        };

        let result = self.traverse_entities(&scope.members);

        if pushed {
            self.context.pop_namespace();
        }
        result
    }

    /// Every runnable in the graph, included graphs too, needs a unique `(name, namespace)`
    pub(super) fn claim_identity(&mut self, name: &str, namespace: &str) -> Result<()> {
        if !self
            .identities
            .insert((name.to_string(), namespace.to_string()))
        {
            return Err(GraphError::DuplicateIdentity {
                name: name.to_string(),
                namespace: namespace.to_string(),
            });
        }
        Ok(())
    }
}
