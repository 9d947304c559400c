//! Command-line and record generation

use crate::{
    actions::{ContainerGroup, Descriptor, Target},
    error::{GraphError, Result},
    params::{resolve_parameter_sources, MergePolicy, ParamValue},
    record::types::{ComponentRecord, ContainerRecord, NodeRecord},
    substitution::LaunchContext,
    traverser::namespace::join_namespace,
};

pub struct CommandGenerator;

impl CommandGenerator {
    pub fn generate_node_record(
        node: &Descriptor,
        context: &LaunchContext,
        policy: MergePolicy,
    ) -> Result<NodeRecord> {
        let Target::Executable {
            package,
            executable,
        } = &node.target
        else {
            // Components only run inside a container group
            return Err(GraphError::InvalidDescriptorKind {
                container: "<none>".to_string(),
                executable: node.label(),
            });
        };

        let package = package.resolve(context)?;
        let executable = executable.resolve(context)?;

        let name = match &node.name {
            Some(name) => name.resolve(context)?,
            None => executable.clone(),
        };
        let namespace = effective_namespace(node, context)?;

        let resolved = resolve_parameter_sources(&name, &node.parameters, context, policy)?;
        let remaps = resolve_remappings(node, context)?;
        let args = node
            .arguments
            .iter()
            .map(|arg| arg.resolve(context))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut record = NodeRecord {
            executable,
            package,
            name,
            namespace,
            params: resolved.params,
            params_files: resolved.params_files,
            remaps,
            args,
            cmd: Vec::new(),
            output: node.output.clone(),
        };
        record.cmd = Self::generate_node_command(&record);
        Ok(record)
    }

    /// Build `<exec> [args] --ros-args -r __node:=.. -r __ns:=.. [-r ..] [-p ..] [--params-file ..]`
    ///
    /// The executable stays a bare name; the graph never inspects install prefixes.
    pub fn generate_node_command(record: &NodeRecord) -> Vec<String> {
        let mut cmd = vec![record.executable.clone()];
        cmd.extend(record.args.iter().cloned());

        cmd.push("--ros-args".to_string());
        cmd.push("-r".to_string());
        cmd.push(format!("__node:={}", record.name));
        if !record.namespace.is_empty() {
            cmd.push("-r".to_string());
            cmd.push(format!("__ns:={}", record.namespace));
        }

        for (from, to) in &record.remaps {
            cmd.push("-r".to_string());
            cmd.push(format!("{}:={}", from, to));
        }

        for (key, value) in &record.params {
            cmd.push("-p".to_string());
            cmd.push(format!("{}:={}", key, value.to_arg_string()));
        }

        for file in &record.params_files {
            cmd.push("--params-file".to_string());
            cmd.push(file.clone());
        }

        cmd
    }

    /// Host process record of a container group, without its components
    pub fn generate_container_record(
        container: &ContainerGroup,
        context: &LaunchContext,
    ) -> Result<ContainerRecord> {
        let name = container.name.resolve(context)?;
        let package = container.package.resolve(context)?;
        let executable = container.executable.resolve(context)?;
        let namespace = match &container.namespace {
            Some(ns) => join_namespace(&context.current_namespace(), &ns.resolve(context)?),
            None => context.current_namespace(),
        };

        let mut cmd = vec![executable.clone()];
        cmd.push("--ros-args".to_string());
        cmd.push("-r".to_string());
        cmd.push(format!("__node:={}", name));
        if !namespace.is_empty() {
            cmd.push("-r".to_string());
            cmd.push(format!("__ns:={}", namespace));
        }

        Ok(ContainerRecord {
            name,
            namespace,
            package,
            executable,
            cmd,
            output: container.output.clone(),
            components: Vec::new(),
        })
    }

    pub fn generate_component_record(
        component: &Descriptor,
        target_container_name: &str,
        context: &LaunchContext,
        policy: MergePolicy,
    ) -> Result<ComponentRecord> {
        let Target::Plugin { package, plugin } = &component.target else {
            return Err(GraphError::InvalidDescriptorKind {
                container: target_container_name.to_string(),
                executable: component.label(),
            });
        };

        let package = package.resolve(context)?;
        let plugin = plugin.resolve(context)?;
        let node_name = match &component.name {
            Some(name) => name.resolve(context)?,
            None => default_component_name(&plugin),
        };
        let namespace = effective_namespace(component, context)?;

        let resolved =
            resolve_parameter_sources(&node_name, &component.parameters, context, policy)?;
        let remaps = resolve_remappings(component, context)?;

        Ok(ComponentRecord {
            package,
            plugin,
            target_container_name: target_container_name.to_string(),
            node_name,
            namespace,
            remaps,
            params: resolved.params,
            params_files: resolved.params_files,
            extra_args: component.extra_arguments.clone(),
        })
    }
}

/// Namespace of a descriptor below the current scope
fn effective_namespace(descriptor: &Descriptor, context: &LaunchContext) -> Result<String> {
    let current = context.current_namespace();
    match &descriptor.namespace {
        Some(ns) => Ok(join_namespace(&current, &ns.resolve(context)?)),
        None => Ok(current),
    }
}

fn resolve_remappings(descriptor: &Descriptor, context: &LaunchContext) -> Result<Vec<(String, String)>> {
    descriptor
        .remappings
        .iter()
        .map(|(from, to)| Ok((from.resolve(context)?, to.resolve(context)?)))
        .collect()
}

/// `remote_control::joystick::JoyStick` -> `JoyStick`
fn default_component_name(plugin: &str) -> String {
    plugin
        .rsplit("::")
        .next()
        .unwrap_or(plugin)
        .to_string()
}

/// True when the component asked for intra-process transport
pub fn uses_intra_process_comms(record: &ComponentRecord) -> bool {
    matches!(
        record.extra_args.get(crate::actions::descriptor::USE_INTRA_PROCESS_COMMS),
        Some(ParamValue::Bool(true))
    )
}
