//! Process and component descriptors

use crate::{
    ir::{Condition, Expr},
    params::{ParamValue, ParameterSource},
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Key of the intra-process communication hint in `extra_arguments`
pub const USE_INTRA_PROCESS_COMMS: &str = "use_intra_process_comms";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptorKind {
    /// Runs as its own OS process
    StandaloneProcess,
    /// Loaded into the host process of a container group
    InProcessComponent,
}

/// What a descriptor resolves to
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Executable { package: Expr, executable: Expr },
    Plugin { package: Expr, plugin: Expr },
}

impl Target {
    pub fn kind(&self) -> DescriptorKind {
        match self {
            Target::Executable { .. } => DescriptorKind::StandaloneProcess,
            Target::Plugin { .. } => DescriptorKind::InProcessComponent,
        }
    }

    pub fn package(&self) -> &Expr {
        match self {
            Target::Executable { package, .. } | Target::Plugin { package, .. } => package,
        }
    }

    /// Executable or plugin class
    pub fn entry_point(&self) -> &Expr {
        match self {
            Target::Executable { executable, .. } => executable,
            Target::Plugin { plugin, .. } => plugin,
        }
    }
}

/// One unit of execution: a standalone process or an in-process component
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    pub target: Target,
    pub name: Option<Expr>,
    pub namespace: Option<Expr>,
    pub parameters: Vec<ParameterSource>,
    pub remappings: Vec<(Expr, Expr)>,
    pub arguments: Vec<Expr>,
    pub extra_arguments: IndexMap<String, ParamValue>,
    pub output: Option<String>,
    pub enabled: bool,
    pub condition: Option<Condition>,
}

impl Descriptor {
    pub fn new(target: Target) -> Self {
        Self {
            target,
            name: None,
            namespace: None,
            parameters: Vec::new(),
            remappings: Vec::new(),
            arguments: Vec::new(),
            extra_arguments: IndexMap::new(),
            output: None,
            enabled: true,
            condition: None,
        }
    }

    /// A standalone node started from `package`'s `executable`
    pub fn node(package: impl Into<Expr>, executable: impl Into<Expr>) -> Self {
        Self::new(Target::Executable {
            package: package.into(),
            executable: executable.into(),
        })
    }

    /// A component loaded from `package`'s `plugin` class
    pub fn composable(package: impl Into<Expr>, plugin: impl Into<Expr>) -> Self {
        Self::new(Target::Plugin {
            package: package.into(),
            plugin: plugin.into(),
        })
    }

    pub fn kind(&self) -> DescriptorKind {
        self.target.kind()
    }

    pub fn with_name(mut self, name: impl Into<Expr>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<Expr>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Append a parameter source; sources are concatenated in call order
    pub fn with_parameters(mut self, source: impl Into<ParameterSource>) -> Self {
        self.parameters.push(source.into());
        self
    }

    pub fn with_parameter_file(self, path: impl Into<Expr>) -> Self {
        self.with_parameters(ParameterSource::File(path.into()))
    }

    pub fn with_remapping(mut self, from: impl Into<Expr>, to: impl Into<Expr>) -> Self {
        self.remappings.push((from.into(), to.into()));
        self
    }

    /// Command-line arguments placed before `--ros-args`
    pub fn with_arguments<I, A>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Expr>,
    {
        self.arguments.extend(arguments.into_iter().map(Into::into));
        self
    }

    pub fn with_intra_process_comms(mut self, enabled: bool) -> Self {
        self.extra_arguments
            .insert(USE_INTRA_PROCESS_COMMS.to_string(), ParamValue::Bool(enabled));
        self
    }

    pub fn intra_process_comms(&self) -> bool {
        matches!(
            self.extra_arguments.get(USE_INTRA_PROCESS_COMMS),
            Some(ParamValue::Bool(true))
        )
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Keep the descriptor in the description but leave it out of every build
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Human readable label for log and error messages
    pub fn label(&self) -> String {
        self.name
            .as_ref()
            .unwrap_or_else(|| self.target.entry_point())
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{arguments::ForwardedArguments, params::ParameterMap};

    #[test]
    fn test_node_descriptor() {
        let node = Descriptor::node("mjpeg_cam", "mjpeg_cam_node")
            .with_name("front_camera")
            .with_namespace("front_camera")
            .with_parameters(ParameterMap::new().set("device_id", 0).set("discrete_size", 3));

        assert_eq!(node.kind(), DescriptorKind::StandaloneProcess);
        assert_eq!(node.name, Some(Expr::literal("front_camera")));
        assert_eq!(node.parameters.len(), 1);
        assert!(node.enabled);
        assert!(!node.intra_process_comms());
    }

    #[test]
    fn test_composable_descriptor() {
        let component = Descriptor::composable("joy", "joy::Joy")
            .with_name("joystick")
            .with_parameters(ForwardedArguments::new().with_vehicle_name_and_sim_time())
            .with_intra_process_comms(true);

        assert_eq!(component.kind(), DescriptorKind::InProcessComponent);
        assert!(component.intra_process_comms());
        assert_eq!(
            component.extra_arguments.get(USE_INTRA_PROCESS_COMMS),
            Some(&ParamValue::Bool(true))
        );
    }

    #[test]
    fn test_parameter_sources_keep_order() {
        let node = Descriptor::node("hippo_control", "actuator_mixer_node")
            .with_parameters(ForwardedArguments::new().with(["vehicle_name"]))
            .with_parameter_file(Expr::var("mixer_path"));
        assert!(matches!(node.parameters[0], ParameterSource::Forwarded(_)));
        assert!(matches!(node.parameters[1], ParameterSource::File(_)));
    }

    #[test]
    fn test_disabled_and_label() {
        let node = Descriptor::node("v4l2_camera", "v4l2_camera_node").disabled();
        assert!(!node.enabled);
        assert_eq!(node.label(), "v4l2_camera_node");
        assert_eq!(node.with_name("front_camera").label(), "front_camera");
    }

    #[test]
    fn test_arguments() {
        let agent = Descriptor::node("micro_ros_agent", "micro_ros_agent").with_arguments([
            "serial",
            "--dev",
            "/dev/fcu_data",
            "-b",
            "921600",
        ]);
        assert_eq!(agent.arguments.len(), 5);
        assert_eq!(agent.arguments[2], Expr::literal("/dev/fcu_data"));
    }
}
