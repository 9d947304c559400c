//! BlueROV hardware launch description
//!
//! Everything except the micro-ROS agent runs below the vehicle name. The
//! agent bridges the flight controller on a fixed serial device and stays
//! in the root namespace.

use super::{
    actuator_mixer::{self, MIXER_PATH},
    common::{
        declare_vehicle_name_and_sim_time, pass_vehicle_name_and_sim_time, USE_SIM_TIME,
        VEHICLE_NAME,
    },
};
use crate::{
    actions::{Descriptor, Include, NamespaceScope},
    description::{Entity, LaunchDescription},
    error::Result,
    ir::Expr,
    params::ParameterMap,
};
use std::sync::Arc;

pub const NAME: &str = "bluerov";

pub fn bluerov() -> Result<LaunchDescription> {
    let mut description = LaunchDescription::new(NAME);
    let (vehicle_name, _) = declare_vehicle_name_and_sim_time(&mut description)?;
    description.declare_argument(
        MIXER_PATH,
        Some(
            Expr::find_package_share("hippo_control")
                .join("/config/actuator_mixer/bluerov_normalized_default.yaml"),
        ),
        "Path to mixer configuration .yaml file",
    )?;

    let mixer = include_mixer(&description)?;
    let vehicle = NamespaceScope::push(
        &vehicle_name,
        vec![
            mixer.into(),
            camera_node().into(),
            jpeg_camera_node().into(),
            forwarding_node("hardware", "newton_gripper_node", "newton_gripper"),
            forwarding_node("hardware", "camera_servo_node", "camera_servo"),
            forwarding_node("hardware", "spotlight_node", "spotlight"),
            forwarding_node("esc", "teensy_commander_node", "esc_commander"),
        ],
    );
    description.add(vehicle).add(micro_ros_agent());
    Ok(description)
}

fn include_mixer(description: &LaunchDescription) -> Result<Include> {
    let arguments = description.forward([VEHICLE_NAME, USE_SIM_TIME, MIXER_PATH], Vec::new())?;
    Ok(Include::new(
        Arc::new(actuator_mixer::node_actuator_mixer()?),
        arguments,
    ))
}

/// v4l2 camera, kept for cameras without MJPEG support
fn camera_node() -> Descriptor {
    Descriptor::node("v4l2_camera", "v4l2_camera_node")
        .with_name("front_camera")
        .with_namespace("front_camera")
        .with_parameters(ParameterMap::new().set("image_size", vec![640, 480]))
        .disabled()
}

fn jpeg_camera_node() -> Descriptor {
    Descriptor::node("mjpeg_cam", "mjpeg_cam_node")
        .with_name("front_camera")
        .with_namespace("front_camera")
        .with_parameters(
            ParameterMap::new()
                .set("device_id", 0)
                .set("discrete_size", 3),
        )
}

fn forwarding_node(package: &str, executable: &str, name: &str) -> Entity {
    Descriptor::node(package, executable)
        .with_name(name)
        .with_parameters(pass_vehicle_name_and_sim_time())
        .into()
}

fn micro_ros_agent() -> Descriptor {
    Descriptor::node("micro_ros_agent", "micro_ros_agent")
        .with_name("dds_agent")
        .with_arguments(["serial", "--dev", "/dev/fcu_data", "-b", "921600"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{arguments::LaunchArguments, error::GraphError};

    fn overrides() -> LaunchArguments {
        LaunchArguments::new()
            .with(VEHICLE_NAME, "bluerov0")
            .with(MIXER_PATH, "/tmp/mixer.yaml")
    }

    #[test]
    fn test_declared_arguments() {
        let description = bluerov().unwrap();
        let names: Vec<_> = description
            .arguments()
            .iter()
            .map(|argument| argument.name.as_str())
            .collect();
        assert_eq!(names, vec![VEHICLE_NAME, USE_SIM_TIME, MIXER_PATH]);
    }

    #[test]
    fn test_graph_layout() {
        let graph = bluerov().unwrap().build(&overrides()).unwrap();

        let names: Vec<_> = graph.node.iter().map(|node| node.fully_qualified_name()).collect();
        assert_eq!(
            names,
            vec![
                "/bluerov0/front_camera/front_camera",
                "/bluerov0/newton_gripper",
                "/bluerov0/camera_servo",
                "/bluerov0/spotlight",
                "/bluerov0/esc_commander",
                "/dds_agent",
            ]
        );
        assert!(graph.find_node("/bluerov0/front_camera/front_camera").is_some_and(
            |camera| camera.package == "mjpeg_cam"
        ));

        assert_eq!(graph.include.len(), 1);
        let mixer = &graph.include[0];
        assert_eq!(mixer.namespace, "/bluerov0");
        assert_eq!(
            mixer.launch_arguments,
            vec![
                (VEHICLE_NAME.to_string(), "bluerov0".to_string()),
                (USE_SIM_TIME.to_string(), "false".to_string()),
                (MIXER_PATH.to_string(), "/tmp/mixer.yaml".to_string()),
            ]
        );
        assert_eq!(
            mixer.graph.node[0].fully_qualified_name(),
            "/bluerov0/actuator_mixer"
        );
    }

    #[test]
    fn test_micro_ros_agent_arguments() {
        let graph = bluerov().unwrap().build(&overrides()).unwrap();
        let agent = graph.find_node("/dds_agent").unwrap();
        assert_eq!(agent.namespace, "");
        assert_eq!(agent.args, vec!["serial", "--dev", "/dev/fcu_data", "-b", "921600"]);
        assert!(agent.params.is_empty());
    }

    #[test]
    fn test_mixer_default_needs_package() {
        let err = bluerov()
            .unwrap()
            .build(&LaunchArguments::new().with(VEHICLE_NAME, "bluerov0"))
            .unwrap_err();
        assert!(matches!(err, GraphError::Substitution(_)));
    }
}
