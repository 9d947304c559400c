//! Joystick teleoperation: driver and mapper share one container

use super::common::{pass_vehicle_name_and_sim_time, USE_SIM_TIME, VEHICLE_NAME};
use crate::{
    actions::{ContainerGroup, Descriptor, NamespaceScope},
    description::LaunchDescription,
    error::Result,
    params::ParameterMap,
};

pub const NAME: &str = "joystick_control";

pub fn joystick_control() -> Result<LaunchDescription> {
    let mut description = LaunchDescription::new(NAME);
    let vehicle_name =
        description.declare_argument(VEHICLE_NAME, None, "Vehicle name used as namespace.")?;
    description.declare_argument(USE_SIM_TIME, None, "decide if simulation time is used.")?;

    let container = ContainerGroup::new("joystick_container")
        .with_namespace("")
        .with_output("screen")
        .with_components([
            Descriptor::composable("joy", "joy::Joy")
                .with_name("joystick")
                .with_parameters(
                    ParameterMap::new()
                        .set("device_id", 0)
                        .set("device_name", "")
                        .set("deadzone", 0.5)
                        .set("autorepeat_rate", 20.0)
                        .set("sticky_buttons", false)
                        .set("coalesce_interval_ms", 1),
                )
                .with_parameters(pass_vehicle_name_and_sim_time())
                .with_intra_process_comms(true),
            Descriptor::composable("remote_control", "remote_control::joystick::JoyStick")
                .with_name("joystick_mapper")
                .with_parameters(pass_vehicle_name_and_sim_time())
                .with_intra_process_comms(true),
        ])?;

    description.add(NamespaceScope::push(&vehicle_name, vec![container.into()]));
    Ok(description)
}
