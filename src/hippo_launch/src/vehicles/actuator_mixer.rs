//! Actuator mixer sub-graph, included by the vehicle descriptions

use super::common::{declare_vehicle_name_and_sim_time, pass_vehicle_name_and_sim_time};
use crate::{actions::Descriptor, description::LaunchDescription, error::Result, ir::Expr};

pub const NAME: &str = "node_actuator_mixer";
pub const MIXER_PATH: &str = "mixer_path";

pub fn node_actuator_mixer() -> Result<LaunchDescription> {
    let mut description = LaunchDescription::new(NAME);
    declare_vehicle_name_and_sim_time(&mut description)?;
    let mixer_path = description.declare_argument(
        MIXER_PATH,
        None,
        "Path to mixer configuration .yaml file",
    )?;

    description.add(
        Descriptor::node("hippo_control", "actuator_mixer_node")
            .with_name("actuator_mixer")
            .with_parameters(pass_vehicle_name_and_sim_time())
            .with_parameter_file(Expr::from(&mixer_path)),
    );
    Ok(description)
}
