//! Arguments shared by every vehicle launch description

use crate::{
    arguments::{ArgumentHandle, ForwardedArguments},
    description::LaunchDescription,
    error::Result,
    ir::Expr,
};

pub const VEHICLE_NAME: &str = "vehicle_name";
pub const USE_SIM_TIME: &str = "use_sim_time";

/// Declare `vehicle_name` (required) and `use_sim_time` (default `false`)
pub fn declare_vehicle_name_and_sim_time(
    description: &mut LaunchDescription,
) -> Result<(ArgumentHandle, ArgumentHandle)> {
    let vehicle_name =
        description.declare_argument(VEHICLE_NAME, None, "Vehicle name used as namespace.")?;
    let use_sim_time = description.declare_argument(
        USE_SIM_TIME,
        Some(Expr::literal("false")),
        "Decide if simulation time is used.",
    )?;
    Ok((vehicle_name, use_sim_time))
}

/// Forward `vehicle_name` and `use_sim_time` to a node or include
pub fn pass_vehicle_name_and_sim_time() -> ForwardedArguments {
    ForwardedArguments::new().with_vehicle_name_and_sim_time()
}
