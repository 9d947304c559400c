//! Launch descriptions of the vehicle stack

pub mod actuator_mixer;
pub mod bluerov;
pub mod common;
pub mod joystick;

use crate::{
    description::LaunchDescription,
    error::{GraphError, Result},
};

/// Names accepted by [`launch_description`]
pub const LAUNCH_NAMES: &[&str] = &[bluerov::NAME, joystick::NAME, actuator_mixer::NAME];

/// Construct a launch description by name
pub fn launch_description(name: &str) -> Result<LaunchDescription> {
    match name {
        bluerov::NAME => bluerov::bluerov(),
        joystick::NAME => joystick::joystick_control(),
        actuator_mixer::NAME => actuator_mixer::node_actuator_mixer(),
        other => Err(GraphError::UnknownLaunch(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_name_constructs() {
        for name in LAUNCH_NAMES {
            assert_eq!(launch_description(name).unwrap().name(), *name);
        }
    }

    #[test]
    fn test_unknown_launch() {
        assert!(matches!(
            launch_description("heron"),
            Err(GraphError::UnknownLaunch(name)) if name == "heron"
        ));
    }
}
