//! hippo_launch library
//!
//! Composes the process graph of a vehicle: which nodes and containers run,
//! under which namespace and with which parameters.

pub mod actions;
pub mod arguments;
pub mod condition;
pub mod description;
pub mod error;
pub mod ir;
pub mod params;
pub mod record;
pub mod substitution;
pub mod traverser;
pub mod vehicles;

pub use actions::{ContainerGroup, Descriptor, DescriptorKind, Include, NamespaceScope, Target};
pub use arguments::{ArgumentHandle, ArgumentRegistry, ForwardedArguments, LaunchArguments};
pub use description::{BuildOptions, Entity, LaunchDescription};
pub use error::{GraphError, Result, SubstitutionError};
pub use ir::{Condition, Expr};
pub use params::{MergePolicy, ParamValue, ParameterMap, ParameterSource};
pub use record::LaunchGraph;

/// Build one of the vehicle launch descriptions by name
pub fn build_launch(
    name: &str,
    overrides: &LaunchArguments,
    options: &BuildOptions,
) -> Result<LaunchGraph> {
    let description = vehicles::launch_description(name)?;
    log::info!("Building launch description '{}'", description.name());
    description.build_with_options(overrides, options)
}
