//! Launch argument declaration, resolution and forwarding

pub mod forward;
pub mod overrides;
pub mod registry;

pub use forward::ForwardedArguments;
pub use overrides::{parse_launch_arg, LaunchArguments};
pub use registry::{Argument, ArgumentHandle, ArgumentRegistry};
