//! Action module

pub mod container;
pub mod descriptor;
pub mod group;
pub mod include;

pub use container::ContainerGroup;
pub use descriptor::{Descriptor, DescriptorKind, Target};
pub use group::NamespaceScope;
pub use include::Include;
