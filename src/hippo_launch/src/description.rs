//! Launch descriptions
//!
//! A `LaunchDescription` owns its argument registry and an ordered list of
//! entities. It never changes while a graph is built, so the same
//! description can be built many times and shared between includes.

use crate::{
    actions::{ContainerGroup, Descriptor, Include, NamespaceScope},
    arguments::{ArgumentHandle, ArgumentRegistry, ForwardedArguments, LaunchArguments},
    error::Result,
    ir::Expr,
    params::MergePolicy,
    record::LaunchGraph,
    substitution::LaunchContext,
    traverser::GraphTraverser,
};
use std::path::PathBuf;

/// Member of a launch description or namespace scope
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Node(Descriptor),
    Container(ContainerGroup),
    Scope(NamespaceScope),
    Include(Include),
}

impl From<Descriptor> for Entity {
    fn from(node: Descriptor) -> Self {
        Entity::Node(node)
    }
}

impl From<ContainerGroup> for Entity {
    fn from(container: ContainerGroup) -> Self {
        Entity::Container(container)
    }
}

impl From<NamespaceScope> for Entity {
    fn from(scope: NamespaceScope) -> Self {
        Entity::Scope(scope)
    }
}

impl From<Include> for Entity {
    fn from(include: Include) -> Self {
        Entity::Include(include)
    }
}

/// Settings of a single build that are not launch arguments
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub merge_policy: MergePolicy,
    /// Install prefixes searched for package share directories and executables
    pub package_prefixes: Vec<PathBuf>,
}

impl BuildOptions {
    /// Options with package prefixes taken from `AMENT_PREFIX_PATH`
    pub fn from_env() -> Self {
        let package_prefixes = std::env::var_os("AMENT_PREFIX_PATH")
            .map(|paths| std::env::split_paths(&paths).collect())
            .unwrap_or_default();
        Self {
            merge_policy: MergePolicy::default(),
            package_prefixes,
        }
    }

    pub fn with_merge_policy(mut self, policy: MergePolicy) -> Self {
        self.merge_policy = policy;
        self
    }

    pub fn with_package_prefixes(mut self, prefixes: Vec<PathBuf>) -> Self {
        self.package_prefixes = prefixes;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaunchDescription {
    name: String,
    arguments: ArgumentRegistry,
    entities: Vec<Entity>,
}

impl LaunchDescription {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arguments(&self) -> &ArgumentRegistry {
        &self.arguments
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn declare_argument(
        &mut self,
        name: impl Into<String>,
        default: Option<Expr>,
        description: impl Into<String>,
    ) -> Result<ArgumentHandle> {
        self.arguments.declare(name, default, description)
    }

    pub fn declare_argument_with_choices(
        &mut self,
        name: impl Into<String>,
        default: Option<Expr>,
        description: impl Into<String>,
        choices: Vec<String>,
    ) -> Result<ArgumentHandle> {
        self.arguments
            .declare_with_choices(name, default, description, choices)
    }

    /// Forward declared arguments; fails on the first undeclared name
    pub fn forward<I, S>(
        &self,
        names: I,
        extra: impl IntoIterator<Item = (String, Expr)>,
    ) -> Result<ForwardedArguments>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.arguments.forward(names, extra)
    }

    pub fn add(&mut self, entity: impl Into<Entity>) -> &mut Self {
        self.entities.push(entity.into());
        self
    }

    /// Build the launch graph with default options
    pub fn build(&self, overrides: &LaunchArguments) -> Result<LaunchGraph> {
        self.build_with_options(overrides, &BuildOptions::default())
    }

    pub fn build_with_options(
        &self,
        overrides: &LaunchArguments,
        options: &BuildOptions,
    ) -> Result<LaunchGraph> {
        let base = LaunchContext::new().with_package_prefixes(options.package_prefixes.clone());
        GraphTraverser::build(self, overrides, base, options.merge_policy)
    }
}
