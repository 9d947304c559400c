//! Launch graph data structures
//!
//! A `LaunchGraph` is what the execution engine receives: every value is
//! resolved and every namespace is final.

use crate::params::ParamValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Root of a composed launch graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchGraph {
    pub source: String,
    pub arguments: Vec<ArgumentRecord>,
    pub node: Vec<NodeRecord>,
    pub container: Vec<ContainerRecord>,
    pub include: Vec<IncludeRecord>,
}

impl LaunchGraph {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            arguments: Vec::new(),
            node: Vec::new(),
            container: Vec::new(),
            include: Vec::new(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn argument(&self, name: &str) -> Option<&ArgumentRecord> {
        self.arguments.iter().find(|arg| arg.name == name)
    }

    /// Standalone processes of this graph and every included graph
    pub fn all_nodes(&self) -> Vec<&NodeRecord> {
        let mut nodes: Vec<&NodeRecord> = self.node.iter().collect();
        for include in &self.include {
            nodes.extend(include.graph.all_nodes());
        }
        nodes
    }

    /// Container groups of this graph and every included graph
    pub fn all_containers(&self) -> Vec<&ContainerRecord> {
        let mut containers: Vec<&ContainerRecord> = self.container.iter().collect();
        for include in &self.include {
            containers.extend(include.graph.all_containers());
        }
        containers
    }

    /// Look up a standalone process by its fully qualified name
    pub fn find_node(&self, fully_qualified_name: &str) -> Option<&NodeRecord> {
        self.all_nodes()
            .into_iter()
            .find(|node| node.fully_qualified_name() == fully_qualified_name)
    }
}

/// A declared argument and the value it resolved to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentRecord {
    pub name: String,
    pub description: String,
    pub default: Option<String>,
    pub choices: Option<Vec<String>>,
    pub value: String,
}

/// Standalone process record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub executable: String,
    pub package: String,
    pub name: String,
    pub namespace: String,
    pub params: Vec<(String, ParamValue)>,
    pub params_files: Vec<String>,
    pub remaps: Vec<(String, String)>,
    pub args: Vec<String>,
    pub cmd: Vec<String>,
    pub output: Option<String>,
}

impl NodeRecord {
    pub fn fully_qualified_name(&self) -> String {
        fully_qualified_name(&self.namespace, &self.name)
    }

    pub fn param(&self, key: &str) -> Option<&ParamValue> {
        self.params.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

/// Host process of a container group with the components it loads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerRecord {
    pub name: String,
    pub namespace: String,
    pub package: String,
    pub executable: String,
    pub cmd: Vec<String>,
    pub output: Option<String>,
    pub components: Vec<ComponentRecord>,
}

impl ContainerRecord {
    pub fn fully_qualified_name(&self) -> String {
        fully_qualified_name(&self.namespace, &self.name)
    }
}

/// Component loaded into a container (load_node)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub package: String,
    pub plugin: String,
    pub target_container_name: String,
    pub node_name: String,
    pub namespace: String,
    pub remaps: Vec<(String, String)>,
    pub params: Vec<(String, ParamValue)>,
    pub params_files: Vec<String>,
    pub extra_args: IndexMap<String, ParamValue>,
}

impl ComponentRecord {
    pub fn param(&self, key: &str) -> Option<&ParamValue> {
        self.params.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

/// Included sub-graph and the arguments it was built with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncludeRecord {
    pub source: String,
    pub namespace: String,
    pub launch_arguments: Vec<(String, String)>,
    pub graph: LaunchGraph,
}

/// Join a namespace and a name, `/ns/name` or `/name` in the root
pub fn fully_qualified_name(namespace: &str, name: &str) -> String {
    let namespace = namespace.trim_end_matches('/');
    format!("{}/{}", namespace, name)
}
