//! Launch context holding resolved configurations
//!
//! A context is produced by the resolve phase of an argument registry. Once
//! the registry has been resolved the configurations are never changed
//! again for that build; only the namespace stack moves while the
//! description is traversed.

use crate::traverser::namespace::join_namespace;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

/// Launch context holding configurations and state
#[derive(Debug, Clone, Default)]
pub struct LaunchContext {
    configurations: IndexMap<String, String>,
    namespace_stack: Vec<String>,
    package_prefixes: Vec<PathBuf>,
}

impl LaunchContext {
    pub fn new() -> Self {
        Self {
            configurations: IndexMap::new(),
            // Descriptors outside every scope live in the empty namespace
            namespace_stack: vec![String::new()],
            package_prefixes: Vec::new(),
        }
    }

    /// Install prefixes searched by `$(find-pkg-share ...)`
    pub fn with_package_prefixes(mut self, prefixes: Vec<PathBuf>) -> Self {
        self.package_prefixes = prefixes;
        self
    }

    /// Start traversal below an existing namespace (used for includes)
    pub fn with_base_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace_stack = vec![namespace.into()];
        self
    }

    pub fn package_prefixes(&self) -> &[PathBuf] {
        &self.package_prefixes
    }

    pub(crate) fn set_configuration(&mut self, name: String, value: String) {
        self.configurations.insert(name, value);
    }

    pub fn get_configuration(&self, name: &str) -> Option<&str> {
        self.configurations.get(name).map(String::as_str)
    }

    /// Resolved configurations in declaration order
    pub fn configurations(&self) -> &IndexMap<String, String> {
        &self.configurations
    }

    /// Push a namespace onto the stack
    ///
    /// Relative namespaces are appended to the current one, absolute ones
    /// replace it. An empty namespace keeps the current one so that every
    /// push can be paired with a pop.
    pub fn push_namespace(&mut self, namespace: &str) {
        let next = join_namespace(&self.current_namespace(), namespace);
        self.namespace_stack.push(next);
    }

    /// Pop a namespace from the stack
    pub fn pop_namespace(&mut self) {
        // Never pop the base namespace
        if self.namespace_stack.len() > 1 {
            self.namespace_stack.pop();
        }
    }

    /// Get the current namespace
    pub fn current_namespace(&self) -> String {
        self.namespace_stack.last().cloned().unwrap_or_default()
    }

    /// Locate `<prefix>/share/<package>` among the configured prefixes
    pub fn find_package_share(&self, package: &str) -> Option<PathBuf> {
        self.package_prefixes
            .iter()
            .map(|prefix| share_dir(prefix, package))
            .find(|path| path.is_dir())
    }
}

fn share_dir(prefix: &Path, package: &str) -> PathBuf {
    prefix.join("share").join(package)
}
