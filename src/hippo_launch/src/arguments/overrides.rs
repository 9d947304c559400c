//! Externally supplied argument values
//!
//! Values come from `key:=value` command-line pairs, from a YAML file of
//! `name: value` entries, or from an include forwarding its arguments.

use crate::{error::Result, ir::Expr};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

/// Override values keyed by argument name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaunchArguments {
    values: IndexMap<String, Expr>,
}

/// Scalar accepted in an overrides file
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ArgValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl ArgValue {
    fn into_string(self) -> String {
        match self {
            ArgValue::Bool(b) => b.to_string(),
            ArgValue::Int(i) => i.to_string(),
            ArgValue::Float(f) => f.to_string(),
            ArgValue::String(s) => s,
        }
    }
}

impl LaunchArguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Expr>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Expr>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Expr> {
        self.values.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Expr)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Layer `other` on top of `self`; values in `other` win
    pub fn merge(mut self, other: LaunchArguments) -> Self {
        self.values.extend(other.values);
        self
    }

    /// Parse a YAML mapping of argument names to scalar values
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let values: IndexMap<String, ArgValue> = serde_yaml::from_str(content)?;
        Ok(values
            .into_iter()
            .map(|(name, value)| (name, value.into_string()))
            .collect())
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        log::debug!("Loading launch arguments from {}", path.display());
        Self::from_yaml_str(&content)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LaunchArguments {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut args = Self::new();
        for (name, value) in iter {
            // Command-line values are taken verbatim
            args.insert(name, Expr::literal(value));
        }
        args
    }
}

/// Parse a `key:=value` launch argument
pub fn parse_launch_arg(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once(":=") {
        Some((key, value)) if !key.is_empty() && !value.contains(":=") => {
            Ok((key.to_string(), value.to_string()))
        }
        _ => Err(format!("Invalid launch argument format: {}", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_launch_arg() {
        assert_eq!(
            parse_launch_arg("vehicle_name:=bluerov0").unwrap(),
            ("vehicle_name".to_string(), "bluerov0".to_string())
        );
        assert_eq!(
            parse_launch_arg("mixer_path:=").unwrap(),
            ("mixer_path".to_string(), String::new())
        );
        assert!(parse_launch_arg("vehicle_name=bluerov0").is_err());
        assert!(parse_launch_arg(":=bluerov0").is_err());
        assert!(parse_launch_arg("a:=b:=c").is_err());
    }

    #[test]
    fn test_cli_values_are_literal() {
        let args: LaunchArguments = vec![("vehicle_name", "$(var other)")].into_iter().collect();
        assert_eq!(
            args.get("vehicle_name"),
            Some(&Expr::literal("$(var other)"))
        );
    }

    #[test]
    fn test_from_yaml_str() {
        let args = LaunchArguments::from_yaml_str(
            "vehicle_name: bluerov0\nuse_sim_time: false\ndevice_id: 2\nrate: 20.5\n",
        )
        .unwrap();
        assert_eq!(args.len(), 4);
        assert_eq!(args.get("vehicle_name"), Some(&Expr::literal("bluerov0")));
        assert_eq!(args.get("use_sim_time"), Some(&Expr::literal("false")));
        assert_eq!(args.get("device_id"), Some(&Expr::literal("2")));
        assert_eq!(args.get("rate"), Some(&Expr::literal("20.5")));
    }

    #[test]
    fn test_from_yaml_rejects_nested_values() {
        assert!(LaunchArguments::from_yaml_str("vehicle:\n  name: bluerov0\n").is_err());
    }

    #[test]
    fn test_from_yaml_file_and_merge() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"vehicle_name: uuv00\nuse_sim_time: true\n")
            .unwrap();
        let from_file = LaunchArguments::from_yaml_file(file.path()).unwrap();

        let cli: LaunchArguments = vec![("vehicle_name", "bluerov0")].into_iter().collect();
        let merged = from_file.merge(cli);
        assert_eq!(merged.get("vehicle_name"), Some(&Expr::literal("bluerov0")));
        assert_eq!(merged.get("use_sim_time"), Some(&Expr::literal("true")));
    }
}
