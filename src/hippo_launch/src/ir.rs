//! Unresolved launch values
//!
//! Everything a launch description stores before the resolve phase is an
//! `Expr`: a chain of substitutions evaluated against a `LaunchContext`
//! only when a graph is built.

use crate::{
    error::SubstitutionError,
    substitution::{parse_substitutions, resolve_substitutions, LaunchContext, Substitution},
};
use std::fmt;

/// A lazy string expression (unevaluated substitution chain).
/// Evaluate with a `LaunchContext` to resolve to a concrete string.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr(pub Vec<Substitution>);

impl Expr {
    /// Create an `Expr` from a literal string (no substitutions).
    pub fn literal(s: impl Into<String>) -> Self {
        Expr(vec![Substitution::Text(s.into())])
    }

    /// Reference to a launch argument, `$(var name)`.
    pub fn var(name: impl Into<String>) -> Self {
        Expr(vec![Substitution::LaunchConfiguration(name.into())])
    }

    /// Environment variable with an optional fallback, `$(env NAME default)`.
    pub fn env(name: impl Into<String>, default: Option<String>) -> Self {
        Expr(vec![Substitution::EnvironmentVariable {
            name: name.into(),
            default,
        }])
    }

    /// Share directory of an installed package, `$(find-pkg-share pkg)`.
    pub fn find_package_share(package: impl Into<String>) -> Self {
        Expr(vec![Substitution::FindPackageShare(package.into())])
    }

    /// Parse an expression written in launch substitution syntax.
    pub fn parse(input: &str) -> Result<Self, SubstitutionError> {
        parse_substitutions(input).map(Expr)
    }

    /// Append another expression, e.g. a path suffix.
    pub fn join(mut self, other: impl Into<Expr>) -> Self {
        self.0.extend(other.into().0);
        self
    }

    /// Resolve this expression against a `LaunchContext`.
    pub fn resolve(&self, context: &LaunchContext) -> Result<String, SubstitutionError> {
        resolve_substitutions(&self.0, context)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for sub in &self.0 {
            write!(f, "{}", sub)?;
        }
        Ok(())
    }
}

impl From<Vec<Substitution>> for Expr {
    fn from(subs: Vec<Substitution>) -> Self {
        Expr(subs)
    }
}

impl From<&str> for Expr {
    fn from(s: &str) -> Self {
        Expr::literal(s)
    }
}

impl From<String> for Expr {
    fn from(s: String) -> Self {
        Expr::literal(s)
    }
}

/// Condition gating an entity at build time.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Include when the expression evaluates to truthy.
    If(Expr),
    /// Include when the expression evaluates to falsy.
    Unless(Expr),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal() {
        let expr = Expr::literal("front_camera");
        assert_eq!(expr.0, vec![Substitution::Text("front_camera".to_string())]);
        assert_eq!(expr.resolve(&LaunchContext::new()).unwrap(), "front_camera");
    }

    #[test]
    fn test_var_resolves_configuration() {
        let mut context = LaunchContext::new();
        context.set_configuration("vehicle_name".to_string(), "uuv00".to_string());
        let expr = Expr::var("vehicle_name");
        assert_eq!(expr.resolve(&context).unwrap(), "uuv00");
        assert!(Expr::var("missing").resolve(&context).is_err());
    }

    #[test]
    fn test_env_fallback() {
        let expr = Expr::env(
            "HIPPO_LAUNCH_UNSET_TEST_VARIABLE",
            Some("fallback".to_string()),
        );
        assert_eq!(expr.resolve(&LaunchContext::new()).unwrap(), "fallback");
        assert!(Expr::env("HIPPO_LAUNCH_UNSET_TEST_VARIABLE", None)
            .resolve(&LaunchContext::new())
            .is_err());
    }

    #[test]
    fn test_join_and_resolve() {
        let prefix = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(prefix.path().join("share/hippo_control")).unwrap();
        let context = LaunchContext::new().with_package_prefixes(vec![prefix.path().to_path_buf()]);

        let expr = Expr::find_package_share("hippo_control").join("/config/mixer.yaml");
        let expected = prefix.path().join("share/hippo_control/config/mixer.yaml");
        assert_eq!(
            expr.resolve(&context).unwrap(),
            expected.display().to_string()
        );
    }

    #[test]
    fn test_parse() {
        let expr = Expr::parse("/$(var vehicle_name)/odometry").unwrap();
        assert_eq!(expr.0.len(), 3);
        assert_eq!(
            expr.0[1],
            Substitution::LaunchConfiguration("vehicle_name".to_string())
        );
    }
}
