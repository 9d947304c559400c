//! Forwarded launch arguments
//!
//! A forwarded list passes arguments by reference: each name becomes a
//! `$(var name)` expression that is only evaluated by the context the list
//! ends up in. The same list is used for include arguments and as a
//! parameter source of a node.

use crate::{
    error::SubstitutionError,
    ir::Expr,
    substitution::LaunchContext,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForwardedArguments {
    names: Vec<String>,
    extra: Vec<(String, Expr)>,
}

impl ForwardedArguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward the given argument names, keeping first occurrence order
    pub fn with<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            if !self.names.contains(&name) {
                self.names.push(name);
            }
        }
        self
    }

    /// Forward `vehicle_name` and `use_sim_time`
    pub fn with_vehicle_name_and_sim_time(self) -> Self {
        self.with(["vehicle_name", "use_sim_time"])
    }

    /// Append a fixed value that is not a declared argument of the sender
    pub fn with_extra(mut self, name: impl Into<String>, value: impl Into<Expr>) -> Self {
        self.extra.push((name.into(), value.into()));
        self
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn extra(&self) -> &[(String, Expr)] {
        &self.extra
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.extra.is_empty()
    }

    /// Forwarded names as references, followed by the extras
    pub fn items(&self) -> Vec<(String, Expr)> {
        self.names
            .iter()
            .map(|name| (name.clone(), Expr::var(name.clone())))
            .chain(self.extra.iter().cloned())
            .collect()
    }

    /// Resolve every item against `context`
    pub fn resolve(
        &self,
        context: &LaunchContext,
    ) -> Result<Vec<(String, String)>, SubstitutionError> {
        self.items()
            .into_iter()
            .map(|(name, value)| Ok((name, value.resolve(context)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_keeps_order_and_dedups() {
        let forwarded = ForwardedArguments::new()
            .with_vehicle_name_and_sim_time()
            .with(["mixer_path", "vehicle_name"]);
        assert_eq!(
            forwarded.names(),
            &["vehicle_name", "use_sim_time", "mixer_path"]
        );
    }

    #[test]
    fn test_items_are_references() {
        let forwarded = ForwardedArguments::new()
            .with(["vehicle_name"])
            .with_extra("device", "/dev/fcu_data");
        assert_eq!(
            forwarded.items(),
            vec![
                ("vehicle_name".to_string(), Expr::var("vehicle_name")),
                ("device".to_string(), Expr::literal("/dev/fcu_data")),
            ]
        );
    }

    #[test]
    fn test_resolve_twice_with_different_contexts() {
        let forwarded = ForwardedArguments::new().with_vehicle_name_and_sim_time();

        let mut first = LaunchContext::new();
        first.set_configuration("vehicle_name".to_string(), "uuv00".to_string());
        first.set_configuration("use_sim_time".to_string(), "true".to_string());

        let mut second = LaunchContext::new();
        second.set_configuration("vehicle_name".to_string(), "bluerov0".to_string());
        second.set_configuration("use_sim_time".to_string(), "false".to_string());

        assert_eq!(
            forwarded.resolve(&first).unwrap(),
            vec![
                ("vehicle_name".to_string(), "uuv00".to_string()),
                ("use_sim_time".to_string(), "true".to_string()),
            ]
        );
        assert_eq!(
            forwarded.resolve(&second).unwrap()[0],
            ("vehicle_name".to_string(), "bluerov0".to_string())
        );
    }

    #[test]
    fn test_resolve_undeclared() {
        let forwarded = ForwardedArguments::new().with(["mixer_path"]);
        assert_eq!(
            forwarded.resolve(&LaunchContext::new()),
            Err(SubstitutionError::UndefinedVariable("mixer_path".to_string()))
        );
    }
}
