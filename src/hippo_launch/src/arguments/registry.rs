//! Argument registry
//!
//! The registry is the declare phase: it records names, defaults and
//! descriptions. `resolve_all` is the resolve phase and produces the
//! immutable configurations of one build.

use crate::{
    arguments::{ForwardedArguments, LaunchArguments},
    error::{GraphError, Result},
    ir::Expr,
    substitution::LaunchContext,
};
use indexmap::IndexMap;

/// A declared launch argument
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: String,
    pub default: Option<Expr>,
    pub description: String,
    pub choices: Option<Vec<String>>,
}

/// Handle returned by [`ArgumentRegistry::declare`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArgumentHandle {
    index: usize,
    name: String,
}

impl ArgumentHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Expression referencing this argument, `$(var name)`
    pub fn to_expr(&self) -> Expr {
        Expr::var(self.name.clone())
    }
}

impl From<&ArgumentHandle> for Expr {
    fn from(handle: &ArgumentHandle) -> Self {
        handle.to_expr()
    }
}

/// Ordered set of launch arguments declared by one launch description
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgumentRegistry {
    arguments: IndexMap<String, Argument>,
}

impl ArgumentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an argument. Fails if the name is already declared.
    pub fn declare(
        &mut self,
        name: impl Into<String>,
        default: Option<Expr>,
        description: impl Into<String>,
    ) -> Result<ArgumentHandle> {
        self.insert(Argument {
            name: name.into(),
            default,
            description: description.into(),
            choices: None,
        })
    }

    /// Declare an argument whose resolved value must be one of `choices`
    pub fn declare_with_choices(
        &mut self,
        name: impl Into<String>,
        default: Option<Expr>,
        description: impl Into<String>,
        choices: Vec<String>,
    ) -> Result<ArgumentHandle> {
        self.insert(Argument {
            name: name.into(),
            default,
            description: description.into(),
            choices: Some(choices),
        })
    }

    fn insert(&mut self, argument: Argument) -> Result<ArgumentHandle> {
        if self.arguments.contains_key(&argument.name) {
            return Err(GraphError::DuplicateArgument(argument.name));
        }
        let name = argument.name.clone();
        let (index, _) = self.arguments.insert_full(name.clone(), argument);
        log::debug!("Declared launch argument '{}'", name);
        Ok(ArgumentHandle { index, name })
    }

    pub fn handle(&self, name: &str) -> Option<ArgumentHandle> {
        self.arguments
            .get_index_of(name)
            .map(|index| ArgumentHandle {
                index,
                name: name.to_string(),
            })
    }

    pub fn get(&self, handle: &ArgumentHandle) -> Option<&Argument> {
        self.arguments
            .get_index(handle.index)
            .map(|(_, argument)| argument)
            .filter(|argument| argument.name == handle.name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.arguments.contains_key(name)
    }

    /// Arguments in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Argument> {
        self.arguments.values()
    }

    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    /// Resolve one argument: override, then default, then error.
    ///
    /// Override and default expressions are evaluated against `context`,
    /// which holds the arguments resolved so far.
    pub fn resolve(
        &self,
        handle: &ArgumentHandle,
        overrides: &LaunchArguments,
        context: &LaunchContext,
    ) -> Result<String> {
        let argument = self
            .get(handle)
            .ok_or_else(|| GraphError::UnknownArgument(handle.name.clone()))?;

        let value = match (overrides.get(&argument.name), &argument.default) {
            (Some(value), _) => value.resolve(context)?,
            (None, Some(default)) => default.resolve(context)?,
            (None, None) => return Err(GraphError::UnresolvedArgument(argument.name.clone())),
        };

        if let Some(choices) = &argument.choices {
            if !choices.contains(&value) {
                return Err(GraphError::InvalidChoice {
                    name: argument.name.clone(),
                    value,
                    choices: choices.clone(),
                });
            }
        }

        Ok(value)
    }

    /// Resolve every declared argument in declaration order
    pub fn resolve_all(
        &self,
        overrides: &LaunchArguments,
        base: LaunchContext,
    ) -> Result<LaunchContext> {
        for name in overrides.names() {
            if !self.contains(name) {
                log::warn!("Ignoring value for undeclared launch argument '{}'", name);
            }
        }

        let mut context = base;
        for (index, name) in self.arguments.keys().enumerate() {
            let handle = ArgumentHandle {
                index,
                name: name.clone(),
            };
            let value = self.resolve(&handle, overrides, &context)?;
            log::debug!("Resolved launch argument {}:={}", name, value);
            context.set_configuration(name.clone(), value);
        }
        Ok(context)
    }

    /// Forward declared arguments by reference, plus fixed extras
    ///
    /// Names are ordered by declaration, extras follow in insertion order.
    pub fn forward<I, S>(
        &self,
        names: I,
        extra: impl IntoIterator<Item = (String, Expr)>,
    ) -> Result<ForwardedArguments>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut indices = Vec::new();
        for name in names {
            let name = name.as_ref();
            let index = self
                .arguments
                .get_index_of(name)
                .ok_or_else(|| GraphError::UnknownArgument(name.to_string()))?;
            if !indices.contains(&index) {
                indices.push(index);
            }
        }
        indices.sort_unstable();

        let mut forwarded = ForwardedArguments::new().with(
            indices
                .into_iter()
                .filter_map(|index| self.arguments.get_index(index))
                .map(|(name, _)| name.clone()),
        );
        for (name, value) in extra {
            forwarded = forwarded.with_extra(name, value);
        }
        Ok(forwarded)
    }

    /// Check that every name a forwarded list references is declared here
    pub fn validate_forwarded(&self, forwarded: &ForwardedArguments) -> Result<()> {
        match forwarded.names().iter().find(|name| !self.contains(name)) {
            Some(missing) => Err(GraphError::UnknownArgument(missing.clone())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle_registry() -> ArgumentRegistry {
        let mut registry = ArgumentRegistry::new();
        registry
            .declare("vehicle_name", None, "Vehicle name used as namespace.")
            .unwrap();
        registry
            .declare(
                "use_sim_time",
                Some(Expr::literal("false")),
                "Decide if simulation time is used.",
            )
            .unwrap();
        registry
    }

    #[test]
    fn test_declare_duplicate() {
        let mut registry = vehicle_registry();
        let err = registry
            .declare("vehicle_name", Some(Expr::literal("uuv00")), "again")
            .unwrap_err();
        assert!(matches!(err, GraphError::DuplicateArgument(name) if name == "vehicle_name"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_resolve_default() {
        let registry = vehicle_registry();
        let handle = registry.handle("use_sim_time").unwrap();
        let value = registry
            .resolve(&handle, &LaunchArguments::new(), &LaunchContext::new())
            .unwrap();
        assert_eq!(value, "false");
    }

    #[test]
    fn test_resolve_override_wins() {
        let registry = vehicle_registry();
        let handle = registry.handle("use_sim_time").unwrap();
        let overrides = LaunchArguments::new().with("use_sim_time", "true");
        let value = registry
            .resolve(&handle, &overrides, &LaunchContext::new())
            .unwrap();
        assert_eq!(value, "true");
    }

    #[test]
    fn test_resolve_unresolved() {
        let registry = vehicle_registry();
        let handle = registry.handle("vehicle_name").unwrap();
        let err = registry
            .resolve(&handle, &LaunchArguments::new(), &LaunchContext::new())
            .unwrap_err();
        assert!(matches!(err, GraphError::UnresolvedArgument(name) if name == "vehicle_name"));
    }

    #[test]
    fn test_resolve_all_defaults_see_earlier_arguments() {
        let mut registry = vehicle_registry();
        registry
            .declare(
                "tf_prefix",
                Some(Expr::var("vehicle_name").join("/base_link")),
                "Frame prefix",
            )
            .unwrap();

        let overrides = LaunchArguments::new().with("vehicle_name", "bluerov0");
        let context = registry
            .resolve_all(&overrides, LaunchContext::new())
            .unwrap();
        assert_eq!(context.get_configuration("vehicle_name"), Some("bluerov0"));
        assert_eq!(context.get_configuration("use_sim_time"), Some("false"));
        assert_eq!(
            context.get_configuration("tf_prefix"),
            Some("bluerov0/base_link")
        );
    }

    #[test]
    fn test_resolve_choices() {
        let mut registry = ArgumentRegistry::new();
        registry
            .declare_with_choices(
                "camera",
                Some(Expr::literal("mjpeg")),
                "Camera driver",
                vec!["mjpeg".to_string(), "v4l2".to_string()],
            )
            .unwrap();

        assert!(registry
            .resolve_all(&LaunchArguments::new(), LaunchContext::new())
            .is_ok());

        let err = registry
            .resolve_all(
                &LaunchArguments::new().with("camera", "usb"),
                LaunchContext::new(),
            )
            .unwrap_err();
        assert!(matches!(err, GraphError::InvalidChoice { value, .. } if value == "usb"));
    }

    #[test]
    fn test_handle_from_other_registry() {
        let registry = vehicle_registry();
        let mut other = ArgumentRegistry::new();
        let foreign = other.declare("mixer_path", None, "").unwrap();
        assert!(registry.get(&foreign).is_none());
    }

    #[test]
    fn test_forward_uses_declaration_order() {
        let registry = vehicle_registry();
        let forwarded = registry
            .forward(["use_sim_time", "vehicle_name"], Vec::new())
            .unwrap();
        assert_eq!(forwarded.names(), &["vehicle_name", "use_sim_time"]);
    }

    #[test]
    fn test_forward_extra_after_names() {
        let registry = vehicle_registry();
        let forwarded = registry
            .forward(
                ["vehicle_name"],
                vec![("mixer_path".to_string(), Expr::literal("/tmp/mixer.yaml"))],
            )
            .unwrap();
        let items = forwarded.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], ("vehicle_name".to_string(), Expr::var("vehicle_name")));
        assert_eq!(
            items[1],
            ("mixer_path".to_string(), Expr::literal("/tmp/mixer.yaml"))
        );
    }

    #[test]
    fn test_forward_unknown_name() {
        let registry = vehicle_registry();
        let err = registry
            .forward(["vehicle_name", "mixer_path"], Vec::new())
            .unwrap_err();
        assert!(matches!(err, GraphError::UnknownArgument(name) if name == "mixer_path"));
    }

    #[test]
    fn test_validate_forwarded() {
        let registry = vehicle_registry();
        let ok = ForwardedArguments::new().with(["vehicle_name", "use_sim_time"]);
        assert!(registry.validate_forwarded(&ok).is_ok());

        let missing = ForwardedArguments::new().with(["mixer_path"]);
        assert!(matches!(
            registry.validate_forwarded(&missing),
            Err(GraphError::UnknownArgument(name)) if name == "mixer_path"
        ));
    }
}
