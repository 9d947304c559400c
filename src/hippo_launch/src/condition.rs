//! Condition evaluation for enabled flags and if/unless conditions

use crate::{
    error::SubstitutionError,
    ir::Condition,
    substitution::LaunchContext,
};

impl Condition {
    /// Evaluate the condition against resolved configurations
    pub fn evaluate(&self, context: &LaunchContext) -> Result<bool, SubstitutionError> {
        match self {
            Condition::If(expr) => Ok(is_truthy(&expr.resolve(context)?)),
            Condition::Unless(expr) => Ok(!is_truthy(&expr.resolve(context)?)),
        }
    }
}

/// Decide whether an entity takes part in the build
///
/// A disabled entity is skipped without evaluating its condition, so a
/// disabled descriptor may reference arguments that are never declared.
pub fn should_include(
    enabled: bool,
    condition: Option<&Condition>,
    context: &LaunchContext,
) -> Result<bool, SubstitutionError> {
    if !enabled {
        return Ok(false);
    }
    match condition {
        Some(condition) => condition.evaluate(context),
        None => Ok(true),
    }
}

/// Determine if a string value is "truthy"
pub(crate) fn is_truthy(value: &str) -> bool {
    let normalized = value.trim().to_lowercase();
    matches!(
        normalized.as_str(),
        "true" | "1" | "yes" | "y" | "on" | "enabled"
    )
}
