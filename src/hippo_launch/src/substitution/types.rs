//! Substitution types

use crate::error::SubstitutionError;
use crate::substitution::context::LaunchContext;
use std::fmt;

/// Substitution enum representing different types of substitutions
#[derive(Debug, Clone, PartialEq)]
pub enum Substitution {
    /// Plain text (no substitution)
    Text(String),
    /// $(var name) - Launch configuration variable
    LaunchConfiguration(String),
    /// $(env VAR [default]) - Environment variable with optional default
    EnvironmentVariable {
        name: String,
        default: Option<String>,
    },
    /// $(optenv VAR [default]) - Environment variable, empty when unset
    OptionalEnvironmentVariable {
        name: String,
        default: Option<String>,
    },
    /// $(find-pkg-share package_name) - Package share directory
    FindPackageShare(String),
}

impl Substitution {
    /// Resolve substitution to string value
    pub fn resolve(&self, context: &LaunchContext) -> Result<String, SubstitutionError> {
        match self {
            Substitution::Text(s) => Ok(s.clone()),
            Substitution::LaunchConfiguration(name) => context
                .get_configuration(name)
                .map(str::to_string)
                .ok_or_else(|| SubstitutionError::UndefinedVariable(name.clone())),
            Substitution::EnvironmentVariable { name, default } => {
                std::env::var(name).or_else(|_| {
                    default
                        .clone()
                        .ok_or_else(|| SubstitutionError::UndefinedEnvVar(name.clone()))
                })
            }
            Substitution::OptionalEnvironmentVariable { name, default } => Ok(std::env::var(name)
                .ok()
                .or_else(|| default.clone())
                .unwrap_or_default()),
            Substitution::FindPackageShare(package_name) => context
                .find_package_share(package_name)
                .map(|path| path.display().to_string())
                .ok_or_else(|| SubstitutionError::PackageNotFound(package_name.clone())),
        }
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Literal "$(" is written escaped so it does not read as a substitution
            Substitution::Text(s) => write!(f, "{}", s.replace("$(", "$$(")),
            Substitution::LaunchConfiguration(name) => write!(f, "$(var {})", name),
            Substitution::EnvironmentVariable { name, default } => match default {
                Some(default) => write!(f, "$(env {} {})", name, default),
                None => write!(f, "$(env {})", name),
            },
            Substitution::OptionalEnvironmentVariable { name, default } => match default {
                Some(default) => write!(f, "$(optenv {} {})", name, default),
                None => write!(f, "$(optenv {})", name),
            },
            Substitution::FindPackageShare(package) => write!(f, "$(find-pkg-share {})", package),
        }
    }
}

/// Resolve list of substitutions to single string
pub fn resolve_substitutions(
    subs: &[Substitution],
    context: &LaunchContext,
) -> Result<String, SubstitutionError> {
    let mut result = String::new();
    for sub in subs {
        result.push_str(&sub.resolve(context)?);
    }
    Ok(result)
}
