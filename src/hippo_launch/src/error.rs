//! Error types for hippo_launch

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Argument '{0}' is already declared in this launch description")]
    DuplicateArgument(String),

    #[error("Argument '{0}' has no default value and was not provided")]
    UnresolvedArgument(String),

    #[error("Argument '{0}' is not declared. Declare it before forwarding it.")]
    UnknownArgument(String),

    #[error("Argument '{name}' got value '{value}', expected one of: {}", choices.join(", "))]
    InvalidChoice {
        name: String,
        value: String,
        choices: Vec<String>,
    },

    #[error("Container '{container}' only accepts composable nodes, got executable '{executable}'")]
    InvalidDescriptorKind {
        container: String,
        executable: String,
    },

    #[error("Parameter '{key}' is defined by more than one parameter source of '{node}'")]
    AmbiguousParameterKey { node: String, key: String },

    #[error("Two entities named '{name}' in namespace '{namespace}'")]
    DuplicateIdentity { name: String, namespace: String },

    #[error("Unknown launch description '{0}'")]
    UnknownLaunch(String),

    #[error("Substitution error: {0}")]
    Substitution(#[from] SubstitutionError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubstitutionError {
    #[error("Undefined variable: '{0}'. Did you forget to declare it as a launch argument?")]
    UndefinedVariable(String),

    #[error(
        "Undefined environment variable: '{0}'. Make sure the variable is set in your environment."
    )]
    UndefinedEnvVar(String),

    #[error("Package '{0}' not found. Ensure the package is installed and sourced.")]
    PackageNotFound(String),

    #[error("Invalid substitution: {0}")]
    InvalidSubstitution(String),
}

pub type Result<T> = std::result::Result<T, GraphError>;
