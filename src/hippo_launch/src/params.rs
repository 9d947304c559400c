//! Node parameters
//!
//! A descriptor carries an ordered list of parameter sources: inline maps,
//! forwarded launch arguments and parameter file paths. Sources are
//! concatenated when the graph is built. A key appearing in two sources is
//! rejected unless the build opts into last-write-wins.

use crate::{
    arguments::{ArgumentHandle, ForwardedArguments},
    error::{GraphError, Result, SubstitutionError},
    ir::Expr,
    substitution::LaunchContext,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A resolved, typed parameter value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Integer(i64),
    Double(f64),
    String(String),
    Array(Vec<ParamValue>),
}

impl ParamValue {
    /// Type a resolved substitution the way a YAML parameter would be typed
    pub fn from_resolved(s: &str) -> Self {
        match s {
            "true" | "True" | "TRUE" => return ParamValue::Bool(true),
            "false" | "False" | "FALSE" => return ParamValue::Bool(false),
            _ => {}
        }

        if let Ok(n) = s.parse::<i64>() {
            return ParamValue::Integer(n);
        }

        if let Ok(n) = s.parse::<f64>() {
            if n.is_finite() {
                return ParamValue::Double(n);
            }
        }

        ParamValue::String(s.to_string())
    }

    /// Render as the value part of a `-p key:=value` override
    pub fn to_arg_string(&self) -> String {
        match self {
            ParamValue::Bool(b) => b.to_string(),
            ParamValue::Integer(i) => i.to_string(),
            ParamValue::Double(f) => format!("{:?}", f),
            ParamValue::String(s) => s.clone(),
            ParamValue::Array(items) => format!(
                "[{}]",
                items
                    .iter()
                    .map(|item| match item {
                        ParamValue::String(s) => format!("'{}'", s),
                        other => other.to_arg_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Integer(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Integer(value.into())
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Double(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::String(value)
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        ParamValue::Array(values.into_iter().map(Into::into).collect())
    }
}

/// An unresolved parameter value: either typed already or a substitution
#[derive(Debug, Clone, PartialEq)]
pub enum ParamExpr {
    Value(ParamValue),
    Expr(Expr),
}

impl ParamExpr {
    pub fn resolve(
        &self,
        context: &LaunchContext,
    ) -> std::result::Result<ParamValue, SubstitutionError> {
        match self {
            ParamExpr::Value(value) => Ok(value.clone()),
            ParamExpr::Expr(expr) => Ok(ParamValue::from_resolved(&expr.resolve(context)?)),
        }
    }
}

impl From<Expr> for ParamExpr {
    fn from(expr: Expr) -> Self {
        ParamExpr::Expr(expr)
    }
}

impl From<&ArgumentHandle> for ParamExpr {
    fn from(handle: &ArgumentHandle) -> Self {
        ParamExpr::Expr(handle.to_expr())
    }
}

macro_rules! impl_param_expr_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ParamExpr {
                fn from(value: $ty) -> Self {
                    ParamExpr::Value(value.into())
                }
            }
        )*
    };
}

impl_param_expr_from!(
    ParamValue,
    bool,
    i32,
    i64,
    f64,
    &str,
    String,
    Vec<bool>,
    Vec<i32>,
    Vec<i64>,
    Vec<f64>,
    Vec<&str>,
    Vec<String>,
);

/// An inline parameter mapping, keys kept in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterMap {
    entries: IndexMap<String, ParamExpr>,
}

impl ParameterMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<ParamExpr>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamExpr)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One entry of a descriptor's `parameters` list
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterSource {
    Map(ParameterMap),
    Forwarded(ForwardedArguments),
    /// Path of a parameter file; its contents belong to the launched node
    File(Expr),
}

impl From<ParameterMap> for ParameterSource {
    fn from(map: ParameterMap) -> Self {
        ParameterSource::Map(map)
    }
}

impl From<ForwardedArguments> for ParameterSource {
    fn from(args: ForwardedArguments) -> Self {
        ParameterSource::Forwarded(args)
    }
}

/// What to do when two parameter sources define the same key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergePolicy {
    #[default]
    Reject,
    LastWins,
}

/// Parameters of one descriptor after resolution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedParameters {
    pub params: Vec<(String, ParamValue)>,
    pub params_files: Vec<String>,
}

/// Resolve and concatenate parameter sources in order
pub fn resolve_parameter_sources(
    node: &str,
    sources: &[ParameterSource],
    context: &LaunchContext,
    policy: MergePolicy,
) -> Result<ResolvedParameters> {
    let mut params: IndexMap<String, ParamValue> = IndexMap::new();
    let mut params_files = Vec::new();

    let mut insert = |key: String, value: ParamValue| -> Result<()> {
        if params.contains_key(&key) && policy == MergePolicy::Reject {
            return Err(GraphError::AmbiguousParameterKey {
                node: node.to_string(),
                key,
            });
        }
        params.insert(key, value);
        Ok(())
    };

    for source in sources {
        match source {
            ParameterSource::Map(map) => {
                for (key, value) in map.iter() {
                    insert(key.clone(), value.resolve(context)?)?;
                }
            }
            ParameterSource::Forwarded(forwarded) => {
                for (key, value) in forwarded.resolve(context)? {
                    insert(key, ParamValue::from_resolved(&value))?;
                }
            }
            ParameterSource::File(path) => {
                params_files.push(path.resolve(context)?);
            }
        }
    }

    Ok(ResolvedParameters {
        params: params.into_iter().collect(),
        params_files,
    })
}
