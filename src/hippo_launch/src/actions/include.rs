//! Include action implementation

use crate::{
    arguments::ForwardedArguments,
    description::LaunchDescription,
    ir::Condition,
};
use std::sync::Arc;

/// Inclusion of another launch description
///
/// The description is shared, not copied. It resolves its own arguments
/// from the forwarded list each time the including graph is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Include {
    pub description: Arc<LaunchDescription>,
    pub arguments: ForwardedArguments,
    pub enabled: bool,
    pub condition: Option<Condition>,
}

impl Include {
    pub fn new(description: Arc<LaunchDescription>, arguments: ForwardedArguments) -> Self {
        Self {
            description,
            arguments,
            enabled: true,
            condition: None,
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}
