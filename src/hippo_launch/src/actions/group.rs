//! Namespace scopes

use crate::{
    description::Entity,
    ir::{Condition, Expr},
};

/// Group of entities whose names resolve under a common prefix
///
/// Scopes nest without a depth limit; the effective namespace of a member
/// is the concatenation of every enclosing prefix, outermost first.
#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceScope {
    pub prefix: Option<Expr>,
    pub members: Vec<Entity>,
    pub enabled: bool,
    pub condition: Option<Condition>,
}

impl NamespaceScope {
    /// Scope without a prefix, used only to gate its members together
    pub fn new(members: Vec<Entity>) -> Self {
        Self {
            prefix: None,
            members,
            enabled: true,
            condition: None,
        }
    }

    /// Wrap `members` so their names resolve under `prefix`
    pub fn push(prefix: impl Into<Expr>, members: Vec<Entity>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            ..Self::new(members)
        }
    }

    pub fn add(&mut self, member: impl Into<Entity>) {
        self.members.push(member.into());
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
