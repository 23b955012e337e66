use serde::{Deserialize, Deserializer, Serialize};

use super::action::Action;
use super::condition::Condition;

fn default_active() -> bool {
    true
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A named, prioritized bundle of conditions and actions.
///
/// Rules with a higher `priority` are evaluated first. An empty condition list
/// always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub priority: i64,
}

impl Rule {
    /// Attach an id to a draft.
    #[must_use]
    pub fn from_draft(id: impl Into<String>, draft: RuleDraft) -> Self {
        Self {
            id: id.into(),
            name: draft.name,
            description: draft.description,
            conditions: draft.conditions,
            actions: draft.actions,
            active: draft.active,
            priority: draft.priority,
        }
    }

    /// Overwrite every attribute the patch sets. The id never changes.
    pub fn apply(&mut self, patch: RulePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(conditions) = patch.conditions {
            self.conditions = conditions;
        }
        if let Some(actions) = patch.actions {
            self.actions = actions;
        }
        if let Some(active) = patch.active {
            self.active = active;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
    }
}

/// A rule that has not been assigned an id yet.
///
/// # Example
///
/// ```
/// use formlogic::{Action, RuleDraft, field};
///
/// let draft = RuleDraft::new("Ask for company")
///     .when(field("account_type").equals("business"))
///     .then(Action::show("company"))
///     .then(Action::require("company"))
///     .priority(10);
/// assert_eq!(draft.actions.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub priority: i64,
}

impl RuleDraft {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            description: String::new(),
            conditions: Vec::new(),
            actions: Vec::new(),
            active: true,
            priority: 0,
        }
    }

    #[must_use]
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Append a condition.
    #[must_use]
    pub fn when(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Append an action.
    #[must_use]
    pub fn then(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    #[must_use]
    pub fn priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

/// A partial update for [`Rule::apply`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RulePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<Condition>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<Action>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}
