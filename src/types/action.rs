use std::fmt;

use serde::{Deserialize, Serialize};

use super::{present, Value};

/// A side effect applied when a rule's conditions hold.
///
/// Serialized with an internal `type` tag, e.g.
/// `{"type":"calculate_value","targetFieldId":"total","formula":"{a}+{b}"}`.
/// Targets and formulas are optional on the wire so that incomplete rules can
/// be loaded and reported by validation instead of failing to parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    #[serde(rename_all = "camelCase")]
    ShowField {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target_field_id: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    HideField {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target_field_id: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    EnableField {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target_field_id: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    DisableField {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target_field_id: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    RequireField {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target_field_id: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    OptionalField {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target_field_id: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    SetValue {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target_field_id: Option<String>,
        #[serde(
            default,
            deserialize_with = "present",
            skip_serializing_if = "Option::is_none"
        )]
        value: Option<Value>,
    },
    #[serde(rename_all = "camelCase")]
    CalculateValue {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target_field_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        formula: Option<String>,
    },
    /// Passed through to the UI; `value` names the destination page.
    JumpToPage {
        #[serde(
            default,
            deserialize_with = "present",
            skip_serializing_if = "Option::is_none"
        )]
        value: Option<Value>,
    },
    SubmitForm,
}

impl Action {
    #[must_use]
    pub fn show(target: &str) -> Self {
        Action::ShowField {
            target_field_id: Some(target.to_owned()),
        }
    }

    #[must_use]
    pub fn hide(target: &str) -> Self {
        Action::HideField {
            target_field_id: Some(target.to_owned()),
        }
    }

    #[must_use]
    pub fn enable(target: &str) -> Self {
        Action::EnableField {
            target_field_id: Some(target.to_owned()),
        }
    }

    #[must_use]
    pub fn disable(target: &str) -> Self {
        Action::DisableField {
            target_field_id: Some(target.to_owned()),
        }
    }

    #[must_use]
    pub fn require(target: &str) -> Self {
        Action::RequireField {
            target_field_id: Some(target.to_owned()),
        }
    }

    #[must_use]
    pub fn optional(target: &str) -> Self {
        Action::OptionalField {
            target_field_id: Some(target.to_owned()),
        }
    }

    #[must_use]
    pub fn set_value(target: &str, value: impl Into<Value>) -> Self {
        Action::SetValue {
            target_field_id: Some(target.to_owned()),
            value: Some(value.into()),
        }
    }

    #[must_use]
    pub fn calculate(target: &str, formula: &str) -> Self {
        Action::CalculateValue {
            target_field_id: Some(target.to_owned()),
            formula: Some(formula.to_owned()),
        }
    }

    #[must_use]
    pub fn jump_to_page(page: impl Into<Value>) -> Self {
        Action::JumpToPage {
            value: Some(page.into()),
        }
    }

    #[must_use]
    pub fn submit_form() -> Self {
        Action::SubmitForm
    }

    /// The wire name of this action's type.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Action::ShowField { .. } => "show_field",
            Action::HideField { .. } => "hide_field",
            Action::EnableField { .. } => "enable_field",
            Action::DisableField { .. } => "disable_field",
            Action::RequireField { .. } => "require_field",
            Action::OptionalField { .. } => "optional_field",
            Action::SetValue { .. } => "set_value",
            Action::CalculateValue { .. } => "calculate_value",
            Action::JumpToPage { .. } => "jump_to_page",
            Action::SubmitForm => "submit_form",
        }
    }

    /// Whether this action type operates on a form field.
    #[must_use]
    pub fn targets_field(&self) -> bool {
        !matches!(self, Action::JumpToPage { .. } | Action::SubmitForm)
    }

    /// The target field id, if this is a field action and one is set.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        match self {
            Action::ShowField { target_field_id }
            | Action::HideField { target_field_id }
            | Action::EnableField { target_field_id }
            | Action::DisableField { target_field_id }
            | Action::RequireField { target_field_id }
            | Action::OptionalField { target_field_id }
            | Action::SetValue {
                target_field_id, ..
            }
            | Action::CalculateValue {
                target_field_id, ..
            } => target_field_id.as_deref(),
            Action::JumpToPage { .. } | Action::SubmitForm => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target() {
            Some(target) => write!(f, "{} {target}", self.kind()),
            None => f.write_str(self.kind()),
        }
    }
}
