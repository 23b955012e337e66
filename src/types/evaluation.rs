use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::form_data::FormData;
use super::Value;

/// A UI-level action that fired during a pass. The engine does not act on
/// these; it only reports them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Signal {
    #[serde(rename_all = "camelCase")]
    JumpToPage {
        rule_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        page: Option<Value>,
    },
    #[serde(rename_all = "camelCase")]
    SubmitForm { rule_id: String },
}

/// Outcome of one evaluation pass.
///
/// Sets and maps are ordered so that equal inputs serialize identically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[must_use]
pub struct EvaluationResult {
    pub(crate) visible_fields: BTreeSet<String>,
    pub(crate) disabled_fields: BTreeSet<String>,
    pub(crate) required_fields: BTreeSet<String>,
    pub(crate) field_values: BTreeMap<String, Value>,
    pub(crate) signals: Vec<Signal>,
    pub(crate) fired_rules: Vec<String>,
    pub(crate) form_data: FormData,
}

impl EvaluationResult {
    #[must_use]
    pub fn visible_fields(&self) -> &BTreeSet<String> {
        &self.visible_fields
    }

    #[must_use]
    pub fn disabled_fields(&self) -> &BTreeSet<String> {
        &self.disabled_fields
    }

    #[must_use]
    pub fn required_fields(&self) -> &BTreeSet<String> {
        &self.required_fields
    }

    /// Values written by `set_value` and `calculate_value` actions.
    #[must_use]
    pub fn field_values(&self) -> &BTreeMap<String, Value> {
        &self.field_values
    }

    /// Page jumps and submit requests, in the order they fired.
    #[must_use]
    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    /// Ids of rules whose conditions held, in evaluation order.
    #[must_use]
    pub fn fired_rules(&self) -> &[String] {
        &self.fired_rules
    }

    /// Form data as it stood at the end of the pass: written values applied,
    /// hidden fields removed.
    #[must_use]
    pub fn form_data(&self) -> &FormData {
        &self.form_data
    }

    #[must_use]
    pub fn is_visible(&self, field_id: &str) -> bool {
        self.visible_fields.contains(field_id)
    }

    #[must_use]
    pub fn is_disabled(&self, field_id: &str) -> bool {
        self.disabled_fields.contains(field_id)
    }

    #[must_use]
    pub fn is_required(&self, field_id: &str) -> bool {
        self.required_fields.contains(field_id)
    }

    #[must_use]
    pub fn value(&self, field_id: &str) -> Option<&Value> {
        self.field_values.get(field_id)
    }
}

impl fmt::Display for EvaluationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |set: &BTreeSet<String>| set.iter().cloned().collect::<Vec<_>>().join(", ");
        write!(f, "visible: [{}]", join(&self.visible_fields))?;
        write!(f, ", disabled: [{}]", join(&self.disabled_fields))?;
        write!(f, ", required: [{}]", join(&self.required_fields))?;
        write!(f, ", fired: [{}]", self.fired_rules.join(", "))
    }
}
