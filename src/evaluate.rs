use tracing::trace;

use crate::action::apply_action;
use crate::condition::evaluate_conditions;
use crate::formula::FormulaLimits;
use crate::types::{EvaluationResult, FieldIndex, FormData, FormField, Rule};

/// Run one evaluation pass with the default formula limits.
///
/// Active rules are applied in descending priority, ties in input order. The
/// pass is single: conditions see values written by rules applied before
/// them and never those written after. When two rules act on the same field
/// the one applied later wins.
///
/// # Example
///
/// ```
/// use formlogic::{evaluate, field, Action, FieldType, FormData, FormField, Rule, RuleDraft};
///
/// let fields = vec![
///     FormField::new("account_type", FieldType::Select),
///     FormField::new("company", FieldType::Text),
/// ];
/// let rules = vec![Rule::from_draft(
///     "r1",
///     RuleDraft::new("Hide company for personal accounts")
///         .when(field("account_type").equals("personal"))
///         .then(Action::hide("company")),
/// )];
///
/// let result = evaluate(&fields, &rules, &FormData::new().set("account_type", "personal"));
/// assert!(!result.is_visible("company"));
/// ```
pub fn evaluate(fields: &[FormField], rules: &[Rule], data: &FormData) -> EvaluationResult {
    evaluate_with_config(fields, rules, data, &FormulaLimits::default())
}

/// [`evaluate`] with explicit formula limits.
pub fn evaluate_with_config(
    fields: &[FormField],
    rules: &[Rule],
    data: &FormData,
    limits: &FormulaLimits,
) -> EvaluationResult {
    let index = FieldIndex::new(fields);
    let mut state = EvaluationResult {
        visible_fields: fields.iter().map(|f| f.id.clone()).collect(),
        required_fields: fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.id.clone())
            .collect(),
        form_data: data.clone(),
        ..EvaluationResult::default()
    };

    for rule in ordered(rules) {
        if !evaluate_conditions(&rule.conditions, &index, &state.form_data) {
            continue;
        }
        trace!(rule = %rule.id, name = %rule.name, priority = rule.priority, "rule fired");
        state.fired_rules.push(rule.id.clone());
        for action in &rule.actions {
            apply_action(&rule.id, action, &mut state, limits);
        }
    }

    state
}

/// Active rules, stable-sorted by descending priority.
fn ordered(rules: &[Rule]) -> Vec<&Rule> {
    let mut active: Vec<&Rule> = rules.iter().filter(|r| r.active).collect();
    active.sort_by(|a, b| b.priority.cmp(&a.priority));
    active
}

/// Stable-sort a rule set in place by descending priority.
pub(crate) fn sort_rules(rules: &mut [Rule]) {
    rules.sort_by(|a, b| b.priority.cmp(&a.priority));
}
