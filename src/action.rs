use tracing::debug;

use crate::formula::{calculate_with_limits, FormulaLimits};
use crate::types::{Action, EvaluationResult, Signal, Value};

/// Apply one action of a fired rule to the in-progress pass.
///
/// Field actions are applied even when the target is not a known field.
/// Field actions without a target are skipped.
pub(crate) fn apply_action(
    rule_id: &str,
    action: &Action,
    state: &mut EvaluationResult,
    limits: &FormulaLimits,
) {
    match action {
        Action::JumpToPage { value } => {
            state.signals.push(Signal::JumpToPage {
                rule_id: rule_id.to_owned(),
                page: value.clone(),
            });
            return;
        }
        Action::SubmitForm => {
            state.signals.push(Signal::SubmitForm {
                rule_id: rule_id.to_owned(),
            });
            return;
        }
        _ => {}
    }

    let Some(target) = action.target() else {
        debug!(rule = rule_id, action = action.kind(), "action has no target field, skipped");
        return;
    };

    match action {
        Action::ShowField { .. } => {
            state.visible_fields.insert(target.to_owned());
        }
        Action::HideField { .. } => {
            state.visible_fields.remove(target);
            state.form_data.remove(target);
            state.field_values.remove(target);
        }
        Action::EnableField { .. } => {
            state.disabled_fields.remove(target);
        }
        Action::DisableField { .. } => {
            state.disabled_fields.insert(target.to_owned());
        }
        Action::RequireField { .. } => {
            state.required_fields.insert(target.to_owned());
        }
        Action::OptionalField { .. } => {
            state.required_fields.remove(target);
        }
        Action::SetValue { value, .. } => {
            write_value(state, target, value.clone().unwrap_or_default());
        }
        Action::CalculateValue { formula, .. } => {
            let Some(formula) = formula.as_deref() else {
                debug!(rule = rule_id, target, "calculate_value has no formula, skipped");
                return;
            };
            let data = &state.form_data;
            let n = calculate_with_limits(formula, limits, |id| data.get(id));
            write_value(state, target, Value::Number(n));
        }
        Action::JumpToPage { .. } | Action::SubmitForm => {}
    }
}

fn write_value(state: &mut EvaluationResult, target: &str, value: Value) {
    state.form_data.insert(target, value.clone());
    state.field_values.insert(target.to_owned(), value);
}
