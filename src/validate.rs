use crate::formula::{check_syntax, references, FormulaLimits};
use crate::types::{
    Action, Condition, FieldIndex, Operator, Rule, ValidationError, Value,
};

/// Every structural problem with a rule, in rule order.
pub(crate) fn validate(
    rule: &Rule,
    fields: &FieldIndex<'_>,
    limits: &FormulaLimits,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if rule.name.trim().is_empty() {
        errors.push(ValidationError::MissingName);
    }
    if rule.conditions.is_empty() {
        errors.push(ValidationError::NoConditions);
    }
    for (i, cond) in rule.conditions.iter().enumerate() {
        check_condition(i + 1, cond, fields, &mut errors);
    }
    for (i, action) in rule.actions.iter().enumerate() {
        check_action(i + 1, action, fields, limits, &mut errors);
    }

    errors
}

fn check_condition(
    index: usize,
    cond: &Condition,
    fields: &FieldIndex<'_>,
    errors: &mut Vec<ValidationError>,
) {
    if !fields.contains(&cond.field_id) {
        errors.push(ValidationError::UnknownConditionField {
            index,
            field: cond.field_id.clone(),
        });
    }

    let operator = cond.operator;
    if operator == Operator::Unknown {
        errors.push(ValidationError::UnsupportedOperator { index });
        return;
    }
    if !operator.takes_value() {
        return;
    }
    match cond.value.as_ref() {
        None | Some(Value::Null) => {
            errors.push(ValidationError::MissingConditionValue { index, operator });
        }
        Some(Value::String(s)) if s.is_empty() => {
            errors.push(ValidationError::MissingConditionValue { index, operator });
        }
        Some(value) if operator.is_numeric() && value.to_number().is_nan() => {
            errors.push(ValidationError::NonNumericValue { index, operator });
        }
        Some(_) => {}
    }
}

fn check_action(
    index: usize,
    action: &Action,
    fields: &FieldIndex<'_>,
    limits: &FormulaLimits,
    errors: &mut Vec<ValidationError>,
) {
    if !action.targets_field() {
        return;
    }
    match action.target() {
        None => errors.push(ValidationError::MissingTarget {
            index,
            action: action.kind(),
        }),
        Some(target) if !fields.contains(target) => errors.push(ValidationError::UnknownTarget {
            index,
            action: action.kind(),
            field: target.to_owned(),
        }),
        Some(_) => {}
    }

    let Action::CalculateValue { formula, .. } = action else {
        return;
    };
    let formula = match formula.as_deref() {
        Some(f) if !f.trim().is_empty() => f,
        _ => {
            errors.push(ValidationError::MissingFormula { index });
            return;
        }
    };
    if let Err(err) = check_syntax(formula, limits) {
        errors.push(ValidationError::InvalidFormula {
            index,
            reason: err.to_string(),
        });
    }
    let mut seen: Vec<&str> = Vec::new();
    for field in references(formula) {
        if !fields.contains(field) && !seen.contains(&field) {
            seen.push(field);
            errors.push(ValidationError::UnknownFormulaField {
                index,
                field: field.to_owned(),
            });
        }
    }
}
