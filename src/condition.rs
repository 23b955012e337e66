use tracing::trace;

use crate::types::{
    loose_eq, number_of, Condition, FieldIndex, FieldType, FormData, Operator, Value,
};

/// Whether a condition list holds.
///
/// The list reads as an OR of AND-groups: a group starts at the first
/// condition and at every condition tagged `or`, and the list holds when any
/// group has all of its conditions true. An empty list always holds.
pub(crate) fn evaluate_conditions(
    conditions: &[Condition],
    fields: &FieldIndex<'_>,
    data: &FormData,
) -> bool {
    if conditions.is_empty() {
        return true;
    }
    and_groups(conditions).any(|group| {
        group
            .iter()
            .all(|cond| evaluate_condition(cond, fields, data))
    })
}

/// Split a condition list into its AND-groups.
pub(crate) fn and_groups(conditions: &[Condition]) -> impl Iterator<Item = &[Condition]> {
    let mut rest = conditions;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let end = rest
            .iter()
            .skip(1)
            .position(Condition::starts_group)
            .map_or(rest.len(), |pos| pos + 1);
        let (group, tail) = rest.split_at(end);
        rest = tail;
        Some(group)
    })
}

/// Whether a single condition holds against the form data.
pub(crate) fn evaluate_condition(
    cond: &Condition,
    fields: &FieldIndex<'_>,
    data: &FormData,
) -> bool {
    let actual = data.get(&cond.field_id);
    let expected = cond.value.as_ref();
    match cond.operator {
        Operator::Equals => loose_eq(actual, expected),
        Operator::NotEquals => !loose_eq(actual, expected),
        Operator::Contains => contains(fields.field_type(&cond.field_id), actual, expected),
        Operator::NotContains => !contains(fields.field_type(&cond.field_id), actual, expected),
        Operator::StartsWith => lowered(actual).starts_with(&lowered(expected)),
        Operator::EndsWith => lowered(actual).ends_with(&lowered(expected)),
        Operator::IsEmpty => is_empty(actual),
        Operator::IsNotEmpty => !is_empty(actual),
        Operator::IsChecked => is_checked(actual),
        Operator::IsNotChecked => !is_checked(actual),
        Operator::GreaterThan => number_of(actual) > number_of(expected),
        Operator::LessThan => number_of(actual) < number_of(expected),
        Operator::IsOneOf => is_one_of(actual, expected),
        Operator::IsNotOneOf => !is_one_of(actual, expected),
        Operator::Unknown => {
            trace!(field = %cond.field_id, "unknown operator evaluates to false");
            false
        }
    }
}

/// Lowercased string form; missing and null read as the empty string.
fn lowered(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(v) => v.to_form_string().to_lowercase(),
    }
}

fn contains(
    field_type: Option<FieldType>,
    actual: Option<&Value>,
    expected: Option<&Value>,
) -> bool {
    if field_type == Some(FieldType::Checkbox) {
        return match (actual, expected) {
            (Some(Value::List(items)), Some(needle)) => items.iter().any(|i| i.strict_eq(needle)),
            _ => false,
        };
    }
    lowered(actual).contains(&lowered(expected))
}

fn is_empty(value: Option<&Value>) -> bool {
    match value {
        None => true,
        Some(Value::List(items)) => items.is_empty(),
        Some(v) => !v.is_truthy(),
    }
}

fn is_checked(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "true" || s == "on",
        _ => false,
    }
}

fn is_one_of(actual: Option<&Value>, expected: Option<&Value>) -> bool {
    match expected {
        Some(Value::List(options)) => {
            actual.is_some_and(|a| options.iter().any(|option| option.strict_eq(a)))
        }
        scalar => loose_eq(actual, scalar),
    }
}
