use std::fmt;

use serde::{Deserialize, Serialize};

use super::{present, Value};

/// Comparison operators supported in rule conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    IsEmpty,
    IsNotEmpty,
    IsChecked,
    IsNotChecked,
    GreaterThan,
    LessThan,
    IsOneOf,
    IsNotOneOf,
    /// Any operator name this engine does not recognise. Always false.
    #[serde(other)]
    Unknown,
}

impl Operator {
    /// Whether the operator compares against a condition value.
    #[must_use]
    pub fn takes_value(self) -> bool {
        !matches!(
            self,
            Operator::IsEmpty | Operator::IsNotEmpty | Operator::IsChecked | Operator::IsNotChecked
        )
    }

    /// Whether both sides are coerced to numbers.
    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(self, Operator::GreaterThan | Operator::LessThan)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Equals => "equals",
            Operator::NotEquals => "not_equals",
            Operator::Contains => "contains",
            Operator::NotContains => "not_contains",
            Operator::StartsWith => "starts_with",
            Operator::EndsWith => "ends_with",
            Operator::IsEmpty => "is_empty",
            Operator::IsNotEmpty => "is_not_empty",
            Operator::IsChecked => "is_checked",
            Operator::IsNotChecked => "is_not_checked",
            Operator::GreaterThan => "greater_than",
            Operator::LessThan => "less_than",
            Operator::IsOneOf => "is_one_of",
            Operator::IsNotOneOf => "is_not_one_of",
            Operator::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Joins a condition to the one before it.
///
/// `Or` opens a new AND-group; `And` (or no tag) extends the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Logic {
    And,
    Or,
}

/// A single predicate over one field's current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub field_id: String,
    pub operator: Operator,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logic: Option<Logic>,
}

impl Condition {
    #[must_use]
    pub fn new(field_id: impl Into<String>, operator: Operator, value: Option<Value>) -> Self {
        Self {
            field_id: field_id.into(),
            operator,
            value,
            logic: None,
        }
    }

    /// Tag this condition as the start of a new AND-group.
    #[must_use]
    pub fn or(mut self) -> Self {
        self.logic = Some(Logic::Or);
        self
    }

    /// Tag this condition as joining the current AND-group.
    #[must_use]
    pub fn and(mut self) -> Self {
        self.logic = Some(Logic::And);
        self
    }

    /// Whether this condition opens a new AND-group when it is not first.
    #[must_use]
    pub fn starts_group(&self) -> bool {
        self.logic == Some(Logic::Or)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "({} {} {value})", self.field_id, self.operator),
            None => write!(f, "({} {})", self.field_id, self.operator),
        }
    }
}

/// Intermediate builder for conditions on one field.
/// Created by [`field()`]; an operator method produces the [`Condition`].
#[derive(Debug, Clone)]
pub struct FieldCondition {
    field_id: String,
}

macro_rules! valued_ops {
    ($($(#[$doc:meta])* $name:ident => $op:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            #[must_use]
            pub fn $name(self, value: impl Into<Value>) -> Condition {
                Condition::new(self.field_id, Operator::$op, Some(value.into()))
            }
        )*
    };
}

macro_rules! unary_ops {
    ($($name:ident => $op:ident),* $(,)?) => {
        $(
            #[must_use]
            pub fn $name(self) -> Condition {
                Condition::new(self.field_id, Operator::$op, None)
            }
        )*
    };
}

impl FieldCondition {
    valued_ops! {
        equals => Equals,
        not_equals => NotEquals,
        contains => Contains,
        not_contains => NotContains,
        starts_with => StartsWith,
        ends_with => EndsWith,
        greater_than => GreaterThan,
        less_than => LessThan,
        /// Pass a `Vec` for list membership or a scalar for equality.
        is_one_of => IsOneOf,
        is_not_one_of => IsNotOneOf,
    }

    unary_ops! {
        is_empty => IsEmpty,
        is_not_empty => IsNotEmpty,
        is_checked => IsChecked,
        is_not_checked => IsNotChecked,
    }
}

/// Start a condition on the given field id.
#[must_use]
pub fn field(field_id: &str) -> FieldCondition {
    FieldCondition {
        field_id: field_id.to_owned(),
    }
}
