use thiserror::Error;

use super::condition::Operator;

/// One structural problem with a rule. Positions are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("rule name must not be empty")]
    MissingName,

    #[error("rule must have at least one condition")]
    NoConditions,

    #[error("condition {index} references unknown field '{field}'")]
    UnknownConditionField { index: usize, field: String },

    #[error("condition {index} uses an unsupported operator")]
    UnsupportedOperator { index: usize },

    #[error("condition {index} ({operator}) requires a value")]
    MissingConditionValue { index: usize, operator: Operator },

    #[error("condition {index} ({operator}) requires a numeric value")]
    NonNumericValue { index: usize, operator: Operator },

    #[error("action {index} ({action}) is missing a target field")]
    MissingTarget { index: usize, action: &'static str },

    #[error("action {index} ({action}) targets unknown field '{field}'")]
    UnknownTarget {
        index: usize,
        action: &'static str,
        field: String,
    },

    #[error("action {index} (calculate_value) is missing a formula")]
    MissingFormula { index: usize },

    #[error("action {index} (calculate_value) has an invalid formula: {reason}")]
    InvalidFormula { index: usize, reason: String },

    #[error("action {index} (calculate_value) formula references unknown field '{field}'")]
    UnknownFormulaField { index: usize, field: String },

    #[error("duplicate rule id '{id}'")]
    DuplicateRuleId { id: String },

    #[error("rule could not be read: {reason}")]
    Malformed { reason: String },
}

/// Aggregated result of validating one rule.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub(crate) fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// The human-readable form of every error.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}
