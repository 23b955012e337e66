//! Conditional rules for dynamic web forms.
//!
//! Given field definitions, rules and the current form values, [`evaluate`]
//! decides which fields are visible, disabled and required, and which
//! computed values are written. Rules run once each, highest priority first,
//! in a single pass. `calculate_value` formulas go through a restricted
//! arithmetic evaluator and never execute code.

mod action;
mod condition;
mod config;
mod engine;
mod error;
mod evaluate;
mod formula;
mod types;
mod validate;

pub use config::EngineConfig;
pub use engine::RuleEngine;
pub use error::{EngineError, ImportError, RuleRejection};
pub use evaluate::{evaluate, evaluate_with_config};
pub use formula::{
    calculate_formula, calculate_with_limits, try_calculate, ArithOp, Formula, FormulaError,
    FormulaLimits,
};
pub use types::{
    field, loose_eq, number_of, Action, Condition, EvaluationResult, FieldCondition, FieldIndex,
    FieldType, FormData, FormField, Logic, Operator, Rule, RuleDraft, RulePatch, Signal,
    ValidationError, ValidationReport, Value,
};
