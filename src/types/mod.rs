mod action;
mod condition;
mod error;
mod evaluation;
mod field;
mod field_index;
mod form_data;
mod rule;
mod value;

pub use action::Action;
pub use condition::{field, Condition, FieldCondition, Logic, Operator};
pub use error::{ValidationError, ValidationReport};
pub use evaluation::{EvaluationResult, Signal};
pub use field::{FieldType, FormField};
pub use field_index::FieldIndex;
pub use form_data::FormData;
pub use rule::{Rule, RuleDraft, RulePatch};
pub use value::{loose_eq, number_of, Value};

pub(crate) use value::{format_number, present};
