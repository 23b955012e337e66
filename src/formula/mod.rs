//! Restricted arithmetic for `calculate_value` actions.
//!
//! A formula such as `{qty} * {unit_price} + 5` is evaluated in three steps:
//!
//! 1. every `{fieldId}` reference is replaced by the field's numeric value
//!    (missing or non-numeric values count as `0`);
//! 2. the result may only contain digits, whitespace, `.` and `+ - * / ( )`;
//! 3. the remaining text is parsed into a [`Formula`] tree and interpreted.
//!
//! Nothing is ever executed beyond that tree. Any failure, including division
//! by zero and non-finite results, makes the whole formula evaluate to `0`.

mod ast;
mod error;
mod grammar;
mod substitute;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use ast::{ArithOp, Formula};
pub use error::FormulaError;

pub(crate) use substitute::references;

use crate::types::Value;

/// Size limits applied to a formula after substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormulaLimits {
    /// Maximum length in characters.
    pub max_length: usize,
    /// Maximum parenthesis nesting depth.
    pub max_depth: usize,
}

impl Default for FormulaLimits {
    fn default() -> Self {
        Self {
            max_length: 4096,
            max_depth: 64,
        }
    }
}

impl Formula {
    /// Parse an already-substituted arithmetic expression.
    ///
    /// # Errors
    ///
    /// Returns [`FormulaError`] if the text contains anything other than
    /// numbers, whitespace, `+ - * / ( )`, breaks a limit, or is not a
    /// well-formed expression.
    pub fn parse(src: &str) -> Result<Self, FormulaError> {
        Self::parse_with_limits(src, &FormulaLimits::default())
    }

    /// [`Formula::parse`] with explicit limits.
    ///
    /// # Errors
    ///
    /// See [`Formula::parse`].
    pub fn parse_with_limits(src: &str, limits: &FormulaLimits) -> Result<Self, FormulaError> {
        use winnow::Parser;
        substitute::check_characters(src)?;
        let len = src.chars().count();
        if len > limits.max_length {
            return Err(FormulaError::TooLong {
                len,
                max: limits.max_length,
            });
        }
        let depth = nesting_depth(src);
        if depth > limits.max_depth {
            return Err(FormulaError::TooDeep {
                depth,
                max: limits.max_depth,
            });
        }
        grammar::formula
            .parse(src)
            .map_err(|e| FormulaError::Syntax(e.to_string()))
    }
}

fn nesting_depth(src: &str) -> usize {
    let mut depth = 0_usize;
    let mut max = 0_usize;
    for c in src.chars() {
        match c {
            '(' => {
                depth += 1;
                max = max.max(depth);
            }
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max
}

/// Substitute field references, then parse and evaluate.
///
/// # Errors
///
/// Returns the [`FormulaError`] that made the formula fail.
pub fn try_calculate<'v, F>(
    formula: &str,
    limits: &FormulaLimits,
    lookup: F,
) -> Result<f64, FormulaError>
where
    F: Fn(&str) -> Option<&'v Value>,
{
    let expr = substitute::substitute(formula, lookup);
    let n = Formula::parse_with_limits(&expr, limits)?.eval()?;
    // Normalizes -0 to 0.
    Ok(n + 0.0)
}

/// Evaluate a formula against field values with the default limits.
/// Always returns a finite number; failures yield `0`.
///
/// # Example
///
/// ```
/// use formlogic::{FormData, calculate_formula};
///
/// let data = FormData::new().set("qty", 3_i64).set("price", "2.5");
/// assert_eq!(calculate_formula("{qty} * {price}", |id| data.get(id)), 7.5);
/// assert_eq!(calculate_formula("{qty} / 0", |id| data.get(id)), 0.0);
/// ```
pub fn calculate_formula<'v, F>(formula: &str, lookup: F) -> f64
where
    F: Fn(&str) -> Option<&'v Value>,
{
    calculate_with_limits(formula, &FormulaLimits::default(), lookup)
}

/// [`calculate_formula`] with explicit limits.
pub fn calculate_with_limits<'v, F>(formula: &str, limits: &FormulaLimits, lookup: F) -> f64
where
    F: Fn(&str) -> Option<&'v Value>,
{
    match try_calculate(formula, limits, lookup) {
        Ok(n) => n,
        Err(err) => {
            debug!(formula, error = %err, "formula failed closed");
            0.0
        }
    }
}

/// Check that a formula parses once every reference is replaced by `1`.
/// Used by rule validation, which has no form values to work with.
pub(crate) fn check_syntax(formula: &str, limits: &FormulaLimits) -> Result<(), FormulaError> {
    let one = Value::Number(1.0);
    let expr = substitute::substitute(formula, |_| Some(&one));
    Formula::parse_with_limits(&expr, limits).map(|_| ())
}
