use thiserror::Error;

/// Why a formula could not produce a number.
///
/// [`calculate_formula`](super::calculate_formula) maps every variant to `0`;
/// [`try_calculate`](super::try_calculate) exposes them for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    #[error("formula is empty")]
    Empty,

    #[error("formula contains disallowed character {0:?}")]
    DisallowedCharacter(char),

    #[error("formula is {len} characters long; the limit is {max}")]
    TooLong { len: usize, max: usize },

    #[error("formula nests parentheses {depth} deep; the limit is {max}")]
    TooDeep { depth: usize, max: usize },

    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("result is not a finite number")]
    NonFinite,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disallowed_character_message() {
        assert_eq!(
            FormulaError::DisallowedCharacter('a').to_string(),
            "formula contains disallowed character 'a'"
        );
    }

    #[test]
    fn limit_messages() {
        assert_eq!(
            FormulaError::TooLong { len: 10, max: 5 }.to_string(),
            "formula is 10 characters long; the limit is 5"
        );
        assert_eq!(
            FormulaError::TooDeep { depth: 9, max: 8 }.to_string(),
            "formula nests parentheses 9 deep; the limit is 8"
        );
    }
}
