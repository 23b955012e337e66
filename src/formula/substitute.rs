use winnow::combinator::{alt, delimited};
use winnow::error::ModalResult;
use winnow::prelude::*;
use winnow::token::{take_till, take_while};

use crate::types::{format_number, number_of, Value};

use super::error::FormulaError;

enum Segment<'i> {
    Reference(&'i str),
    Text(&'i str),
}

fn is_reference_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn reference<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    delimited('{', take_while(1.., is_reference_char), '}').parse_next(input)
}

// A `{` that does not open a reference is kept as text and rejected later by
// the character gate.
fn segment<'i>(input: &mut &'i str) -> ModalResult<Segment<'i>> {
    alt((
        reference.map(Segment::Reference),
        take_till(1.., '{').map(Segment::Text),
        "{".map(Segment::Text),
    ))
    .parse_next(input)
}

/// Replace every `{fieldId}` with the field's numeric value. Missing and
/// non-numeric values become `0`.
pub(crate) fn substitute<'v, F>(formula: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<&'v Value>,
{
    let mut input = formula;
    let mut out = String::with_capacity(formula.len());
    while !input.is_empty() {
        match segment.parse_next(&mut input) {
            Ok(Segment::Reference(id)) => {
                let n = number_of(lookup(id));
                let n = if n.is_nan() { 0.0 } else { n };
                out.push_str(&format_number(n));
            }
            Ok(Segment::Text(text)) => out.push_str(text),
            Err(_) => break,
        }
    }
    out
}

/// Field ids referenced by a formula, in order of appearance.
pub(crate) fn references(formula: &str) -> Vec<&str> {
    let mut input = formula;
    let mut refs = Vec::new();
    while !input.is_empty() {
        match segment.parse_next(&mut input) {
            Ok(Segment::Reference(id)) => refs.push(id),
            Ok(Segment::Text(_)) => {}
            Err(_) => break,
        }
    }
    refs
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_digit() || c.is_whitespace() || matches!(c, '+' | '-' | '*' | '/' | '(' | ')' | '.')
}

/// Only digits, whitespace, `.` and `+ - * / ( )` may remain after
/// substitution.
pub(crate) fn check_characters(expr: &str) -> Result<(), FormulaError> {
    if expr.trim().is_empty() {
        return Err(FormulaError::Empty);
    }
    match expr.chars().find(|&c| !is_allowed(c)) {
        Some(c) => Err(FormulaError::DisallowedCharacter(c)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FormData;

    fn sub(formula: &str, data: &FormData) -> String {
        substitute(formula, |id| data.get(id))
    }

    #[test]
    fn replaces_references_with_numbers() {
        let data = FormData::new().set("qty", 3_i64).set("unit-price", "2.5");
        assert_eq!(sub("{qty} * {unit-price}", &data), "3 * 2.5");
    }

    #[test]
    fn missing_and_non_numeric_become_zero() {
        let data = FormData::new().set("name", "bob");
        assert_eq!(sub("{name} + {absent}", &data), "0 + 0");
    }

    #[test]
    fn negative_values_keep_sign() {
        let data = FormData::new().set("delta", -4_i64);
        assert_eq!(sub("10 - {delta}", &data), "10 - -4");
    }

    #[test]
    fn malformed_braces_are_kept() {
        let data = FormData::new();
        assert_eq!(sub("{} + {a b}", &data), "{} + {a b}");
        assert_eq!(sub("1 + {", &data), "1 + {");
    }

    #[test]
    fn infinite_values_render_as_text() {
        let data = FormData::new().set("big", "Infinity");
        assert_eq!(sub("{big}", &data), "Infinity");
    }

    #[test]
    fn lists_references() {
        assert_eq!(references("{a} + {b_2} * {a} - {}"), vec!["a", "b_2", "a"]);
    }

    #[test]
    fn character_gate() {
        assert!(check_characters("1 + (2 * 3) / 4.5 - 6").is_ok());
        assert_eq!(check_characters("   "), Err(FormulaError::Empty));
        assert_eq!(
            check_characters("1; alert(1)"),
            Err(FormulaError::DisallowedCharacter(';'))
        );
        assert_eq!(
            check_characters("Infinity"),
            Err(FormulaError::DisallowedCharacter('I'))
        );
    }
}
