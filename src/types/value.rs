use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A form value or rule operand.
///
/// Mirrors the JSON shapes a browser form produces: scalars for single inputs
/// and lists for multi-choice inputs such as checkbox groups.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<Value>),
}

impl Value {
    /// Truthiness as a browser form script sees it.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::List(_) => true,
        }
    }

    /// Numeric coercion. Unparseable input yields `NaN`.
    #[must_use]
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Null => 0.0,
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Number(n) => *n,
            Value::String(s) => parse_number(s),
            Value::List(items) => match items.as_slice() {
                [] => 0.0,
                [only] => parse_number(&only.to_form_string()),
                _ => f64::NAN,
            },
        }
    }

    /// String coercion. Lists join their items with `,`, and null items
    /// inside a list render as the empty string.
    #[must_use]
    pub fn to_form_string(&self) -> String {
        match self {
            Value::Null => "null".to_owned(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => format_number(*n),
            Value::String(s) => s.clone(),
            Value::List(items) => items
                .iter()
                .map(|item| match item {
                    Value::Null => String::new(),
                    other => other.to_form_string(),
                })
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    /// Loose equality between two present values.
    #[must_use]
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Null, _) | (_, Value::Null) => false,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            // Two distinct lists are never loosely equal.
            (Value::List(_), Value::List(_)) => false,
            (Value::Bool(_), _) => Value::Number(self.to_number()).loose_eq(other),
            (_, Value::Bool(_)) => self.loose_eq(&Value::Number(other.to_number())),
            (Value::Number(a), Value::String(_)) => *a == other.to_number(),
            (Value::String(_), Value::Number(b)) => self.to_number() == *b,
            (Value::List(_), _) => Value::String(self.to_form_string()).loose_eq(other),
            (_, Value::List(_)) => self.loose_eq(&Value::String(other.to_form_string())),
        }
    }

    /// Strict equality: same kind and same contents. `NaN` never matches.
    #[must_use]
    pub fn strict_eq(&self, other: &Value) -> bool {
        self == other
    }
}

/// Loose equality where `None` stands for a missing value. Missing and null
/// are equal to each other and to nothing else.
#[must_use]
pub fn loose_eq(a: Option<&Value>, b: Option<&Value>) -> bool {
    match (a, b) {
        (None | Some(Value::Null), None | Some(Value::Null)) => true,
        (None, _) | (_, None) => false,
        (Some(a), Some(b)) => a.loose_eq(b),
    }
}

/// Numeric coercion where a missing value is `NaN`.
#[must_use]
pub fn number_of(value: Option<&Value>) -> f64 {
    value.map_or(f64::NAN, Value::to_number)
}

/// Parses a string the way a form script's `Number(...)` does: surrounding
/// whitespace is ignored and the empty string is zero.
fn parse_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        #[allow(clippy::cast_precision_loss)]
        return u64::from_str_radix(hex, 16).map_or(f64::NAN, |n| n as f64);
    }
    let plain = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !plain {
        return f64::NAN;
    }
    trimmed.parse().unwrap_or(f64::NAN)
}

/// Reads a present operand as `Some`, keeping an explicit `null` as
/// `Some(Value::Null)`. Pair with `#[serde(default)]` so an absent key stays
/// `None`.
pub(crate) fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Formats a number without a trailing `.0` for integral values.
pub(crate) fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_owned()
    } else if n.is_infinite() {
        let s = if n > 0.0 { "Infinity" } else { "-Infinity" };
        s.to_owned()
    } else if n == 0.0 {
        "0".to_owned()
    } else {
        n.to_string()
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<i64> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(v: i64) -> Self {
        Value::Number(v as f64)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(f64::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(v) => write!(f, "\"{v}\""),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            other => write!(f, "{}", other.to_form_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_conversions() {
        assert_eq!(Value::from(42_i64), Value::Number(42.0));
        assert_eq!(Value::from(1.5_f64), Value::Number(1.5));
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from("hi"), Value::String("hi".to_owned()));
        assert_eq!(
            Value::from(vec!["a", "b"]),
            Value::List(vec![Value::from("a"), Value::from("b")])
        );
    }

    #[test]
    fn display() {
        assert_eq!(Value::Number(42.0).to_string(), "42");
        assert_eq!(Value::Number(3.25).to_string(), "3.25");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::from("hello").to_string(), "\"hello\"");
        assert_eq!(Value::from(vec![1_i64, 2]).to_string(), "[1, 2]");
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn number_coercion() {
        assert_eq!(Value::from(" 12 ").to_number(), 12.0);
        assert_eq!(Value::from("").to_number(), 0.0);
        assert_eq!(Value::from("1e3").to_number(), 1000.0);
        assert_eq!(Value::from("0x10").to_number(), 16.0);
        assert_eq!(Value::Bool(true).to_number(), 1.0);
        assert_eq!(Value::Null.to_number(), 0.0);
        assert_eq!(Value::List(vec![]).to_number(), 0.0);
        assert_eq!(Value::from(vec!["7"]).to_number(), 7.0);
        assert!(Value::from("abc").to_number().is_nan());
        assert!(Value::from("inf").to_number().is_nan());
        assert!(Value::from(vec![1_i64, 2]).to_number().is_nan());
        assert!(number_of(None).is_nan());
    }

    #[test]
    fn string_coercion() {
        assert_eq!(Value::Number(-0.0).to_form_string(), "0");
        assert_eq!(Value::Number(0.5).to_form_string(), "0.5");
        assert_eq!(
            Value::List(vec![Value::from("a"), Value::Null, Value::from(3_i64)]).to_form_string(),
            "a,,3"
        );
    }

    #[test]
    fn truthiness() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(!Value::Number(0.0).is_truthy());
        assert!(!Value::Number(f64::NAN).is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(Value::from("0").is_truthy());
        assert!(Value::List(vec![]).is_truthy());
    }

    #[test]
    fn loose_equality() {
        assert!(Value::from("5").loose_eq(&Value::Number(5.0)));
        assert!(Value::Number(1.0).loose_eq(&Value::Bool(true)));
        assert!(!Value::from("true").loose_eq(&Value::Bool(true)));
        assert!(Value::from(vec!["a"]).loose_eq(&Value::from("a")));
        assert!(!Value::from(vec!["a"]).loose_eq(&Value::from(vec!["a"])));
        assert!(!Value::from("").loose_eq(&Value::Null));
        assert!(!Value::Number(f64::NAN).loose_eq(&Value::Number(f64::NAN)));
    }

    #[test]
    fn loose_equality_with_missing() {
        assert!(loose_eq(None, None));
        assert!(loose_eq(None, Some(&Value::Null)));
        assert!(!loose_eq(None, Some(&Value::from(""))));
        assert!(!loose_eq(Some(&Value::Number(0.0)), None));
    }

    #[test]
    fn strict_equality() {
        assert!(Value::from("a").strict_eq(&Value::from("a")));
        assert!(!Value::from("5").strict_eq(&Value::Number(5.0)));
    }

    #[test]
    fn deserializes_json_shapes() {
        let v: Value = serde_json::from_str(r#"[1, "two", true, null]"#).unwrap();
        assert_eq!(
            v,
            Value::List(vec![
                Value::Number(1.0),
                Value::from("two"),
                Value::Bool(true),
                Value::Null,
            ])
        );
    }
}
