use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Value;

/// Current values of a form, keyed by field id.
///
/// Evaluation works on its own copy; the caller's `FormData` is never
/// modified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData {
    values: BTreeMap<String, Value>,
}

impl FormData {
    /// Create empty form data.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value, builder style.
    #[must_use]
    pub fn set(mut self, field_id: &str, value: impl Into<Value>) -> Self {
        self.insert(field_id, value.into());
        self
    }

    /// Set a field value (mutable reference version).
    pub fn insert(&mut self, field_id: &str, value: Value) {
        self.values.insert(field_id.to_owned(), value);
    }

    /// Remove a field value, returning it if present.
    pub fn remove(&mut self, field_id: &str) -> Option<Value> {
        self.values.remove(field_id)
    }

    #[must_use]
    pub fn get(&self, field_id: &str) -> Option<&Value> {
        self.values.get(field_id)
    }

    #[must_use]
    pub fn contains(&self, field_id: &str) -> bool {
        self.values.contains_key(field_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(field id, value)` pairs in field id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get() {
        let data = FormData::new().set("name", "alice");
        assert_eq!(data.get("name"), Some(&Value::from("alice")));
    }

    #[test]
    fn get_missing_returns_none() {
        let data = FormData::new().set("age", 25_i64);
        assert_eq!(data.get("name"), None);
        assert!(!data.contains("name"));
    }

    #[test]
    fn overwrite_value() {
        let data = FormData::new().set("score", 10_i64).set("score", 20_i64);
        assert_eq!(data.get("score"), Some(&Value::Number(20.0)));
        assert_eq!(data.len(), 1);
    }

    #[test]
    fn remove_value() {
        let mut data = FormData::new().set("x", true);
        assert_eq!(data.remove("x"), Some(Value::Bool(true)));
        assert!(data.is_empty());
        assert_eq!(data.remove("x"), None);
    }

    #[test]
    fn field_ids_are_flat() {
        let data = FormData::new().set("user.age", 30_i64);
        assert_eq!(data.get("user.age"), Some(&Value::Number(30.0)));
        assert_eq!(data.get("user"), None);
    }

    #[test]
    fn collects_from_pairs() {
        let data: FormData = [("a", 1_i64), ("b", 2_i64)].into_iter().collect();
        let ids: Vec<&str> = data.iter().map(|(k, _)| k).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn json_object_round_trip() {
        let data: FormData =
            serde_json::from_str(r#"{"plan":"pro","seats":3,"extras":["a"]}"#).unwrap();
        assert_eq!(data.get("seats"), Some(&Value::Number(3.0)));
        let json = serde_json::to_string(&data).unwrap();
        let back: FormData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, data);
    }
}
