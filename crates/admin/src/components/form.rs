//! Form helpers: submitted field access and per-field error messages.

use std::collections::BTreeMap;

/// Validation messages keyed by form field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    messages: BTreeMap<&'static str, String>,
}

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field`. The first message per field wins.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.messages.entry(field).or_insert_with(|| message.into());
    }

    /// Message for `field`, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.messages.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.messages.contains_key(field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Fold another set of errors into this one.
    pub fn merge(&mut self, other: Self) {
        for (field, message) in other.messages {
            self.add(field, message);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.messages.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// Raw urlencoded pairs, allowing repeated keys.
#[derive(Debug, Clone, Default)]
pub struct FormPairs(pub Vec<(String, String)>);

impl FormPairs {
    /// First value for `key`.
    #[must_use]
    pub fn first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First value for `key`, or empty.
    #[must_use]
    pub fn text(&self, key: &str) -> String {
        self.first(key).unwrap_or_default().to_owned()
    }

    /// Every value for `key` (or `key[]`), in submission order.
    #[must_use]
    pub fn all(&self, key: &str) -> Vec<&str> {
        let bracketed = format!("{key}[]");
        self.0
            .iter()
            .filter(|(k, _)| *k == key || *k == bracketed)
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_first_message_wins() {
        let mut errors = FieldErrors::new();
        assert!(errors.is_empty());
        errors.add("name", "first");
        errors.add("name", "second");
        assert_eq!(errors.get("name"), Some("first"));
        assert!(errors.has("name"));
        assert!(!errors.has("price"));
    }

    #[test]
    fn test_field_errors_merge() {
        let mut a = FieldErrors::new();
        a.add("name", "taken");
        let mut b = FieldErrors::new();
        b.add("name", "other");
        b.add("price", "bad");
        a.merge(b);
        assert_eq!(a.get("name"), Some("taken"));
        assert_eq!(a.get("price"), Some("bad"));
        assert_eq!(a.iter().count(), 2);
    }

    #[test]
    fn test_form_pairs_repeated_keys() {
        let pairs = FormPairs(vec![
            ("name".into(), "Mug".into()),
            ("tags".into(), "1".into()),
            ("tags[]".into(), "3".into()),
        ]);
        assert_eq!(pairs.first("name"), Some("Mug"));
        assert_eq!(pairs.text("missing"), "");
        assert_eq!(pairs.all("tags"), vec!["1", "3"]);
    }
}
