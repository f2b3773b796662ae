//! Loosely typed content record.
//!
//! # Responsibility
//! - Wrap one JSON object from a content fixture.
//! - Read fields as display text without ever failing.
//!
//! # Invariants
//! - Missing, `null`, object and array fields read as `""` through `text`.
//! - Numbers and booleans read as their JSON text.
//! - Field order is the order of the source JSON.
//! - Content lists skip entries that are not objects; a `null` list is empty.

use log::debug;
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::ops::Deref;

/// One flat content item (admission post, faculty member, course, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentRecord(Map<String, Value>);

impl ContentRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Builds a record from a JSON value; non-objects become empty records.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self(fields),
            _ => Self::default(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Display text of `field`, or `""` when absent or not scalar.
    pub fn text(&self, field: &str) -> String {
        self.get(field).map(scalar_text).unwrap_or_default()
    }

    /// Display text of `field` when it is present and non-empty.
    pub fn opt_text(&self, field: &str) -> Option<String> {
        let value = self.text(field);
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// Deep-link identifier. Records without one cannot be linked.
    pub fn id(&self) -> Option<String> {
        self.opt_text("id")
    }

    /// Scalar entries of an array field, skipping blanks.
    pub fn list(&self, field: &str) -> Vec<String> {
        match self.get(field) {
            Some(Value::Array(values)) => values
                .iter()
                .map(scalar_text)
                .filter(|value| !value.is_empty())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Object entries of an array field as nested records.
    pub fn records(&self, field: &str) -> Vec<ContentRecord> {
        match self.get(field) {
            Some(Value::Array(values)) => values
                .iter()
                .filter_map(|value| value.as_object().cloned().map(ContentRecord))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for ContentRecord {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

/// Top-level JSON array of content entries.
///
/// `null` reads as an empty list and entries of the wrong shape are skipped,
/// so one bad entry never hides the rest. Anything else that is not an array
/// is rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentList<T>(Vec<T>);

impl<T> ContentList<T> {
    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T> Default for ContentList<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> Deref for ContentList<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for ContentList<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
        Ok(Self(values.into_iter().filter_map(object_entry).collect()))
    }
}

/// Decodes one list entry; non-objects and entries that do not fit `T` are
/// dropped with a debug line.
pub(crate) fn object_entry<T: DeserializeOwned>(value: Value) -> Option<T> {
    if !value.is_object() {
        debug!(
            "event=entry_skipped module=model reason=not_an_object kind={}",
            value_kind(&value)
        );
        return None;
    }
    match serde_json::from_value(value) {
        Ok(entry) => Some(entry),
        Err(err) => {
            debug!("event=entry_skipped module=model reason=decode error={}", err);
            None
        }
    }
}

/// `deserialize_with` for nested entry lists: any non-array reads as empty.
pub(crate) fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(values) => Ok(values.into_iter().filter_map(object_entry).collect()),
        _ => Ok(Vec::new()),
    }
}

/// `deserialize_with` for display fields: scalars as text, anything else `""`.
pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_text(&value))
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{ContentList, ContentRecord};
    use serde_json::json;

    fn record(value: serde_json::Value) -> ContentRecord {
        serde_json::from_value(value).expect("record should deserialize")
    }

    #[test]
    fn text_degrades_to_empty_string() {
        let item = record(json!({"title": "Open Day", "date": null, "meta": {"a": 1}}));
        assert_eq!(item.text("title"), "Open Day");
        assert_eq!(item.text("date"), "");
        assert_eq!(item.text("meta"), "");
        assert_eq!(item.text("missing"), "");
        assert_eq!(item.opt_text("missing"), None);
    }

    #[test]
    fn numeric_ids_read_as_text() {
        let item = record(json!({"id": 7}));
        assert_eq!(item.id().as_deref(), Some("7"));
        assert_eq!(record(json!({"id": ""})).id(), None);
    }

    #[test]
    fn list_and_records_skip_wrong_shapes() {
        let item = record(json!({
            "images": ["a.jpg", "", 3, null],
            "sections": [{"titleEn": "Bio"}, "noise"]
        }));
        assert_eq!(item.list("images"), vec!["a.jpg", "3"]);
        let sections = item.records("sections");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].text("titleEn"), "Bio");
        assert!(item.records("images").is_empty());
    }

    #[test]
    fn content_list_skips_entries_that_are_not_objects() {
        let list: ContentList<ContentRecord> =
            serde_json::from_value(json!([{"title": "a"}, "noise", null, 4, {"title": "b"}]))
                .expect("list should deserialize");
        let titles: Vec<String> = list.iter().map(|item| item.text("title")).collect();
        assert_eq!(titles, vec!["a", "b"]);
    }

    #[test]
    fn content_list_reads_null_as_empty_but_rejects_objects() {
        let empty: ContentList<ContentRecord> =
            serde_json::from_value(json!(null)).expect("null list");
        assert!(empty.is_empty());
        assert!(serde_json::from_value::<ContentList<ContentRecord>>(json!({"a": 1})).is_err());
    }
}
