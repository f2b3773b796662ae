//! Grouped content shapes: year groups and category buckets.
//!
//! # Invariants
//! - Group and bucket order is the JSON order; nothing is sorted here.
//! - A numeric `year` is accepted and kept as its decimal text.
//! - Malformed `items` read as an empty group; a bucket that is not an
//!   object is dropped.

use crate::model::record::{lenient_list, lenient_text, object_entry, ContentRecord};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Formatter;

/// `{ year, items }` block used by records and activity pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearGroup {
    #[serde(default, deserialize_with = "lenient_text")]
    pub year: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub items: Vec<ContentRecord>,
}

impl YearGroup {
    pub fn new(year: impl Into<String>, items: Vec<ContentRecord>) -> Self {
        Self {
            year: year.into(),
            items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// One category of a works page: metadata fields plus its projects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryBucket {
    #[serde(default, alias = "projects", deserialize_with = "lenient_list")]
    pub items: Vec<ContentRecord>,
    #[serde(flatten)]
    pub metadata: ContentRecord,
}

/// Metadata fields that can name a category, most specific first.
const LABEL_FIELDS: [&str; 3] = ["label", "titleEn", "title"];

impl CategoryBucket {
    /// Button label for the category; the key when no metadata names it.
    pub fn label(&self, key: &str) -> String {
        LABEL_FIELDS
            .iter()
            .find_map(|field| self.metadata.opt_text(field))
            .unwrap_or_else(|| key.to_string())
    }
}

/// Ordered category key → bucket mapping. The first key is the default
/// visible category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryBuckets {
    buckets: Vec<(String, CategoryBucket)>,
}

impl CategoryBuckets {
    pub fn new(buckets: Vec<(String, CategoryBucket)>) -> Self {
        Self { buckets }
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.buckets.iter().map(|(key, _)| key.as_str()).collect()
    }

    pub fn default_key(&self) -> Option<&str> {
        self.buckets.first().map(|(key, _)| key.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&CategoryBucket> {
        self.buckets
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, bucket)| bucket)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryBucket)> {
        self.buckets
            .iter()
            .map(|(key, bucket)| (key.as_str(), bucket))
    }
}

impl<'de> Deserialize<'de> for CategoryBuckets {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BucketsVisitor;

        impl<'de> Visitor<'de> for BucketsVisitor {
            type Value = CategoryBuckets;

            fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str("an object of category buckets")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut buckets = Vec::new();
                while let Some((key, value)) = access.next_entry::<String, Value>()? {
                    if let Some(bucket) = object_entry::<CategoryBucket>(value) {
                        buckets.push((key, bucket));
                    }
                }
                Ok(CategoryBuckets { buckets })
            }
        }

        deserializer.deserialize_map(BucketsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::{CategoryBuckets, YearGroup};
    use serde_json::json;

    #[test]
    fn bucket_label_prefers_metadata_over_key() {
        let buckets: CategoryBuckets = serde_json::from_value(json!({
            "animation": {"label": "Animation 動畫", "titleEn": "Motion", "items": []},
            "games": {"titleEn": "Games", "items": []},
            "media": {"title": "", "items": []}
        }))
        .expect("buckets should deserialize");
        let labels: Vec<String> = buckets.iter().map(|(key, bucket)| bucket.label(key)).collect();
        assert_eq!(labels, vec!["Animation 動畫", "Games", "media"]);
    }

    #[test]
    fn year_accepts_numbers_and_strings() {
        let groups: Vec<YearGroup> = serde_json::from_value(json!([
            {"year": 2024, "items": [{"title": "a"}]},
            {"year": "2023"},
        ]))
        .expect("groups should deserialize");
        assert_eq!(groups[0].year, "2024");
        assert_eq!(groups[1].year, "2023");
        assert!(groups[1].is_empty());
    }

    #[test]
    fn buckets_keep_json_order_and_split_projects() {
        let buckets: CategoryBuckets = serde_json::from_value(json!({
            "zeta": {"titleHtml": "Z", "projects": [{"title": "p1"}]},
            "alpha": {"titleHtml": "A"}
        }))
        .expect("buckets should deserialize");
        assert_eq!(buckets.keys(), vec!["zeta", "alpha"]);
        assert_eq!(buckets.default_key(), Some("zeta"));
        let zeta = buckets.get("zeta").expect("zeta bucket");
        assert_eq!(zeta.items.len(), 1);
        assert_eq!(zeta.metadata.text("titleHtml"), "Z");
        assert!(!zeta.metadata.contains("projects"));
        assert!(buckets.get("alpha").expect("alpha bucket").items.is_empty());
    }

    #[test]
    fn malformed_items_read_as_empty_groups() {
        let groups: Vec<YearGroup> = serde_json::from_value(json!([
            {"year": 2024, "items": [{"title": "a"}, "noise"]},
            {"year": 2023, "items": null},
            {"year": null, "items": {"title": "not a list"}}
        ]))
        .expect("groups should deserialize");
        assert_eq!(groups[0].items.len(), 1);
        assert!(groups[1].is_empty());
        assert_eq!(groups[2].year, "");
        assert!(groups[2].is_empty());
    }

    #[test]
    fn non_object_buckets_are_dropped() {
        let buckets: CategoryBuckets = serde_json::from_value(json!({
            "alpha": {"titleHtml": "A", "projects": null},
            "broken": null
        }))
        .expect("buckets should deserialize");
        assert_eq!(buckets.keys(), vec!["alpha"]);
        assert!(buckets.get("alpha").expect("alpha bucket").items.is_empty());
    }
}
