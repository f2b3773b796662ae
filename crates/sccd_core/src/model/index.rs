//! Lookup structures derived from fetched content.

use crate::model::record::{object_entry, ContentRecord};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::Formatter;

/// Identifier → record mapping over a list kept in JSON order.
///
/// Records without an id are kept in the list but are not addressable.
/// When ids repeat, the first record wins.
#[derive(Debug, Clone, Default)]
pub struct RecordIndex {
    records: Vec<ContentRecord>,
    positions: HashMap<String, usize>,
}

impl RecordIndex {
    pub fn build(records: Vec<ContentRecord>) -> Self {
        let mut positions = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if let Some(id) = record.id() {
                positions.entry(id).or_insert(position);
            }
        }
        Self { records, positions }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ContentRecord] {
        &self.records
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub fn get(&self, id: &str) -> Option<&ContentRecord> {
        self.position(id).map(|position| &self.records[position])
    }

    /// Record before `id` in list order.
    pub fn previous(&self, id: &str) -> Option<&ContentRecord> {
        let position = self.position(id)?;
        position.checked_sub(1).map(|prev| &self.records[prev])
    }

    /// Record after `id` in list order.
    pub fn next(&self, id: &str) -> Option<&ContentRecord> {
        let position = self.position(id)?;
        self.records.get(position + 1)
    }
}

/// Degree shows keyed by year, listed newest first.
#[derive(Debug, Clone, Default)]
pub struct DegreeShowIndex {
    shows: Vec<(String, ContentRecord)>,
}

impl DegreeShowIndex {
    pub fn new(mut shows: Vec<(String, ContentRecord)>) -> Self {
        shows.sort_by(|(left, _), (right, _)| compare_years_desc(left, right));
        Self { shows }
    }

    pub fn len(&self) -> usize {
        self.shows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shows.is_empty()
    }

    /// Years in listing order (descending).
    pub fn years(&self) -> Vec<&str> {
        self.shows.iter().map(|(year, _)| year.as_str()).collect()
    }

    pub fn get(&self, year: &str) -> Option<&ContentRecord> {
        self.shows
            .iter()
            .find(|(candidate, _)| candidate == year)
            .map(|(_, show)| show)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContentRecord)> {
        self.shows.iter().map(|(year, show)| (year.as_str(), show))
    }

    /// Show listed after `year`, wrapping to the newest.
    pub fn next_after(&self, year: &str) -> Option<(&str, &ContentRecord)> {
        let position = self.shows.iter().position(|(candidate, _)| candidate == year)?;
        let (next_year, show) = &self.shows[(position + 1) % self.shows.len()];
        Some((next_year.as_str(), show))
    }
}

fn compare_years_desc(left: &str, right: &str) -> Ordering {
    match (left.trim().parse::<f64>(), right.trim().parse::<f64>()) {
        (Ok(a), Ok(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => right.cmp(left),
    }
}

impl<'de> Deserialize<'de> for DegreeShowIndex {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ShowsVisitor;

        impl<'de> Visitor<'de> for ShowsVisitor {
            type Value = DegreeShowIndex;

            fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str("an object keyed by year")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut shows = Vec::new();
                while let Some((year, value)) = access.next_entry::<String, Value>()? {
                    if let Some(show) = object_entry::<ContentRecord>(value) {
                        shows.push((year, show));
                    }
                }
                Ok(DegreeShowIndex::new(shows))
            }
        }

        deserializer.deserialize_map(ShowsVisitor)
    }
}
