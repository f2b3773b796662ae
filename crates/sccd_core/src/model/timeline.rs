//! About-page timeline data.

use crate::model::record::{lenient_list, lenient_text, ContentRecord};
use serde::{Deserialize, Serialize};

/// One era with its years, as stored in `timeline.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineEra {
    #[serde(default, deserialize_with = "lenient_text")]
    pub era: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub label: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub years: Vec<ContentRecord>,
}

/// One year of the flattened timeline, carrying its era labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    pub year: String,
    pub image: String,
    pub description: String,
    pub era_title: String,
    pub era_label: String,
}

impl TimelineEntry {
    /// Heading shown above the year list, e.g. `Founding Era 創立時期`.
    pub fn era_heading(&self) -> String {
        format!("{} Era {}時期", self.era_title, self.era_label)
    }
}

/// Flattens eras into one list, keeping era order then year order.
pub fn flatten_timeline(eras: &[TimelineEra]) -> Vec<TimelineEntry> {
    eras.iter()
        .flat_map(|era| {
            era.years.iter().map(move |year| TimelineEntry {
                year: year.text("year"),
                image: year.text("image"),
                description: year.text("description"),
                era_title: era.era.clone(),
                era_label: era.label.clone(),
            })
        })
        .collect()
}
