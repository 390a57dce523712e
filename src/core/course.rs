//! Course business logic - ordered grade entries and the two aggregate grades.
//!
//! A course keeps its entries in insertion order; that order is the index basis
//! for removal. Both aggregates share one numerator, the sum of
//! `earned / total * weight` over entries with a positive total:
//!
//! - `current_grade` divides it by the total weight present ("average
//!   performance", as if the remaining weight would score the same);
//! - `earned_percentage` reports it as is ("pure grade", the share of the whole
//!   course grade already secured).
//!
//! Entries with `total_points == 0` add nothing to the numerator, but their weight
//! still counts toward `total_weight`.

use crate::{
    core::{entry::GradeEntry, schema},
    errors::Result,
};
use serde::Serialize;
use serde_json::Value;

const RECORD: &str = "course";

/// A named, ordered list of grade entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Course {
    name: String,
    entries: Vec<GradeEntry>,
}

impl Course {
    /// Creates a course with no entries.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Course name, unique within a gradebook.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[GradeEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the course has no entries yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends an entry at the end of the list.
    pub fn add_entry(&mut self, entry: GradeEntry) {
        self.entries.push(entry);
    }

    /// Removes the entry at `index`, shifting later entries back by one.
    ///
    /// Returns `false` and leaves the list untouched when `index` is out of range.
    #[must_use = "an out-of-range index is reported through the return value"]
    pub fn remove_entry(&mut self, index: usize) -> bool {
        if index < self.entries.len() {
            self.entries.remove(index);
            true
        } else {
            false
        }
    }

    /// Sum of all entry weights, including entries with a zero total.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(GradeEntry::weight).sum()
    }

    /// Sum of `earned / total * weight` over entries with a positive total.
    fn weighted_points(&self) -> f64 {
        self.entries
            .iter()
            .filter(|entry| entry.total_points() > 0.0)
            .map(|entry| (entry.earned_points() / entry.total_points()) * entry.weight())
            .sum()
    }

    /// Weighted average performance over the weight present, in percent.
    ///
    /// Returns 0 for a course without entries or with a total weight of zero.
    #[must_use]
    pub fn current_grade(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }

        let total_weight = self.total_weight();
        if total_weight == 0.0 {
            return 0.0;
        }

        (self.weighted_points() / total_weight) * 100.0
    }

    /// Share of the whole course grade earned so far, in percent.
    #[must_use]
    pub fn earned_percentage(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }

        self.weighted_points()
    }

    /// Decodes a stored course record.
    ///
    /// # Errors
    /// `MissingField` if `name` or `entries` is absent, `InvalidType` for a
    /// wrongly typed key, or whatever [`GradeEntry::from_value`] reports for the
    /// first bad entry.
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = schema::as_object(value, RECORD)?;
        let name = schema::required_str(object, RECORD, "name")?;
        let entries = schema::required_array(object, RECORD, "entries")?
            .iter()
            .map(GradeEntry::from_value)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: name.to_string(),
            entries,
        })
    }
}
