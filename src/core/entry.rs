//! A single graded item.
//!
//! Entries carry raw points and a weight; the percentage is always derived and is
//! never stored. No range checks happen here: bonus points, zero totals and odd
//! weights are all representable, and rejecting them is up to the caller.

use crate::{core::schema, errors::Result};
use serde::Serialize;
use serde_json::Value;

const RECORD: &str = "grade entry";

/// One graded item of a course, e.g. a homework or an exam.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeEntry {
    description: String,
    earned_points: f64,
    total_points: f64,
    weight: f64,
}

impl GradeEntry {
    /// Builds an entry from raw values without validating them.
    pub fn new(
        description: impl Into<String>,
        earned_points: f64,
        total_points: f64,
        weight: f64,
    ) -> Self {
        Self {
            description: description.into(),
            earned_points,
            total_points,
            weight,
        }
    }

    /// Label shown for this entry.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Points scored.
    #[must_use]
    pub const fn earned_points(&self) -> f64 {
        self.earned_points
    }

    /// Points available.
    #[must_use]
    pub const fn total_points(&self) -> f64 {
        self.total_points
    }

    /// Share of the course grade this entry is worth, in percentage points.
    #[must_use]
    pub const fn weight(&self) -> f64 {
        self.weight
    }

    /// Score as a percentage of the available points.
    ///
    /// Returns 0 when `total_points` is zero. Values below 0 or above 100 are
    /// passed through unchanged.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        if self.total_points == 0.0 {
            return 0.0;
        }

        (self.earned_points / self.total_points) * 100.0
    }

    /// First numeric field holding NaN or an infinity, if any.
    #[must_use]
    pub fn non_finite_field(&self) -> Option<&'static str> {
        [
            ("earned_points", self.earned_points),
            ("total_points", self.total_points),
            ("weight", self.weight),
        ]
        .into_iter()
        .find(|(_, value)| !value.is_finite())
        .map(|(field, _)| field)
    }

    /// Decodes a stored entry record.
    ///
    /// # Errors
    /// `MissingField` if any of the four keys is absent, `InvalidType` if the
    /// record is not an object or a key holds the wrong JSON type.
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = schema::as_object(value, RECORD)?;

        Ok(Self {
            description: schema::required_str(object, RECORD, "description")?.to_string(),
            earned_points: schema::required_number(object, RECORD, "earned_points")?,
            total_points: schema::required_number(object, RECORD, "total_points")?,
            weight: schema::required_number(object, RECORD, "weight")?,
        })
    }
}
