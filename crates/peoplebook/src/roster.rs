//! In-memory operations on the record collection.
//!
//! A [`Roster`] wraps the records loaded from the store and provides the
//! add, search, delete and average-height operations. It never touches the
//! file system; callers save the result back through the store.

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

use crate::error::{Error, Result};
use crate::record::{Gender, Record};

/// Ordered collection of records with name-based operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    records: Vec<Record>,
}

impl Roster {
    /// Wrap an existing collection.
    #[must_use]
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// All records, in order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the roster has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Check if a record with `name` exists, ignoring case.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.records.iter().any(|r| r.has_name(name))
    }

    /// Append a record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateRecord`] if a record with the same name
    /// (ignoring case) exists. The roster is unchanged in that case.
    pub fn add(&mut self, record: Record) -> Result<()> {
        if let Some(name) = record.name().filter(|name| self.contains(name)) {
            return Err(Error::DuplicateRecord {
                name: name.to_string(),
            });
        }
        debug!("Adding record {}", record);
        self.records.push(record);
        Ok(())
    }

    /// Records whose name contains `needle`, ignoring case.
    #[must_use]
    pub fn search(&self, needle: &str) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|r| r.name_contains(needle))
            .collect()
    }

    /// Remove every record named `name`, ignoring case.
    ///
    /// Returns how many records were removed.
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|r| !r.has_name(name));
        let removed = before - self.records.len();
        debug!("Removed {} record(s) named {:?}", removed, name);
        removed
    }

    /// Mean height of records of `gender` that have a height.
    ///
    /// Returns `None` when no record qualifies.
    #[must_use]
    pub fn average_height(&self, gender: Gender) -> Option<AverageHeight> {
        let heights: Vec<f64> = self
            .records
            .iter()
            .filter_map(|r| r.height_for(gender))
            .collect();
        if heights.is_empty() {
            return None;
        }

        #[allow(clippy::cast_precision_loss)]
        let mean = heights.iter().sum::<f64>() / heights.len() as f64;
        Some(AverageHeight {
            gender,
            mean,
            count: heights.len(),
        })
    }
}

/// Result of the average-height aggregate.
///
/// Serializes as a one-entry map from [`AverageHeight::label`] to the mean
/// rounded to two decimal places.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AverageHeight {
    /// The gender that was averaged.
    pub gender: Gender,
    /// Unrounded mean height in centimetres.
    pub mean: f64,
    /// Number of records that contributed.
    pub count: usize,
}

impl AverageHeight {
    /// The mean rounded to two decimal places.
    #[must_use]
    pub fn rounded(&self) -> f64 {
        (self.mean * 100.0).round() / 100.0
    }

    /// Key written to the result file, e.g. `Average male height (cm)`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("Average {} height (cm)", self.gender.adjective())
    }
}

impl Serialize for AverageHeight {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.label(), &self.rounded())?;
        map.end()
    }
}
