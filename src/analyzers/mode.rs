//! Frequency primitive shared by every analyzer.

use std::collections::HashMap;
use std::hash::Hash;

use crate::analyzers::types::Counted;
use crate::error::{BikeshareError, Result};
use crate::record::{Dataset, TripRecord};

/// The most frequent value of a field and the trips carrying it.
#[derive(Debug, Clone)]
pub struct FrequencyResult<V> {
    pub value: V,
    pub rows: Dataset,
}

impl<V> FrequencyResult<V> {
    /// Number of trips sharing the modal value.
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    /// Drops the matching trips, keeping the value and its count.
    pub fn into_counted(self) -> Counted<V> {
        let count = self.count();
        Counted::new(self.value, count)
    }
}

/// Mode of a field that every trip carries.
///
/// Ties go to the value encountered first in the dataset's row order.
///
/// # Errors
///
/// Returns [`BikeshareError::EmptyDataset`] when `dataset` has no trips.
pub fn mode_stats<'a, V, F>(dataset: &'a Dataset, field: F) -> Result<FrequencyResult<V>>
where
    V: Eq + Hash,
    F: Fn(&'a TripRecord) -> V,
{
    mode_stats_by(dataset, |r| Some(field(r)))
}

/// Mode of an optional field; trips where `field` yields `None` are skipped.
///
/// # Errors
///
/// Returns [`BikeshareError::EmptyDataset`] when no trip yields a value.
pub fn mode_stats_by<'a, V, F>(dataset: &'a Dataset, field: F) -> Result<FrequencyResult<V>>
where
    V: Eq + Hash,
    F: Fn(&'a TripRecord) -> Option<V>,
{
    // Row positions ascend, so the first entry of each group marks first sighting.
    let mut groups: HashMap<V, Vec<usize>> = HashMap::new();
    for (idx, record) in dataset.iter_indexed() {
        if let Some(value) = field(record) {
            groups.entry(value).or_default().push(idx);
        }
    }

    let (value, rows) = groups
        .into_iter()
        .max_by(|(_, a), (_, b)| a.len().cmp(&b.len()).then_with(|| b[0].cmp(&a[0])))
        .ok_or(BikeshareError::EmptyDataset)?;

    Ok(FrequencyResult {
        value,
        rows: dataset.with_rows(rows),
    })
}
