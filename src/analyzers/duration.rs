use crate::analyzers::format::{duration_parts, format_duration};
use crate::analyzers::types::DurationStats;
use crate::analyzers::utility::{mean, total};
use crate::error::{BikeshareError, Result};
use crate::record::Dataset;

/// Total and mean trip duration, split into calendar components.
#[tracing::instrument(skip_all, fields(rows = dataset.len()))]
pub fn duration_stats(dataset: &Dataset) -> Result<DurationStats> {
    if dataset.is_empty() {
        return Err(BikeshareError::EmptyDataset);
    }

    let durations: Vec<f64> = dataset.iter().map(|r| r.trip_duration).collect();
    let total_seconds = total(&durations);
    let mean_seconds = mean(&durations);

    let total_parts = duration_parts(total_seconds);
    let mean_parts = duration_parts(mean_seconds);

    Ok(DurationStats {
        total_seconds,
        mean_seconds,
        total: total_parts,
        mean: mean_parts,
        total_text: format_duration(total_parts),
        mean_text: format_duration(mean_parts),
    })
}
