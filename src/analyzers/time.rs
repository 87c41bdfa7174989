use crate::analyzers::mode::mode_stats;
use crate::analyzers::types::TimeStats;
use crate::error::Result;
use crate::record::Dataset;

/// Most frequent month, weekday and 12-hour start hour of the trips.
#[tracing::instrument(skip_all, fields(rows = dataset.len()))]
pub fn time_stats(dataset: &Dataset) -> Result<TimeStats> {
    let month = mode_stats(dataset, |r| r.month_name())?;
    let day_of_week = mode_stats(dataset, |r| r.day_of_week())?;
    let start_hour = mode_stats(dataset, |r| r.start_hour_12())?;

    Ok(TimeStats {
        month: month.into_counted().map(str::to_string),
        day_of_week: day_of_week.into_counted().map(str::to_string),
        start_hour: start_hour.into_counted(),
    })
}
