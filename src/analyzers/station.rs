use crate::analyzers::mode::mode_stats_by;
use crate::analyzers::types::{Counted, StationStats};
use crate::error::Result;
use crate::record::Dataset;

/// Most popular start station, end station and trips between them.
///
/// `round_trip_station` pairs the two independent modes into one station
/// and counts trips that both start and end there. This is not the most
/// frequent `(start, end)` pair; that is reported as `most_common_route`.
/// Blank station cells are treated as missing and never win a mode.
#[tracing::instrument(skip_all, fields(rows = dataset.len()))]
pub fn station_stats(dataset: &Dataset) -> Result<StationStats> {
    let start = mode_stats_by(dataset, |r| named(&r.start_station))?;
    let end = mode_stats_by(dataset, |r| named(&r.end_station))?;

    // Both modes are taken; the end-station mode is the one paired.
    let station = end.value;
    let round_trips = dataset
        .iter()
        .filter(|r| r.start_station == station && r.end_station == station)
        .count();
    let round_trip_station = Counted::new(station.to_string(), round_trips);

    let route = mode_stats_by(dataset, |r| {
        named(&r.start_station).zip(named(&r.end_station))
    })?;

    Ok(StationStats {
        start_station: start.into_counted().map(str::to_string),
        end_station: end.into_counted().map(str::to_string),
        round_trip_station,
        most_common_route: route
            .into_counted()
            .map(|(from, to)| (from.to_string(), to.to_string())),
    })
}

fn named(station: &str) -> Option<&str> {
    Some(station).filter(|s| !s.is_empty())
}
