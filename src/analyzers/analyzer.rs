use tracing::{info, warn};

use crate::analyzers::duration::duration_stats;
use crate::analyzers::station::station_stats;
use crate::analyzers::time::time_stats;
use crate::analyzers::types::TripReport;
use crate::analyzers::user::user_stats;
use crate::error::{BikeshareError, Result};
use crate::filter::TripFilter;
use crate::loader::LoadedData;

/// Runs the time, station, duration and user analyzers over the filtered view.
///
/// # Errors
///
/// Returns [`BikeshareError::NoMatchingRecords`] before any analyzer runs when
/// the filter left no trips.
#[tracing::instrument(skip_all, fields(city = %data.city))]
pub fn analyze(data: &LoadedData, filter: &TripFilter) -> Result<TripReport> {
    let dataset = &data.filtered;
    if dataset.is_empty() {
        warn!(
            month = filter.month_label(),
            day = filter.day_label(),
            "Filter matched no trips"
        );
        return Err(BikeshareError::NoMatchingRecords {
            month: filter.month_label().to_string(),
            day: filter.day_label().to_string(),
        });
    }

    let report = TripReport {
        city: data.city.clone(),
        month: filter.month_label().to_string(),
        day: filter.day_label().to_string(),
        total_rows: data.original.len(),
        matching_rows: dataset.len(),
        time: time_stats(dataset)?,
        stations: station_stats(dataset)?,
        durations: duration_stats(dataset)?,
        users: user_stats(dataset)?,
    };

    info!(matching_rows = report.matching_rows, "Trip report complete");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::{Availability, Counted};
    use crate::loader::load_from_reader;
    use chrono::Month;

    const TRIPS: &str = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type
2017-01-01 09:00:00,2017-01-01 09:10:00,600,Clark St,Canal St,Subscriber
2017-02-06 11:00:00,2017-02-06 11:20:00,1200,Canal St,Clark St,Customer
";

    #[test]
    fn test_single_record_report() {
        let filter = TripFilter::all().with_month(Month::January);
        let data = load_from_reader(TRIPS.as_bytes(), &filter).unwrap();
        let report = analyze(&data, &filter).unwrap();

        assert_eq!(report.month, "January");
        assert_eq!(report.day, "all");
        assert_eq!(report.total_rows, 2);
        assert_eq!(report.matching_rows, 1);
        assert_eq!(report.time.month, Counted::new("January".to_string(), 1));
        assert_eq!(report.time.day_of_week, Counted::new("Sunday".to_string(), 1));
        assert_eq!(report.time.start_hour, Counted::new("9AM".to_string(), 1));
        assert_eq!(report.stations.start_station, Counted::new("Clark St".to_string(), 1));
        assert_eq!(report.stations.end_station, Counted::new("Canal St".to_string(), 1));
        assert_eq!(report.durations.total_text, "10 minutes.");
        assert_eq!(report.users.user_types.text, "1 Subscribers.");
        assert_eq!(report.users.gender, Availability::Unavailable);
    }

    #[test]
    fn test_empty_view_is_no_matching_records() {
        let filter = TripFilter::all().with_month(Month::June);
        let data = load_from_reader(TRIPS.as_bytes(), &filter).unwrap();

        match analyze(&data, &filter).unwrap_err() {
            BikeshareError::NoMatchingRecords { month, day } => {
                assert_eq!(month, "June");
                assert_eq!(day, "all");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
