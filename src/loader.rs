//! Dataset loader: resolves a city, parses its trips and applies the filter.

use std::fs::File;
use std::io::{BufReader, Read};

use tracing::info;

use crate::config::CityConfig;
use crate::error::{BikeshareError, Result};
use crate::filter::TripFilter;
use crate::parser::parse_trips;
use crate::record::Dataset;

/// Result of a load: the filtered view plus the untouched collection.
#[derive(Debug, Clone)]
pub struct LoadedData {
    /// Display name of the city the trips came from.
    pub city: String,
    pub filtered: Dataset,
    pub original: Dataset,
}

/// Loads trip data for configured cities.
#[derive(Debug, Clone)]
pub struct Loader {
    config: CityConfig,
}

impl Loader {
    pub fn new(config: CityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CityConfig {
        &self.config
    }

    /// Reads the trips for `city` and restricts them to `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`BikeshareError::UnknownCity`] for an unconfigured city,
    /// [`BikeshareError::SourceUnavailable`] when the source file cannot be
    /// opened, and parse errors from [`parse_trips`].
    #[tracing::instrument(skip(self), fields(month = filter.month_label(), day = filter.day_label()))]
    pub fn load(&self, city: &str, filter: &TripFilter) -> Result<LoadedData> {
        let entry = self.config.resolve(city)?;
        let file = File::open(&entry.path).map_err(|source| BikeshareError::SourceUnavailable {
            path: entry.path.clone(),
            source,
        })?;
        let mut loaded = load_from_reader(BufReader::new(file), filter)?;
        loaded.city = entry.name.clone();
        Ok(loaded)
    }
}

/// Parses trips from any CSV source and applies `filter`.
pub fn load_from_reader<R: Read>(source: R, filter: &TripFilter) -> Result<LoadedData> {
    let original = parse_trips(source)?;
    let filtered = original.select(filter);

    info!(
        total_rows = original.len(),
        matching_rows = filtered.len(),
        "Trip data loaded"
    );

    Ok(LoadedData {
        city: String::new(),
        filtered,
        original,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Month, Weekday};

    // Jan Sun, Jan Mon, Feb Mon, Feb Wed, Feb Mon
    const TRIPS: &str = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type
2017-01-01 09:00:00,2017-01-01 09:10:00,600,A,B,Subscriber
2017-01-02 10:00:00,2017-01-02 10:10:00,600,A,C,Subscriber
2017-02-06 11:00:00,2017-02-06 11:10:00,600,B,C,Customer
2017-02-08 12:00:00,2017-02-08 12:10:00,600,C,A,Subscriber
2017-02-13 13:00:00,2017-02-13 13:10:00,600,A,A,Customer
";

    fn load(filter: TripFilter) -> LoadedData {
        load_from_reader(TRIPS.as_bytes(), &filter).unwrap()
    }

    #[test]
    fn test_no_filter_returns_everything() {
        let loaded = load(TripFilter::all());
        assert_eq!(loaded.filtered.len(), 5);
        assert_eq!(loaded.original.len(), 5);
        assert!(loaded.filtered.iter().eq(loaded.original.iter()));
    }

    #[test]
    fn test_month_only() {
        let loaded = load(TripFilter::all().with_month(Month::February));
        assert_eq!(loaded.filtered.len(), 3);
        assert!(loaded.filtered.iter().all(|r| r.month_name() == "February"));
        assert_eq!(loaded.original.len(), 5);
    }

    #[test]
    fn test_day_only() {
        let loaded = load(TripFilter::all().with_day(Weekday::Mon));
        assert_eq!(loaded.filtered.len(), 3);
        assert!(loaded.filtered.iter().all(|r| r.day_of_week() == "Monday"));
    }

    #[test]
    fn test_both_filters_is_conjunction() {
        let loaded = load(TripFilter::all().with_month(Month::February).with_day(Weekday::Mon));
        assert_eq!(loaded.filtered.len(), 2);
    }

    #[test]
    fn test_sequential_filters_commute_with_combined() {
        let original = load(TripFilter::all()).original;
        let month = TripFilter::all().with_month(Month::February);
        let day = TripFilter::all().with_day(Weekday::Mon);
        let both = TripFilter::all().with_month(Month::February).with_day(Weekday::Mon);

        let month_then_day = original.select(&month).select(&day);
        let day_then_month = original.select(&day).select(&month);
        let combined = original.select(&both);

        assert!(month_then_day.iter().eq(combined.iter()));
        assert!(day_then_month.iter().eq(combined.iter()));

        let again = combined.select(&both);
        assert!(again.iter().eq(combined.iter()));
    }

    #[test]
    fn test_unknown_city() {
        let loader = Loader::new(CityConfig::defaults("."));
        let err = loader.load("gotham", &TripFilter::all()).unwrap_err();
        assert!(matches!(err, BikeshareError::UnknownCity(_)));
    }

    #[test]
    fn test_missing_source_file() {
        let loader = Loader::new(CityConfig::defaults("/nonexistent-bikeshare-dir"));
        let err = loader.load("chicago", &TripFilter::all()).unwrap_err();
        assert!(matches!(err, BikeshareError::SourceUnavailable { .. }));
        assert!(err.to_string().contains("/nonexistent-bikeshare-dir"));
        assert!(err.to_string().contains("chicago.csv"));
    }
}
