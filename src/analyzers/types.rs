//! Result types produced by the analyzers.

use serde::Serialize;

/// A value together with the number of trips sharing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Counted<T> {
    pub value: T,
    pub count: usize,
}

impl<T> Counted<T> {
    pub fn new(value: T, count: usize) -> Self {
        Self { value, count }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Counted<U> {
        Counted::new(f(self.value), self.count)
    }
}

/// A report section that depends on an optional column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Availability<T> {
    Available(T),
    Unavailable,
}

impl<T> Availability<T> {
    pub fn available(&self) -> Option<&T> {
        match self {
            Availability::Available(v) => Some(v),
            Availability::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available(_))
    }
}

/// Most frequent month, weekday and start hour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeStats {
    pub month: Counted<String>,
    pub day_of_week: Counted<String>,
    pub start_hour: Counted<String>,
}

/// Most popular stations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationStats {
    pub start_station: Counted<String>,
    pub end_station: Counted<String>,
    /// The end-station mode, counted over trips that both start and end there.
    pub round_trip_station: Counted<String>,
    /// The most frequent `(start, end)` pair.
    pub most_common_route: Counted<(String, String)>,
}

/// Calendar components of a span of seconds. Fractional seconds are dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DurationParts {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

/// Total and mean trip duration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub total_seconds: f64,
    pub mean_seconds: f64,
    pub total: DurationParts,
    pub mean: DurationParts,
    pub total_text: String,
    pub mean_text: String,
}

/// Trip counts grouped by a categorical column, in label order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub counts: Vec<Counted<String>>,
    pub text: String,
}

impl CategoryCounts {
    /// Number of distinct labels.
    pub fn categories(&self) -> usize {
        self.counts.len()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|c| c.count).sum()
    }
}

/// Earliest, most recent and most common birth year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: Counted<i32>,
    pub most_recent: Counted<i32>,
    pub most_common: Counted<i32>,
}

/// Rider demographics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub user_types: CategoryCounts,
    pub gender: Availability<CategoryCounts>,
    pub birth_year: Availability<BirthYearStats>,
    /// Trips starting on the last day of a month and ending on the first day
    /// of one. `None` when there are none.
    pub month_boundary_trips: Option<usize>,
}

/// Everything computed for one city and filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripReport {
    pub city: String,
    pub month: String,
    pub day: String,
    pub total_rows: usize,
    pub matching_rows: usize,
    pub time: TimeStats,
    pub stations: StationStats,
    pub durations: DurationStats,
    pub users: UserStats,
}
