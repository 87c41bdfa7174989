//! Trip records and the read-only dataset views built over them.

use std::sync::Arc;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

use crate::filter::{TripFilter, month_name, weekday_name};

/// Timestamp layout used by the source files and by raw row output.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One trip. `month` and `weekday` are derived from `start_time` at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub trip_duration: f64,
    pub start_station: String,
    pub end_station: String,
    pub user_type: String,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
    pub month: u32,
    pub weekday: Weekday,
}

impl TripRecord {
    pub fn new(
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        trip_duration: f64,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
        user_type: impl Into<String>,
    ) -> Self {
        Self {
            start_time,
            end_time,
            trip_duration,
            start_station: start_station.into(),
            end_station: end_station.into(),
            user_type: user_type.into(),
            gender: None,
            birth_year: None,
            month: start_time.month(),
            weekday: start_time.weekday(),
        }
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn with_birth_year(mut self, year: i32) -> Self {
        self.birth_year = Some(year);
        self
    }

    pub fn month_name(&self) -> &'static str {
        month_name(self.month)
    }

    pub fn day_of_week(&self) -> &'static str {
        weekday_name(self.weekday)
    }

    /// Start hour on a 12-hour clock without leading zero, e.g. `5AM`, `12PM`.
    pub fn start_hour_12(&self) -> String {
        let (pm, hour) = self.start_time.hour12();
        format!("{hour}{}", if pm { "PM" } else { "AM" })
    }

    /// Started on the last day of a month and ended on the first day of one.
    pub fn spans_month_boundary(&self) -> bool {
        let starts_on_month_end = self
            .start_time
            .date()
            .succ_opt()
            .is_some_and(|next| next.day() == 1);
        starts_on_month_end && self.end_time.day() == 1
    }
}

/// Which optional columns the source provided. Resolved once per load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Schema {
    pub has_gender: bool,
    pub has_birth_year: bool,
}

/// A read-only view over a shared set of trip records.
///
/// Views produced by [`Dataset::select`] or the frequency primitive share the
/// underlying records with the dataset they came from; the full collection is
/// never mutated and stays reachable through [`Dataset::original`].
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Arc<[TripRecord]>,
    rows: Vec<usize>,
    schema: Schema,
}

impl Dataset {
    pub fn new(records: Vec<TripRecord>, schema: Schema) -> Self {
        let rows = (0..records.len()).collect();
        Self {
            records: records.into(),
            rows,
            schema,
        }
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    /// Number of trips in this view.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of trips in the unfiltered collection behind this view.
    pub fn total_rows(&self) -> usize {
        self.records.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TripRecord> + '_ {
        self.rows.iter().map(|&i| &self.records[i])
    }

    /// Pairs each trip with its position in the unfiltered collection.
    pub(crate) fn iter_indexed(&self) -> impl Iterator<Item = (usize, &TripRecord)> + '_ {
        self.rows.iter().map(|&i| (i, &self.records[i]))
    }

    /// A view over the same records restricted to `rows`, which must be
    /// positions in the unfiltered collection in ascending order.
    pub(crate) fn with_rows(&self, rows: Vec<usize>) -> Self {
        Self {
            records: Arc::clone(&self.records),
            rows,
            schema: self.schema,
        }
    }

    /// The trips of this view satisfying `predicate`.
    pub fn filter<P>(&self, predicate: P) -> Self
    where
        P: Fn(&TripRecord) -> bool,
    {
        let rows = self
            .iter_indexed()
            .filter(|(_, r)| predicate(r))
            .map(|(i, _)| i)
            .collect();
        self.with_rows(rows)
    }

    /// The trips of this view matching a month/day selection.
    pub fn select(&self, filter: &TripFilter) -> Self {
        if filter.is_unrestricted() {
            return self.clone();
        }
        self.filter(|r| filter.matches(r))
    }

    /// The unfiltered collection this view was derived from.
    pub fn original(&self) -> Self {
        self.with_rows((0..self.records.len()).collect())
    }
}
