//! CSV parser for bikeshare trip exports.
//!
//! Columns are located by header name, so extra columns (including the
//! unnamed index column some exports carry) are ignored. `Gender` and
//! `Birth Year` are optional; their presence is recorded in the [`Schema`].

use std::io::Read;

use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::error::{BikeshareError, Result};
use crate::record::{Dataset, Schema, TripRecord};

pub const START_TIME: &str = "Start Time";
pub const END_TIME: &str = "End Time";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

/// Label given to trips whose user type cell is blank.
pub const UNKNOWN_USER_TYPE: &str = "Unknown";

// `%.f` also matches a missing fraction, so the first entry covers plain seconds.
const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"];

struct Columns {
    start_time: usize,
    end_time: usize,
    trip_duration: usize,
    start_station: usize,
    end_station: usize,
    user_type: usize,
    gender: Option<usize>,
    birth_year: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let require = |name: &'static str| find(name).ok_or(BikeshareError::MissingColumn(name));

        if headers.iter().any(|h| h.is_empty() || h.starts_with("Unnamed")) {
            debug!("Ignoring unnamed index column");
        }

        Ok(Self {
            start_time: require(START_TIME)?,
            end_time: require(END_TIME)?,
            trip_duration: require(TRIP_DURATION)?,
            start_station: require(START_STATION)?,
            end_station: require(END_STATION)?,
            user_type: require(USER_TYPE)?,
            gender: find(GENDER),
            birth_year: find(BIRTH_YEAR),
        })
    }

    fn schema(&self) -> Schema {
        Schema {
            has_gender: self.gender.is_some(),
            has_birth_year: self.birth_year.is_some(),
        }
    }
}

/// Reads every trip from a CSV source into a [`Dataset`].
///
/// # Errors
///
/// Fails on the first row whose timestamp, duration or birth year cannot be
/// parsed, or when a required column is missing.
pub fn parse_trips<R: Read>(source: R) -> Result<Dataset> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(source);
    let columns = Columns::resolve(reader.headers()?)?;

    let mut trips = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result?;
        trips.push(parse_row(&record, &columns, i + 1)?);
    }

    debug!(rows = trips.len(), "Parsed trip records");
    Ok(Dataset::new(trips, columns.schema()))
}

fn parse_row(record: &StringRecord, columns: &Columns, row: usize) -> Result<TripRecord> {
    let cell = |idx: usize| record.get(idx).unwrap_or("");
    let optional = |idx: Option<usize>| idx.map(cell).filter(|v| !v.is_empty());

    let start_time = parse_timestamp(cell(columns.start_time), START_TIME, row)?;
    let end_time = parse_timestamp(cell(columns.end_time), END_TIME, row)?;
    let trip_duration = parse_duration(cell(columns.trip_duration), row)?;

    let user_type = match cell(columns.user_type) {
        "" => UNKNOWN_USER_TYPE,
        v => v,
    };

    let mut trip = TripRecord::new(
        start_time,
        end_time,
        trip_duration,
        cell(columns.start_station),
        cell(columns.end_station),
        user_type,
    );
    trip.gender = optional(columns.gender).map(str::to_string);
    trip.birth_year = optional(columns.birth_year)
        .map(|v| parse_birth_year(v, row))
        .transpose()?;

    Ok(trip)
}

/// Parses a source timestamp such as `2017-01-01 09:07:57`.
pub fn parse_timestamp(value: &str, column: &'static str, row: usize) -> Result<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| malformed(row, column, value))
}

fn parse_duration(value: &str, row: usize) -> Result<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
        .ok_or_else(|| malformed(row, TRIP_DURATION, value))
}

// Exports store years as floats ("1992.0") because the column has blanks.
fn parse_birth_year(value: &str, row: usize) -> Result<i32> {
    value
        .parse::<f64>()
        .ok()
        .filter(|y| y.is_finite() && y.fract() == 0.0 && y.abs() < 10_000.0)
        .map(|y| y as i32)
        .ok_or_else(|| malformed(row, BIRTH_YEAR, value))
}

fn malformed(row: usize, column: &'static str, value: &str) -> BikeshareError {
    BikeshareError::MalformedRecord {
        row,
        column,
        value: value.to_string(),
    }
}
