//! Output formatting for trip reports and raw trip rows.
//!
//! Supports pretty-printing, JSON serialization, console text and CSV paging.

use std::fmt;
use std::io::Write;

use csv::WriterBuilder;
use tracing::debug;

use crate::analyzers::types::{Availability, TripReport};
use crate::error::Result;
use crate::parser::{
    BIRTH_YEAR, END_STATION, END_TIME, GENDER, START_STATION, START_TIME, TRIP_DURATION, USER_TYPE,
};
use crate::record::{Schema, TIMESTAMP_FORMAT, TripRecord};

const RULE: &str = "----------------------------------------";

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty(report: &TripReport) {
    debug!("{:#?}", report);
}

/// Serializes a report as pretty-printed JSON.
pub fn to_json(report: &TripReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Console rendering of a [`TripReport`].
pub struct TextReport<'a>(pub &'a TripReport);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;
        writeln!(
            f,
            "Bikeshare statistics for {} (month: {}, day: {})",
            r.city, r.month, r.day
        )?;
        writeln!(
            f,
            "{} of {} trips match the filter.",
            r.matching_rows, r.total_rows
        )?;
        writeln!(f, "{RULE}")?;

        let t = &r.time;
        writeln!(f, "Most Frequent Times of Travel\n")?;
        writeln!(f, "1) Most frequent month of travel is: {}", t.month.value)?;
        writeln!(f, "   A total of {} trips were made.", t.month.count)?;
        writeln!(f, "2) Most frequent day of travel is: {}", t.day_of_week.value)?;
        writeln!(f, "   A total of {} trips were made.", t.day_of_week.count)?;
        writeln!(f, "3) Most frequent hour of day of travel is: {}", t.start_hour.value)?;
        writeln!(f, "   A total of {} trips were made.", t.start_hour.count)?;
        writeln!(f, "{RULE}")?;

        let s = &r.stations;
        writeln!(f, "Most Popular Stations and Trip\n")?;
        writeln!(f, "1) Most popular start station is: {}", s.start_station.value)?;
        writeln!(f, "   A total of {} trips were started at the station.", s.start_station.count)?;
        writeln!(f, "2) Most popular end station is: {}", s.end_station.value)?;
        writeln!(f, "   A total of {} trips were ended at the station.", s.end_station.count)?;
        writeln!(
            f,
            "3) The station with the most frequent combination of start and end station trip is: {}",
            s.round_trip_station.value
        )?;
        writeln!(
            f,
            "   A total of {} trips were started and ended at the station.",
            s.round_trip_station.count
        )?;
        let (from, to) = &s.most_common_route.value;
        writeln!(f, "4) Most common route is: {from} to {to}")?;
        writeln!(f, "   A total of {} trips took this route.", s.most_common_route.count)?;
        writeln!(f, "{RULE}")?;

        let d = &r.durations;
        writeln!(f, "Trip Duration\n")?;
        writeln!(f, "1) Total travel time for all trips is: {}", d.total_text)?;
        writeln!(f, "2) Average travel time for all trips is: {}", d.mean_text)?;
        writeln!(f, "{RULE}")?;

        let u = &r.users;
        writeln!(f, "User Statistics\n")?;
        writeln!(
            f,
            "1) There are {} types of BikeShare users.",
            u.user_types.categories()
        )?;
        writeln!(f, "   There were {}", u.user_types.text)?;
        match &u.gender {
            Availability::Available(g) => writeln!(f, "2) There were {}", g.text)?,
            Availability::Unavailable => {
                writeln!(f, "2) No Gender data is available for {}", r.city)?
            }
        }
        match &u.birth_year {
            Availability::Available(b) => {
                writeln!(f, "3) Birth Year Stats:")?;
                writeln!(f, "   The earliest year of birth is {}.", b.earliest.value)?;
                writeln!(f, "   {} people listed it as their birth year.", b.earliest.count)?;
                writeln!(f, "   The most recent year of birth is {}.", b.most_recent.value)?;
                writeln!(f, "   {} people listed it as their birth year.", b.most_recent.count)?;
                writeln!(f, "   The most common year of birth is {}.", b.most_common.value)?;
                writeln!(f, "   {} people listed it as their birth year.", b.most_common.count)?;
            }
            Availability::Unavailable => {
                writeln!(f, "3) No Birth Year data is available for {}", r.city)?
            }
        }
        if let Some(n) = u.month_boundary_trips {
            writeln!(f, "\nFUN FACT")?;
            writeln!(
                f,
                "{n} trips started on the last day of a month and ended on the first day of the next."
            )?;
        }
        write!(f, "{RULE}")
    }
}

/// Writes trips as CSV rows under the source column headers.
///
/// Gender and birth year columns are written only when `schema` says the
/// source had them. Returns the number of rows written.
pub fn write_rows<'a, W, I>(writer: W, schema: Schema, rows: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a TripRecord>,
{
    let mut writer = WriterBuilder::new().from_writer(writer);

    let mut header = vec![
        START_TIME,
        END_TIME,
        TRIP_DURATION,
        START_STATION,
        END_STATION,
        USER_TYPE,
    ];
    if schema.has_gender {
        header.push(GENDER);
    }
    if schema.has_birth_year {
        header.push(BIRTH_YEAR);
    }
    writer.write_record(&header)?;

    let mut written = 0;
    for row in rows {
        let mut record = vec![
            row.start_time.format(TIMESTAMP_FORMAT).to_string(),
            row.end_time.format(TIMESTAMP_FORMAT).to_string(),
            row.trip_duration.to_string(),
            row.start_station.clone(),
            row.end_station.clone(),
            row.user_type.clone(),
        ];
        if schema.has_gender {
            record.push(row.gender.clone().unwrap_or_default());
        }
        if schema.has_birth_year {
            record.push(row.birth_year.map(|y| y.to_string()).unwrap_or_default());
        }
        writer.write_record(&record)?;
        written += 1;
    }
    writer.flush()?;

    debug!(written, "Wrote raw trip rows");
    Ok(written)
}
