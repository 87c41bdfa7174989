//! Month and weekday selections applied to a trip dataset.

use chrono::{Month, Weekday};

use crate::error::{BikeshareError, Result};
use crate::record::TripRecord;

/// The selection keyword meaning "no restriction".
pub const ALL: &str = "all";

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Calendar name for a 1-based month number.
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
        .unwrap_or("Unknown")
}

/// Full English name of a weekday.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// A validated month/day selection. `None` means the field is unrestricted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TripFilter {
    pub month: Option<Month>,
    pub day: Option<Weekday>,
}

impl TripFilter {
    /// Selects every trip.
    pub fn all() -> Self {
        Self::default()
    }

    /// Validates raw month/day selections.
    ///
    /// Each accepts `all`, a full calendar name or a three-letter
    /// abbreviation, case-insensitively.
    pub fn parse(month: &str, day: &str) -> Result<Self> {
        Ok(Self {
            month: parse_month(month)?,
            day: parse_day(day)?,
        })
    }

    pub fn with_month(mut self, month: Month) -> Self {
        self.month = Some(month);
        self
    }

    pub fn with_day(mut self, day: Weekday) -> Self {
        self.day = Some(day);
        self
    }

    pub fn is_unrestricted(&self) -> bool {
        self.month.is_none() && self.day.is_none()
    }

    /// Equality on the derived calendar fields; unrestricted fields always match.
    pub fn matches(&self, record: &TripRecord) -> bool {
        let month_ok = self
            .month
            .is_none_or(|m| m.number_from_month() == record.month);
        let day_ok = self.day.is_none_or(|d| d == record.weekday);
        month_ok && day_ok
    }

    pub fn month_label(&self) -> &'static str {
        self.month.map_or(ALL, |m| m.name())
    }

    pub fn day_label(&self) -> &'static str {
        self.day.map_or(ALL, weekday_name)
    }
}

fn parse_month(raw: &str) -> Result<Option<Month>> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case(ALL) {
        return Ok(None);
    }
    raw.parse::<Month>()
        .map(Some)
        .map_err(|_| BikeshareError::InvalidFilter {
            kind: "month",
            value: raw.to_string(),
        })
}

fn parse_day(raw: &str) -> Result<Option<Weekday>> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case(ALL) {
        return Ok(None);
    }
    raw.parse::<Weekday>()
        .map(Some)
        .map_err(|_| BikeshareError::InvalidFilter {
            kind: "day",
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_is_unrestricted() {
        let filter = TripFilter::parse("all", "ALL").unwrap();
        assert!(filter.is_unrestricted());
        assert_eq!(filter.month_label(), "all");
        assert_eq!(filter.day_label(), "all");
    }

    #[test]
    fn test_parse_names_and_abbreviations() {
        let filter = TripFilter::parse("JUN", "mon").unwrap();
        assert_eq!(filter.month, Some(Month::June));
        assert_eq!(filter.day, Some(Weekday::Mon));

        let filter = TripFilter::parse("february", "Sunday").unwrap();
        assert_eq!(filter.month_label(), "February");
        assert_eq!(filter.day_label(), "Sunday");
    }

    #[test]
    fn test_parse_accepts_months_outside_first_half() {
        let filter = TripFilter::parse("December", "all").unwrap();
        assert_eq!(filter.month, Some(Month::December));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = TripFilter::parse("Juneteenth", "all").unwrap_err();
        assert!(matches!(err, BikeshareError::InvalidFilter { kind: "month", .. }));

        let err = TripFilter::parse("all", "someday").unwrap_err();
        assert!(matches!(err, BikeshareError::InvalidFilter { kind: "day", .. }));
    }

    #[test]
    fn test_month_name_bounds() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(0), "Unknown");
        assert_eq!(month_name(13), "Unknown");
    }
}
