use std::collections::BTreeMap;

use tracing::debug;

use crate::analyzers::format::format_counts;
use crate::analyzers::mode::mode_stats_by;
use crate::analyzers::types::{Availability, BirthYearStats, CategoryCounts, Counted, UserStats};
use crate::error::Result;
use crate::record::Dataset;

/// User types, gender split, birth-year extremes and month-boundary trips.
///
/// Gender and birth year are only reported when the source carried the
/// column and at least one trip has a value.
#[tracing::instrument(skip_all, fields(rows = dataset.len()))]
pub fn user_stats(dataset: &Dataset) -> Result<UserStats> {
    let schema = dataset.schema();

    let user_types = category_counts(dataset.iter().map(|r| Some(r.user_type.as_str())));

    let gender = if schema.has_gender {
        available_if_any(category_counts(dataset.iter().map(|r| r.gender.as_deref())))
    } else {
        Availability::Unavailable
    };

    let birth_year = if schema.has_birth_year {
        birth_year_stats(dataset)?
    } else {
        Availability::Unavailable
    };

    let boundary_trips = dataset.iter().filter(|r| r.spans_month_boundary()).count();
    debug!(boundary_trips, "Counted month-boundary trips");

    Ok(UserStats {
        user_types,
        gender,
        birth_year,
        month_boundary_trips: (boundary_trips > 0).then_some(boundary_trips),
    })
}

/// Counts per label in label order. Missing values are not counted.
fn category_counts<'a>(values: impl Iterator<Item = Option<&'a str>>) -> CategoryCounts {
    let mut tally: BTreeMap<&str, usize> = BTreeMap::new();
    for value in values.flatten() {
        *tally.entry(value).or_default() += 1;
    }

    let counts: Vec<_> = tally
        .into_iter()
        .map(|(label, count)| Counted::new(label.to_string(), count))
        .collect();
    let text = format_counts(&counts);
    CategoryCounts { counts, text }
}

fn available_if_any(counts: CategoryCounts) -> Availability<CategoryCounts> {
    if counts.counts.is_empty() {
        Availability::Unavailable
    } else {
        Availability::Available(counts)
    }
}

fn birth_year_stats(dataset: &Dataset) -> Result<Availability<BirthYearStats>> {
    let years: Vec<i32> = dataset.iter().filter_map(|r| r.birth_year).collect();
    let (Some(&earliest), Some(&most_recent)) = (years.iter().min(), years.iter().max()) else {
        return Ok(Availability::Unavailable);
    };

    let count_of = |year: i32| years.iter().filter(|&&y| y == year).count();
    let most_common = mode_stats_by(dataset, |r| r.birth_year)?.into_counted();

    Ok(Availability::Available(BirthYearStats {
        earliest: Counted::new(earliest, count_of(earliest)),
        most_recent: Counted::new(most_recent, count_of(most_recent)),
        most_common,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Schema, TIMESTAMP_FORMAT, TripRecord};
    use chrono::NaiveDateTime;

    #[test]
    fn test_user_type_counts_are_conserved() {
        let dataset = chicago_like();
        let stats = user_stats(&dataset).unwrap();

        assert_eq!(stats.user_types.categories(), 2);
        assert_eq!(stats.user_types.total(), dataset.len());
        assert_eq!(stats.user_types.text, "2 Customers and 3 Subscribers.");
    }

    #[test]
    fn test_gender_counts_skip_blanks() {
        let stats = user_stats(&chicago_like()).unwrap();
        let gender = stats.gender.available().unwrap();

        assert_eq!(
            gender.counts,
            vec![
                Counted::new("Female".to_string(), 1),
                Counted::new("Male".to_string(), 3)
            ]
        );
        assert_eq!(gender.text, "1 Females and 3 Males.");
    }

    #[test]
    fn test_birth_year_extremes_and_mode() {
        let stats = user_stats(&chicago_like()).unwrap();
        let years = stats.birth_year.available().unwrap();

        assert_eq!(years.earliest, Counted::new(1960, 1));
        assert_eq!(years.most_recent, Counted::new(1995, 1));
        assert_eq!(years.most_common, Counted::new(1988, 2));
    }

    #[test]
    fn test_missing_columns_are_unavailable() {
        let records = vec![trip("2017-01-10 08:00:00", "2017-01-10 08:20:00", "Subscriber")];
        let dataset = Dataset::new(records, Schema::default());
        let stats = user_stats(&dataset).unwrap();

        assert_eq!(stats.gender, Availability::Unavailable);
        assert_eq!(stats.birth_year, Availability::Unavailable);
        assert_eq!(stats.user_types.text, "1 Subscribers.");
    }

    #[test]
    fn test_all_null_birth_years_are_unavailable() {
        let records = vec![
            trip("2017-01-10 08:00:00", "2017-01-10 08:20:00", "Subscriber").with_gender("Male"),
            trip("2017-01-11 08:00:00", "2017-01-11 08:20:00", "Customer"),
        ];
        let dataset = Dataset::new(records, full_schema());
        let stats = user_stats(&dataset).unwrap();

        assert!(stats.gender.is_available());
        assert_eq!(stats.birth_year, Availability::Unavailable);
    }

    #[test]
    fn test_month_boundary_trips() {
        let stats = user_stats(&chicago_like()).unwrap();
        assert_eq!(stats.month_boundary_trips, Some(1));

        let records = vec![trip("2017-01-10 08:00:00", "2017-01-10 08:20:00", "Subscriber")];
        let stats = user_stats(&Dataset::new(records, Schema::default())).unwrap();
        assert_eq!(stats.month_boundary_trips, None);
    }

    fn chicago_like() -> Dataset {
        let records = vec![
            trip("2017-03-31 23:55:00", "2017-04-01 00:15:00", "Subscriber")
                .with_gender("Male")
                .with_birth_year(1988),
            trip("2017-04-02 09:00:00", "2017-04-02 09:15:00", "Customer"),
            trip("2017-04-03 09:00:00", "2017-04-03 09:15:00", "Subscriber")
                .with_gender("Female")
                .with_birth_year(1960),
            trip("2017-04-04 09:00:00", "2017-04-04 09:15:00", "Subscriber")
                .with_gender("Male")
                .with_birth_year(1988),
            trip("2017-04-05 09:00:00", "2017-04-05 09:15:00", "Customer")
                .with_gender("Male")
                .with_birth_year(1995),
        ];
        Dataset::new(records, full_schema())
    }

    fn full_schema() -> Schema {
        Schema {
            has_gender: true,
            has_birth_year: true,
        }
    }

    fn trip(start: &str, end: &str, user_type: &str) -> TripRecord {
        let parse = |s: &str| NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).unwrap();
        TripRecord::new(parse(start), parse(end), 900.0, "A", "B", user_type)
    }
}
