//! Human-readable enumerations for report sentences.

use crate::analyzers::types::{Counted, DurationParts};

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;

/// Joins rendered items as `a, b and c`. Empty input yields an empty string.
pub fn join_items<I, T, F>(items: I, render: F) -> String
where
    I: IntoIterator<Item = T>,
    F: FnMut(T) -> String,
{
    let rendered: Vec<String> = items.into_iter().map(render).collect();
    match rendered.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
    }
}

/// Splits a number of seconds into days, hours, minutes and whole seconds.
pub fn duration_parts(seconds: f64) -> DurationParts {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.trunc() as u64
    } else {
        0
    };
    DurationParts {
        days: total / SECONDS_PER_DAY,
        hours: total % SECONDS_PER_DAY / SECONDS_PER_HOUR,
        minutes: total % SECONDS_PER_HOUR / SECONDS_PER_MINUTE,
        seconds: total % SECONDS_PER_MINUTE,
    }
}

/// Renders the non-zero components, e.g. `2 days, 3 hours and 5 minutes.`
///
/// A zero duration renders as an empty string.
pub fn format_duration(parts: DurationParts) -> String {
    let components = [
        (parts.days, "day"),
        (parts.hours, "hour"),
        (parts.minutes, "minute"),
        (parts.seconds, "second"),
    ];
    let text = join_items(
        components.into_iter().filter(|(n, _)| *n != 0),
        |(n, unit)| {
            if n == 1 {
                format!("{n} {unit}")
            } else {
                format!("{n} {unit}s")
            }
        },
    );
    terminate(text)
}

/// Renders group counts as `3 Customers and 10 Subscribers.`
///
/// Labels are pluralized by appending `s`, whatever the count.
pub fn format_counts(counts: &[Counted<String>]) -> String {
    terminate(join_items(counts, |c| format!("{} {}s", c.count, c.value)))
}

fn terminate(mut text: String) -> String {
    if !text.is_empty() {
        text.push('.');
    }
    text
}
