// Display formatting shared by every view. Absent values render as "N/A";
// a measured zero stays "0".

use chrono::NaiveDate;

use crate::model::MeasurementKind;
use crate::stats::{one_decimal, round_to};

pub const NOT_AVAILABLE: &str = "N/A";

const DAYS_PER_YEAR: f64 = 365.25;

/// Feet and inches, e.g. `6'8"`.
pub fn format_height(inches: f64) -> String {
    let feet = (inches / 12.0).floor();
    let rest = round_to(inches - feet * 12.0, 2);
    format!("{feet}'{rest}\"")
}

/// Age in years on `as_of`, one decimal. `None` when born after `as_of`.
pub fn age_on(birth_date: NaiveDate, as_of: NaiveDate) -> Option<f64> {
    let days = (as_of - birth_date).num_days();
    if days < 0 {
        return None;
    }
    Some(round_to(days as f64 / DAYS_PER_YEAR, 1))
}

pub fn format_age(birth_date: Option<NaiveDate>, as_of: NaiveDate) -> String {
    birth_date
        .and_then(|b| age_on(b, as_of))
        .map(one_decimal)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// One measurement in its natural unit.
pub fn format_measurement(kind: MeasurementKind, value: Option<f64>) -> String {
    let Some(v) = value else {
        return NOT_AVAILABLE.to_string();
    };
    match kind {
        MeasurementKind::Height => format_height(v),
        MeasurementKind::Weight => format!("{v} lbs"),
        MeasurementKind::BenchPress => format!("{v}"),
        _ => format!("{v}\""),
    }
}

/// A per-game stat to one decimal.
pub fn format_stat(value: Option<f64>) -> String {
    value
        .map(one_decimal)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
