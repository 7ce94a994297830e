// Shared average, variance, best-value and rounding helpers.

// ---------------------------------------------------------------------------
// Averages
// ---------------------------------------------------------------------------

/// Arithmetic mean over the finite values of `values`.
///
/// NaN and infinite inputs are skipped the same way an absent value would be.
/// Returns `None` when nothing finite remains, so callers never divide by zero.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Population variance (N denominator) of `values` around a precomputed mean.
///
/// Only used descriptively, so the N vs N-1 choice is a convention.
/// Returns `None` for an empty slice.
pub fn population_variance(values: &[f64], mean: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    Some(values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n)
}

// ---------------------------------------------------------------------------
// Best-value selection
// ---------------------------------------------------------------------------

/// Which end of the range counts as "best".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extremum {
    /// Larger is better (stat magnitudes, measurements).
    Max,
    /// Smaller is better (scout ranks).
    Min,
}

/// Index of the best defined value in `values`.
///
/// Ties resolve to the first occurrence. Returns `None` when every value is
/// undefined; callers must check before indexing.
pub fn best_index(values: &[Option<f64>], extremum: Extremum) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, value) in values.iter().enumerate() {
        let Some(v) = value.filter(|v| v.is_finite()) else {
            continue;
        };
        let better = match best {
            None => true,
            Some((_, current)) => match extremum {
                Extremum::Max => v > current,
                Extremum::Min => v < current,
            },
        };
        if better {
            best = Some((idx, v));
        }
    }
    best.map(|(idx, _)| idx)
}

// ---------------------------------------------------------------------------
// Rounding
// ---------------------------------------------------------------------------

/// Round `value` to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Round to three decimal places; applied to every derived score.
pub fn round_to_three(value: f64) -> f64 {
    round_to(value, 3)
}

/// Display text with one decimal. Halves round away from zero, so 4.25
/// shows as "4.3" rather than the "4.2" of `{:.1}`.
pub fn one_decimal(value: f64) -> String {
    format!("{:.1}", round_to(value, 1))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
