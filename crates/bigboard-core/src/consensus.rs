// Consensus ranking: average scout rank, board ordering, per-scout outlier
// flags and rank variance.

use std::cmp::Ordering;

use crate::model::{Prospect, Scout, ScoutRanks};
use crate::stats;

/// Minimum number of scout opinions before outliers are flagged.
pub const MIN_OUTLIER_SAMPLE: usize = 3;

/// How far (in rank spots) a scout must sit from the player's average.
pub const OUTLIER_THRESHOLD: f64 = 3.0;

// ---------------------------------------------------------------------------
// Average rank
// ---------------------------------------------------------------------------

/// Mean of the ranks present. `None` when no scout ranked the player.
pub fn average_rank(ranks: &ScoutRanks) -> Option<f64> {
    stats::mean(ranks.values())
}

/// One decimal place, or `-` for an unranked player.
pub fn format_average_rank(average: Option<f64>) -> String {
    match average {
        Some(avg) => stats::one_decimal(avg),
        None => "-".to_string(),
    }
}

/// Order two consensus values: ascending, with unranked players last.
pub fn compare_consensus(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort prospects by unrounded average rank. The sort is stable, so ties and
/// unranked players keep their input order.
pub fn sort_by_consensus(prospects: &mut [&Prospect]) {
    prospects.sort_by(|a, b| {
        compare_consensus(average_rank(&a.scout_ranks), average_rank(&b.scout_ranks))
    });
}

/// Borrowing variant of [`sort_by_consensus`].
pub fn consensus_order(prospects: &[Prospect]) -> Vec<&Prospect> {
    let mut ordered: Vec<&Prospect> = prospects.iter().collect();
    sort_by_consensus(&mut ordered);
    ordered
}

// ---------------------------------------------------------------------------
// Outliers
// ---------------------------------------------------------------------------

/// How one scout's rank compares with the player's own cross-scout average.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlierFlag {
    /// Fewer than three scouts ranked the player; no flag is meaningful.
    InsufficientData,
    /// Within three spots of the average.
    None,
    /// At least three spots better than the average: this scout is high on
    /// the player.
    Favorable,
    /// At least three spots worse than the average.
    Unfavorable,
}

impl OutlierFlag {
    pub fn label(&self) -> &'static str {
        match self {
            OutlierFlag::InsufficientData => "not enough data",
            OutlierFlag::None => "",
            OutlierFlag::Favorable => "high",
            OutlierFlag::Unfavorable => "low",
        }
    }
}

/// Flag a single scout rank against the average of the same player's ranks.
pub fn outlier_flag(scout_rank: f64, cohort_average: f64, sample_count: usize) -> OutlierFlag {
    if sample_count < MIN_OUTLIER_SAMPLE {
        return OutlierFlag::InsufficientData;
    }
    let diff = scout_rank - cohort_average;
    if diff <= -OUTLIER_THRESHOLD {
        OutlierFlag::Favorable
    } else if diff >= OUTLIER_THRESHOLD {
        OutlierFlag::Unfavorable
    } else {
        OutlierFlag::None
    }
}

/// Flags for every scout that ranked the player, in panel order.
pub fn scout_outliers(ranks: &ScoutRanks) -> Vec<(Scout, OutlierFlag)> {
    let Some(avg) = average_rank(ranks) else {
        return Vec::new();
    };
    let count = ranks.count();
    ranks
        .present()
        .map(|(scout, rank)| (scout, outlier_flag(f64::from(rank), avg, count)))
        .collect()
}

// ---------------------------------------------------------------------------
// Variance and summary
// ---------------------------------------------------------------------------

/// Population variance of one player's scout ranks. Needs at least two ranks.
pub fn rank_variance(ranks: &ScoutRanks) -> Option<f64> {
    let values = ranks.values();
    if values.len() < 2 {
        return None;
    }
    let avg = stats::mean(values.iter().copied())?;
    stats::population_variance(&values, avg)
}

/// Headline numbers for the landing view.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardSummary {
    /// Names of the best-consensus prospects, best first.
    pub top_prospects: Vec<String>,
    /// Mean of per-player rank variances, 0.0 when no player qualifies.
    pub average_scout_variance: f64,
    pub ranked_players: usize,
    pub total_players: usize,
}

impl BoardSummary {
    /// Summarise a board. Unranked players never appear among the top names.
    pub fn compute(prospects: &[Prospect], top_n: usize) -> Self {
        let top_prospects = consensus_order(prospects)
            .into_iter()
            .filter(|p| !p.scout_ranks.is_empty())
            .take(top_n)
            .map(|p| p.name().to_string())
            .collect();
        let average_scout_variance =
            stats::mean(prospects.iter().filter_map(|p| rank_variance(&p.scout_ranks)))
                .unwrap_or(0.0);
        BoardSummary {
            top_prospects,
            average_scout_variance,
            ranked_players: prospects
                .iter()
                .filter(|p| !p.scout_ranks.is_empty())
                .count(),
            total_players: prospects.len(),
        }
    }

    pub fn formatted_variance(&self) -> String {
        stats::one_decimal(self.average_scout_variance)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
