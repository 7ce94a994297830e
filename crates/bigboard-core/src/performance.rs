// Performance scoring and podium ordering.
//
// A weighted sum of season averages, discounted by the strength of the
// player's competition. Only meaningful for ordering a handful of compared
// players, not as an absolute draft value.

use std::collections::HashMap;

use tracing::debug;

use crate::model::{stat, PlayerBio, Prospect, StatLine};

// ---------------------------------------------------------------------------
// Weights
// ---------------------------------------------------------------------------

/// Per-stat weights of the base score.
pub const SCORE_WEIGHTS: &[(&str, f64)] = &[
    (stat::PTS, 1.0),
    (stat::TRB, 0.8),
    (stat::AST, 0.8),
    (stat::BLK, 0.6),
    (stat::STL, 0.6),
    (stat::MP, 0.4),
    (stat::EFG_PCT, 0.5),
];

/// Weighted sum of the stats; missing components contribute 0.
pub fn base_score(stats: &StatLine) -> f64 {
    SCORE_WEIGHTS
        .iter()
        .map(|(key, weight)| stats.or_zero(key) * weight)
        .sum()
}

/// Base score scaled by a competition multiplier.
pub fn performance_score(stats: &StatLine, multiplier: f64) -> f64 {
    base_score(stats) * multiplier
}

// ---------------------------------------------------------------------------
// Competition multipliers
// ---------------------------------------------------------------------------

/// Fallback entry name used when neither league nor league type matches.
pub const OTHER_LEAGUE: &str = "Other";

/// Multiplier for [`OTHER_LEAGUE`] unless the table overrides it.
pub const OTHER_MULTIPLIER: f64 = 0.50;

const BUILTIN_MULTIPLIERS: &[(&str, f64)] = &[
    ("NBA", 1.00),
    ("EuroLeague", 0.97),
    ("Liga ACB", 0.95),
    ("ACB", 0.95),
    ("BSL", 0.93),
    ("VTB United League", 0.92),
    ("GBL", 0.91),
    ("Serie A", 0.90),
    ("LNB Pro A", 0.89),
    ("BBL", 0.88),
    ("ABA", 0.87),
    ("LKL", 0.86),
    ("NBL", 0.85),
    ("NCAA D-I", 0.80),
    ("NCAA D1", 0.80),
    ("NCAA D-II", 0.70),
    ("NCAA D2", 0.70),
    ("NCAA D-III", 0.65),
    ("NCAA D3", 0.65),
    ("G League", 0.75),
    ("CBA", 0.75),
    ("High School", 0.60),
    (OTHER_LEAGUE, OTHER_MULTIPLIER),
];

/// League-strength table keyed by normalized league name.
#[derive(Debug, Clone)]
pub struct CompetitionTable {
    entries: HashMap<String, f64>,
}

impl Default for CompetitionTable {
    fn default() -> Self {
        CompetitionTable {
            entries: BUILTIN_MULTIPLIERS
                .iter()
                .map(|(name, m)| (normalize_league(name), *m))
                .collect(),
        }
    }
}

impl CompetitionTable {
    /// The built-in table with `overrides` added or replacing entries.
    pub fn with_overrides<'a, I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut table = Self::default();
        for (name, multiplier) in overrides {
            table.entries.insert(normalize_league(name), multiplier);
        }
        table
    }

    /// Exact lookup after normalization.
    pub fn lookup(&self, league: &str) -> Option<f64> {
        let key = normalize_league(league);
        if key.is_empty() {
            return None;
        }
        self.entries.get(&key).copied()
    }

    /// Multiplier for a player: league first, then league type, then "Other".
    pub fn multiplier(&self, league: Option<&str>, league_type: Option<&str>) -> f64 {
        if let Some(m) = league.and_then(|l| self.lookup(l)) {
            return m;
        }
        if let Some(m) = league_type.and_then(|l| self.lookup(l)) {
            return m;
        }
        debug!(
            "no competition multiplier for league={:?} leagueType={:?}; using {}",
            league, league_type, OTHER_LEAGUE
        );
        self.lookup(OTHER_LEAGUE).unwrap_or(OTHER_MULTIPLIER)
    }

    pub fn multiplier_for(&self, bio: &PlayerBio) -> f64 {
        self.multiplier(bio.league.as_deref(), bio.league_type.as_deref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lookup key: trimmed, inner whitespace collapsed, ASCII case folded.
pub fn normalize_league(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_lowercase()
}

/// Performance score of a prospect from averaged season stats.
pub fn prospect_score(prospect: &Prospect, table: &CompetitionTable) -> f64 {
    performance_score(
        &prospect.season_averages(),
        table.multiplier_for(&prospect.bio),
    )
}

// ---------------------------------------------------------------------------
// Podium
// ---------------------------------------------------------------------------

/// Shortest podium bar.
pub const MIN_BAR_HEIGHT: f64 = 80.0;
/// Tallest podium bar, reached by the top score.
pub const MAX_BAR_HEIGHT: f64 = 200.0;

const PODIUM_OF_TWO: &[usize] = &[1, 0];
const PODIUM_OF_THREE: &[usize] = &[2, 0, 1];
const PODIUM_OF_FOUR: &[usize] = &[2, 0, 1, 3];

/// Slot permutation that centers the winner, indexed into the
/// descending-score order. `None` for sizes that keep natural order.
pub fn olympic_permutation(len: usize) -> Option<&'static [usize]> {
    match len {
        2 => Some(PODIUM_OF_TWO),
        3 => Some(PODIUM_OF_THREE),
        4 => Some(PODIUM_OF_FOUR),
        _ => None,
    }
}

/// Rearrange a descending-score list into podium display order.
pub fn olympic_order<T>(sorted: Vec<T>) -> Vec<T> {
    let Some(permutation) = olympic_permutation(sorted.len()) else {
        return sorted;
    };
    let mut slots: Vec<Option<T>> = sorted.into_iter().map(Some).collect();
    permutation
        .iter()
        .filter_map(|&idx| slots[idx].take())
        .collect()
}

/// One bar of the podium.
#[derive(Debug, Clone)]
pub struct PodiumSlot<'a> {
    pub prospect: &'a Prospect,
    /// Finishing place, 0 for the top score.
    pub place: usize,
    pub score: f64,
    pub multiplier: f64,
    pub bar_height: f64,
}

/// Compared players in podium display order.
#[derive(Debug, Clone)]
pub struct Podium<'a> {
    pub slots: Vec<PodiumSlot<'a>>,
}

impl<'a> Podium<'a> {
    /// Score, sort and arrange the players. `None` for fewer than two.
    pub fn build(prospects: &[&'a Prospect], table: &CompetitionTable) -> Option<Self> {
        if prospects.len() < 2 {
            return None;
        }
        let mut scored: Vec<(&'a Prospect, f64, f64)> = prospects
            .iter()
            .map(|&p| {
                let multiplier = table.multiplier_for(&p.bio);
                (p, performance_score(&p.season_averages(), multiplier), multiplier)
            })
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        let max_score = scored
            .iter()
            .map(|(_, s, _)| *s)
            .fold(1.0_f64, f64::max);

        let ranked: Vec<PodiumSlot<'a>> = scored
            .into_iter()
            .enumerate()
            .map(|(place, (prospect, score, multiplier))| PodiumSlot {
                prospect,
                place,
                score,
                multiplier,
                bar_height: MIN_BAR_HEIGHT
                    + (score / max_score) * (MAX_BAR_HEIGHT - MIN_BAR_HEIGHT),
            })
            .collect();

        Some(Podium {
            slots: olympic_order(ranked),
        })
    }

    /// The top scorer.
    pub fn winner(&self) -> Option<&PodiumSlot<'a>> {
        self.slots.iter().find(|s| s.place == 0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
