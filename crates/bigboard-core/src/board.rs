// Big board: the filterable consensus-ordered list of every prospect, with
// stat chips highlighting standout and weak per-game numbers.

use chrono::NaiveDate;

use crate::consensus::{average_rank, format_average_rank, sort_by_consensus};
use crate::format::{format_age, format_height, NOT_AVAILABLE};
use crate::model::{stat, Prospect};
use crate::stats;

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Name search plus optional exact team match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardFilter {
    pub search: String,
    pub team: Option<String>,
}

impl BoardFilter {
    pub fn matches(&self, prospect: &Prospect) -> bool {
        let needle = self.search.trim().to_lowercase();
        let name_ok = needle.is_empty() || prospect.name().to_lowercase().contains(&needle);
        let team_ok = match self.team.as_deref() {
            Some(team) => prospect.bio.current_team.as_deref() == Some(team),
            None => true,
        };
        name_ok && team_ok
    }
}

/// Distinct team names in first-seen order.
pub fn teams(prospects: &[Prospect]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for team in prospects.iter().filter_map(|p| p.bio.current_team.as_deref()) {
        if !out.iter().any(|t| t == team) {
            out.push(team.to_string());
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Stat chips
// ---------------------------------------------------------------------------

/// Whether a chip's value is notable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipTone {
    /// At or above the high threshold.
    High,
    /// At or below the low threshold.
    Low,
    Neutral,
}

/// High/low thresholds for one chip stat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChipThreshold {
    pub stat: &'static str,
    pub high: f64,
    pub low: f64,
}

pub const CHIP_THRESHOLDS: &[ChipThreshold] = &[
    ChipThreshold {
        stat: stat::PTS,
        high: 15.0,
        low: 8.0,
    },
    ChipThreshold {
        stat: stat::TRB,
        high: 7.0,
        low: 3.0,
    },
    ChipThreshold {
        stat: stat::AST,
        high: 3.5,
        low: 1.5,
    },
    ChipThreshold {
        stat: stat::BLK,
        high: 1.2,
        low: 0.3,
    },
    ChipThreshold {
        stat: stat::STL,
        high: 1.2,
        low: 0.3,
    },
];

impl ChipThreshold {
    pub fn tone(&self, value: f64) -> ChipTone {
        if value <= self.low {
            ChipTone::Low
        } else if value >= self.high {
            ChipTone::High
        } else {
            ChipTone::Neutral
        }
    }
}

/// One per-game stat with its tone and distance from the board average.
#[derive(Debug, Clone, PartialEq)]
pub struct StatChip {
    pub stat: &'static str,
    pub value: Option<f64>,
    pub tone: ChipTone,
    /// `value - cohort average`, when both exist.
    pub diff_from_avg: Option<f64>,
}

impl StatChip {
    pub fn label(&self) -> String {
        match self.value {
            Some(v) => format!("{}: {}", self.stat, stats::one_decimal(v)),
            None => format!("{}: {NOT_AVAILABLE}", self.stat),
        }
    }

    /// Tooltip text, only for notable chips.
    pub fn note(&self) -> Option<String> {
        if self.tone == ChipTone::Neutral {
            return None;
        }
        let diff = self.diff_from_avg?;
        Some(if diff > 0.0 {
            format!("+{diff:.2} above avg")
        } else {
            format!("{diff:.2} below avg")
        })
    }
}

/// Per-stat averages over the whole board, used as the chip baseline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CohortAverages(Vec<(&'static str, Option<f64>)>);

impl CohortAverages {
    /// Averages of each chip stat over players that have it.
    pub fn compute(prospects: &[Prospect]) -> Self {
        let averages: Vec<_> = prospects.iter().map(Prospect::season_averages).collect();
        CohortAverages(
            CHIP_THRESHOLDS
                .iter()
                .map(|t| (t.stat, stats::mean(averages.iter().filter_map(|a| a.get(t.stat)))))
                .collect(),
        )
    }

    pub fn get(&self, stat: &str) -> Option<f64> {
        self.0.iter().find(|(s, _)| *s == stat).and_then(|(_, v)| *v)
    }
}

/// Chips for one prospect against the board averages.
pub fn stat_chips(prospect: &Prospect, cohort: &CohortAverages) -> Vec<StatChip> {
    let averages = prospect.season_averages();
    CHIP_THRESHOLDS
        .iter()
        .map(|t| {
            let value = averages.get(t.stat);
            StatChip {
                stat: t.stat,
                value,
                tone: value.map_or(ChipTone::Neutral, |v| t.tone(v)),
                diff_from_avg: value.zip(cohort.get(t.stat)).map(|(v, avg)| v - avg),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// One row of the big board.
#[derive(Debug, Clone)]
pub struct BoardRow<'a> {
    /// 1-based position on the filtered board.
    pub position: usize,
    pub prospect: &'a Prospect,
    pub average_rank: Option<f64>,
    pub chips: Vec<StatChip>,
    pub age: String,
    pub height: String,
}

impl BoardRow<'_> {
    pub fn average_rank_label(&self) -> String {
        format_average_rank(self.average_rank)
    }
}

/// The filtered, consensus-ordered board.
#[derive(Debug, Clone)]
pub struct BigBoard<'a> {
    pub rows: Vec<BoardRow<'a>>,
    pub teams: Vec<String>,
    /// Players on the unfiltered board.
    pub total: usize,
}

impl<'a> BigBoard<'a> {
    /// Build the board. Chip baselines always use the unfiltered board so a
    /// narrow filter does not shift them.
    pub fn build(prospects: &'a [Prospect], filter: &BoardFilter, as_of: NaiveDate) -> Self {
        let cohort = CohortAverages::compute(prospects);
        let mut selected: Vec<&'a Prospect> =
            prospects.iter().filter(|p| filter.matches(p)).collect();
        sort_by_consensus(&mut selected);

        let rows = selected
            .into_iter()
            .enumerate()
            .map(|(idx, p)| BoardRow {
                position: idx + 1,
                prospect: p,
                average_rank: average_rank(&p.scout_ranks),
                chips: stat_chips(p, &cohort),
                age: format_age(p.bio.birth_date, as_of),
                height: p
                    .bio
                    .height
                    .map(format_height)
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            })
            .collect();

        BigBoard {
            rows,
            teams: teams(prospects),
            total: prospects.len(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
