// Side-by-side comparison of a small selection of prospects.

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;
use tracing::debug;

use crate::attributes::{normalize_attributes, AttributeVector};
use crate::consensus::average_rank;
use crate::model::{stat, MeasurementKind, PlayerId, Prospect, Scout};
use crate::performance::{CompetitionTable, Podium};
use crate::stats::{best_index, Extremum};

/// Default and upper bound on compared players.
pub const DEFAULT_MAX_PLAYERS: usize = 4;

/// Season stats shown in the comparison, in display order.
pub const COMPARED_STATS: [&str; 6] = [
    stat::PTS,
    stat::TRB,
    stat::AST,
    stat::BLK,
    stat::STL,
    stat::MP,
];

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("player {0} is already selected")]
    Duplicate(PlayerId),

    #[error("selection is full ({max} players)")]
    Full { max: usize },

    #[error("player {0} is not selected")]
    NotSelected(PlayerId),
}

/// The ordered set of players chosen for comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<PlayerId>,
    max_players: usize,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::new(DEFAULT_MAX_PLAYERS)
    }
}

impl Selection {
    pub fn new(max_players: usize) -> Self {
        Selection {
            ids: Vec::with_capacity(max_players),
            max_players,
        }
    }

    pub fn ids(&self) -> &[PlayerId] {
        &self.ids
    }

    pub fn max_players(&self) -> usize {
        self.max_players
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= self.max_players
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.ids.contains(&id)
    }

    pub fn add(&mut self, id: PlayerId) -> Result<(), SelectionError> {
        if self.contains(id) {
            return Err(SelectionError::Duplicate(id));
        }
        if self.is_full() {
            return Err(SelectionError::Full {
                max: self.max_players,
            });
        }
        self.ids.push(id);
        Ok(())
    }

    pub fn remove(&mut self, id: PlayerId) -> Result<(), SelectionError> {
        let pos = self
            .ids
            .iter()
            .position(|&x| x == id)
            .ok_or(SelectionError::NotSelected(id))?;
        self.ids.remove(pos);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Fill the remaining slots with random players from `pool` that are not
    /// already selected. Returns how many were added.
    pub fn randomize_fill<R: Rng + ?Sized>(&mut self, pool: &[Prospect], rng: &mut R) -> usize {
        let open = self.max_players.saturating_sub(self.ids.len());
        let candidates: Vec<PlayerId> = pool
            .iter()
            .map(Prospect::id)
            .filter(|id| !self.contains(*id))
            .collect();
        let picked: Vec<PlayerId> = candidates.choose_multiple(rng, open).copied().collect();
        debug!(
            "random fill picked {} of {} candidates",
            picked.len(),
            candidates.len()
        );
        self.ids.extend(&picked);
        picked.len()
    }

    /// Selected prospects in selection order. Ids missing from `pool` are
    /// skipped.
    pub fn resolve<'a>(&self, pool: &'a [Prospect]) -> Vec<&'a Prospect> {
        self.ids
            .iter()
            .filter_map(|id| pool.iter().find(|p| p.id() == *id))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Comparison table
// ---------------------------------------------------------------------------

/// One compared quantity across the selected players.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub label: String,
    pub unit: Option<&'static str>,
    /// One value per player, in selection order.
    pub values: Vec<Option<f64>>,
    /// Index of the best value; ties go to the earliest player.
    pub best: Option<usize>,
}

impl ComparisonRow {
    fn new(
        label: impl Into<String>,
        unit: Option<&'static str>,
        values: Vec<Option<f64>>,
        extremum: Extremum,
    ) -> Self {
        let best = best_index(&values, extremum);
        ComparisonRow {
            label: label.into(),
            unit,
            values,
            best,
        }
    }
}

/// Everything the compare view shows.
#[derive(Debug, Clone)]
pub struct Comparison<'a> {
    pub players: Vec<&'a Prospect>,
    pub measurements: Vec<ComparisonRow>,
    /// One row per scout plus a trailing average row.
    pub scout_ranks: Vec<ComparisonRow>,
    pub season_stats: Vec<ComparisonRow>,
    pub attributes: Vec<AttributeVector>,
    pub podium: Option<Podium<'a>>,
}

impl<'a> Comparison<'a> {
    pub fn build(players: &[&'a Prospect], table: &CompetitionTable) -> Self {
        let averages: Vec<_> = players.iter().map(|p| p.season_averages()).collect();

        let measurements = MeasurementKind::ALL
            .iter()
            .map(|&kind| {
                ComparisonRow::new(
                    kind.label(),
                    Some(kind.unit()),
                    players.iter().map(|p| p.measurements.get(kind)).collect(),
                    Extremum::Max,
                )
            })
            .collect();

        let mut scout_ranks: Vec<ComparisonRow> = Scout::ALL
            .iter()
            .map(|&scout| {
                ComparisonRow::new(
                    scout.label(),
                    None,
                    players
                        .iter()
                        .map(|p| p.scout_ranks.get(scout).map(f64::from))
                        .collect(),
                    Extremum::Min,
                )
            })
            .collect();
        scout_ranks.push(ComparisonRow::new(
            "Average",
            None,
            players.iter().map(|p| average_rank(&p.scout_ranks)).collect(),
            Extremum::Min,
        ));

        let season_stats = COMPARED_STATS
            .iter()
            .map(|&key| {
                ComparisonRow::new(
                    key,
                    None,
                    averages.iter().map(|a| a.get(key)).collect(),
                    Extremum::Max,
                )
            })
            .collect();

        Comparison {
            players: players.to_vec(),
            measurements,
            scout_ranks,
            season_stats,
            attributes: averages.iter().map(normalize_attributes).collect(),
            podium: Podium::build(players, table),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
