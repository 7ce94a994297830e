// Attribute normalization for radar charts.
//
// Maps averaged season stats onto five 0-100 attribute scores using fixed
// ceilings chosen so an elite college stat line lands near 100.

use serde::Serialize;

use crate::model::{stat, StatLine};
use crate::stats::round_to_three;

/// Points per game that scores 100.
pub const SCORING_CEILING: f64 = 30.0;
/// Assists per game that scores 100.
pub const PLAYMAKING_CEILING: f64 = 10.0;
/// Rebounds per game that scores 100.
pub const REBOUNDING_CEILING: f64 = 15.0;
/// Blocks plus steals per game that scores 100.
pub const DEFENSE_CEILING: f64 = 5.0;
/// Upper bound of every attribute axis.
pub const FULL_MARK: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AttributeKind {
    Scoring,
    Playmaking,
    Rebounding,
    Defense,
    Efficiency,
}

impl AttributeKind {
    pub const ALL: [AttributeKind; 5] = [
        AttributeKind::Scoring,
        AttributeKind::Playmaking,
        AttributeKind::Rebounding,
        AttributeKind::Defense,
        AttributeKind::Efficiency,
    ];

    pub fn subject(&self) -> &'static str {
        match self {
            AttributeKind::Scoring => "Scoring",
            AttributeKind::Playmaking => "Playmaking",
            AttributeKind::Rebounding => "Rebounding",
            AttributeKind::Defense => "Defense",
            AttributeKind::Efficiency => "Efficiency",
        }
    }

    /// Unbounded score for this attribute. Missing stats count as zero.
    fn raw_score(&self, stats: &StatLine) -> f64 {
        match self {
            AttributeKind::Scoring => stats.or_zero(stat::PTS) / SCORING_CEILING * 100.0,
            AttributeKind::Playmaking => stats.or_zero(stat::AST) / PLAYMAKING_CEILING * 100.0,
            AttributeKind::Rebounding => stats.or_zero(stat::TRB) / REBOUNDING_CEILING * 100.0,
            AttributeKind::Defense => {
                (stats.or_zero(stat::BLK) + stats.or_zero(stat::STL)) / DEFENSE_CEILING * 100.0
            }
            // eFG% is already on a percentage scale.
            AttributeKind::Efficiency => stats.or_zero(stat::EFG_PCT),
        }
    }
}

/// One radar axis value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Attribute {
    pub kind: AttributeKind,
    pub value: f64,
    pub full_mark: f64,
}

/// The five attributes, always in [`AttributeKind::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AttributeVector([Attribute; 5]);

impl AttributeVector {
    pub fn get(&self, kind: AttributeKind) -> f64 {
        self.0
            .iter()
            .find(|a| a.kind == kind)
            .map(|a| a.value)
            .unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.0.iter()
    }
}

/// Normalize averaged season stats into the attribute vector.
///
/// Every value is clamped to `[0, FULL_MARK]` so radar axes stay bounded, then
/// rounded to three decimals.
pub fn normalize_attributes(stats: &StatLine) -> AttributeVector {
    AttributeVector(AttributeKind::ALL.map(|kind| Attribute {
        kind,
        value: round_to_three(kind.raw_score(stats).clamp(0.0, FULL_MARK)),
        full_mark: FULL_MARK,
    }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
