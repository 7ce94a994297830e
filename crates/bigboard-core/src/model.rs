// Prospect data model: bios, season stat lines, measurements, scout ranks and
// the joined per-player composite.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::stats;

/// Numeric player identifier shared by every record collection.
pub type PlayerId = u64;

// ---------------------------------------------------------------------------
// Stat keys
// ---------------------------------------------------------------------------

/// Season stat column names as they appear in the source snapshot.
pub mod stat {
    pub const PTS: &str = "PTS";
    pub const TRB: &str = "TRB";
    pub const AST: &str = "AST";
    pub const BLK: &str = "BLK";
    pub const STL: &str = "STL";
    pub const MP: &str = "MP";
    pub const EFG_PCT: &str = "eFG%";
}

// ---------------------------------------------------------------------------
// Bio
// ---------------------------------------------------------------------------

/// Identity and descriptive attributes for one prospect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerBio {
    pub player_id: PlayerId,
    pub name: String,
    pub current_team: Option<String>,
    pub position: Option<String>,
    /// Inches.
    pub height: Option<f64>,
    /// Pounds.
    pub weight: Option<f64>,
    pub birth_date: Option<NaiveDate>,
    pub league: Option<String>,
    pub league_type: Option<String>,
    pub headshot: Option<String>,
}

impl PlayerBio {
    /// A bio with only the required identity fields set.
    pub fn new(player_id: PlayerId, name: impl Into<String>) -> Self {
        PlayerBio {
            player_id,
            name: name.into(),
            current_team: None,
            position: None,
            height: None,
            weight: None,
            birth_date: None,
            league: None,
            league_type: None,
            headshot: None,
        }
    }

    /// League label for display: the league, else the league type.
    pub fn league_label(&self) -> Option<&str> {
        self.league.as_deref().or(self.league_type.as_deref())
    }
}

// ---------------------------------------------------------------------------
// Stat lines
// ---------------------------------------------------------------------------

/// A set of named numeric stats. Only finite values are ever stored, so an
/// absent key is the single representation of "missing or malformed".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatLine(BTreeMap<String, f64>);

impl StatLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a stat. Non-finite values are refused; returns whether the
    /// value was stored.
    pub fn insert(&mut self, key: impl Into<String>, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        self.0.insert(key.into(), value);
        true
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    /// The stat value, or 0.0 when absent. For arithmetic only, never display.
    pub fn or_zero(&self, key: &str) -> f64 {
        self.get(key).unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Per-stat average across several lines, each line weighted equally.
    ///
    /// A line that lacks a stat is left out of that stat's denominator.
    pub fn average<'a, I>(lines: I) -> StatLine
    where
        I: IntoIterator<Item = &'a StatLine>,
    {
        let mut columns: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        for line in lines {
            for (key, value) in line.iter() {
                columns.entry(key).or_default().push(value);
            }
        }
        let mut averaged = StatLine::new();
        for (key, values) in columns {
            if let Some(m) = stats::mean(values) {
                averaged.insert(key, m);
            }
        }
        averaged
    }
}

impl FromIterator<(String, f64)> for StatLine {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        let mut line = StatLine::new();
        for (key, value) in iter {
            line.insert(key, value);
        }
        line
    }
}

/// One season (or league stint) of stats for one player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonStatLine {
    pub player_id: PlayerId,
    pub season: Option<String>,
    pub league: Option<String>,
    pub stats: StatLine,
}

// ---------------------------------------------------------------------------
// Measurements
// ---------------------------------------------------------------------------

/// Combine-style measurements compared across players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeasurementKind {
    Height,
    Weight,
    Wingspan,
    StandingReach,
    VerticalLeap,
    BenchPress,
}

impl MeasurementKind {
    pub const ALL: [MeasurementKind; 6] = [
        MeasurementKind::Height,
        MeasurementKind::Weight,
        MeasurementKind::Wingspan,
        MeasurementKind::StandingReach,
        MeasurementKind::VerticalLeap,
        MeasurementKind::BenchPress,
    ];

    /// Snapshot field name.
    pub fn key(&self) -> &'static str {
        match self {
            MeasurementKind::Height => "height",
            MeasurementKind::Weight => "weight",
            MeasurementKind::Wingspan => "wingspan",
            MeasurementKind::StandingReach => "standingReach",
            MeasurementKind::VerticalLeap => "verticalLeap",
            MeasurementKind::BenchPress => "benchPress",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MeasurementKind::Height => "Height",
            MeasurementKind::Weight => "Weight",
            MeasurementKind::Wingspan => "Wingspan",
            MeasurementKind::StandingReach => "Standing Reach",
            MeasurementKind::VerticalLeap => "Vertical Leap",
            MeasurementKind::BenchPress => "Bench Press",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            MeasurementKind::Weight => "lbs",
            MeasurementKind::BenchPress => "reps",
            _ => "in",
        }
    }
}

/// A player's measurements. Absent means "not measured", which is distinct
/// from a measured zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Measurements(StatLine);

impl Measurements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.0.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: f64) -> bool {
        self.0.insert(key, value)
    }

    pub fn get(&self, kind: MeasurementKind) -> Option<f64> {
        self.0.get(kind.key())
    }

    pub fn get_key(&self, key: &str) -> Option<f64> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Measurement row keyed by player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementRecord {
    pub player_id: PlayerId,
    pub measurements: Measurements,
}

// ---------------------------------------------------------------------------
// Scout rankings
// ---------------------------------------------------------------------------

/// The fixed panel of scouts whose big boards are aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Scout {
    Espn,
    SamVecenie,
    KevinOConnor,
    KyleBoone,
    GaryParrish,
}

impl Scout {
    pub const ALL: [Scout; 5] = [
        Scout::Espn,
        Scout::SamVecenie,
        Scout::KevinOConnor,
        Scout::KyleBoone,
        Scout::GaryParrish,
    ];

    /// Snapshot column holding this scout's rank.
    pub fn column(&self) -> &'static str {
        match self {
            Scout::Espn => "ESPN Rank",
            Scout::SamVecenie => "Sam Vecenie Rank",
            Scout::KevinOConnor => "Kevin O'Connor Rank",
            Scout::KyleBoone => "Kyle Boone Rank",
            Scout::GaryParrish => "Gary Parrish Rank",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Scout::Espn => "ESPN",
            Scout::SamVecenie => "Sam Vecenie",
            Scout::KevinOConnor => "Kevin O'Connor",
            Scout::KyleBoone => "Kyle Boone",
            Scout::GaryParrish => "Gary Parrish",
        }
    }

    pub fn from_column(column: &str) -> Option<Self> {
        Scout::ALL.into_iter().find(|s| s.column() == column)
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// One optional 1-based rank per scout. Lower is better.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoutRanks {
    ranks: [Option<u32>; 5],
}

impl ScoutRanks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, scout: Scout, rank: u32) -> Self {
        self.set(scout, Some(rank));
        self
    }

    pub fn set(&mut self, scout: Scout, rank: Option<u32>) {
        self.ranks[scout.index()] = rank;
    }

    pub fn get(&self, scout: Scout) -> Option<u32> {
        self.ranks[scout.index()]
    }

    /// Scouts that ranked the player, in panel order.
    pub fn present(&self) -> impl Iterator<Item = (Scout, u32)> + '_ {
        Scout::ALL
            .into_iter()
            .filter_map(move |s| self.get(s).map(|rank| (s, rank)))
    }

    /// Present ranks as floats, for averaging.
    pub fn values(&self) -> Vec<f64> {
        self.present().map(|(_, rank)| f64::from(rank)).collect()
    }

    pub fn count(&self) -> usize {
        self.ranks.iter().filter(|r| r.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// Scout ranking row keyed by player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoutRankingRecord {
    pub player_id: PlayerId,
    pub ranks: ScoutRanks,
}

// ---------------------------------------------------------------------------
// Composite
// ---------------------------------------------------------------------------

/// A bio joined with its season logs, measurements and scout ranks.
///
/// Nested collections are always present, possibly empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prospect {
    pub bio: PlayerBio,
    pub season_logs: Vec<SeasonStatLine>,
    pub measurements: Measurements,
    pub scout_ranks: ScoutRanks,
}

impl Prospect {
    pub fn id(&self) -> PlayerId {
        self.bio.player_id
    }

    pub fn name(&self) -> &str {
        &self.bio.name
    }

    /// Season stats averaged across every season line.
    pub fn season_averages(&self) -> StatLine {
        StatLine::average(self.season_logs.iter().map(|l| &l.stats))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_line_refuses_non_finite() {
        let mut line = StatLine::new();
        assert!(!line.insert("PTS", f64::NAN));
        assert!(!line.insert("PTS", f64::INFINITY));
        assert!(line.insert("PTS", 12.5));
        assert_eq!(line.get("PTS"), Some(12.5));
    }

    #[test]
    fn stat_line_average_weights_lines_equally() {
        let a = StatLine::new().with("PTS", 10.0).with("AST", 4.0);
        let b = StatLine::new().with("PTS", 20.0);
        let avg = StatLine::average([&a, &b]);
        assert_eq!(avg.get("PTS"), Some(15.0));
        // AST only present in one line: that line alone defines the average.
        assert_eq!(avg.get("AST"), Some(4.0));
        assert_eq!(avg.get("TRB"), None);
    }

    #[test]
    fn stat_line_average_of_nothing_is_empty() {
        let avg = StatLine::average(std::iter::empty());
        assert!(avg.is_empty());
    }

    #[test]
    fn measurement_zero_is_not_absent() {
        let m = Measurements::new().with("benchPress", 0.0);
        assert_eq!(m.get(MeasurementKind::BenchPress), Some(0.0));
        assert_eq!(m.get(MeasurementKind::Wingspan), None);
    }

    #[test]
    fn scout_columns_round_trip() {
        for scout in Scout::ALL {
            assert_eq!(Scout::from_column(scout.column()), Some(scout));
        }
        assert_eq!(Scout::from_column("Unknown Rank"), None);
    }

    #[test]
    fn scout_ranks_present_in_panel_order() {
        let ranks = ScoutRanks::new()
            .with(Scout::GaryParrish, 9)
            .with(Scout::Espn, 3);
        let present: Vec<_> = ranks.present().collect();
        assert_eq!(present, vec![(Scout::Espn, 3), (Scout::GaryParrish, 9)]);
        assert_eq!(ranks.count(), 2);
        assert_eq!(ranks.values(), vec![3.0, 9.0]);
    }

    #[test]
    fn league_label_falls_back_to_league_type() {
        let mut bio = PlayerBio::new(1, "A");
        assert_eq!(bio.league_label(), None);
        bio.league_type = Some("NCAA D-I".into());
        assert_eq!(bio.league_label(), Some("NCAA D-I"));
        bio.league = Some("SEC".into());
        assert_eq!(bio.league_label(), Some("SEC"));
    }
}
