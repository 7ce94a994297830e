// Snapshot decoding: the one JSON document every view is computed from.
//
// The source is loosely typed. Decoding validates every record into the strict
// model types: records without a usable `playerId` are skipped, and fields
// holding the wrong kind of value are dropped so they behave exactly like
// absent fields downstream.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::model::{
    stat, MeasurementRecord, Measurements, PlayerBio, PlayerId, Scout, ScoutRankingRecord,
    ScoutRanks, SeasonStatLine, StatLine,
};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Everything loaded from one snapshot, held immutable for the session.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub bios: Vec<PlayerBio>,
    pub season_logs: Vec<SeasonStatLine>,
    pub measurements: Vec<MeasurementRecord>,
    pub scout_rankings: Vec<ScoutRankingRecord>,
    pub report: DecodeReport,
}

/// Counts of what the decoder refused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeReport {
    /// Whole records skipped (non-object entry, missing id or name).
    pub records_skipped: usize,
    /// Individual fields dropped for holding a malformed value.
    pub fields_dropped: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("invalid snapshot JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("snapshot contains no valid bio records")]
    NoPlayers,
}

// ---------------------------------------------------------------------------
// Raw document
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSnapshot {
    #[serde(default)]
    bio: Vec<Value>,
    #[serde(default)]
    season_logs: Vec<Value>,
    #[serde(default)]
    measurements: Vec<Value>,
    #[serde(default)]
    scout_rankings: Vec<Value>,
}

/// Season log fields that tag a line rather than measure anything.
const SEASON_TAG_FIELDS: &[&str] = &["playerId", "Season", "League", "Team", "age"];

/// Stats that must be numeric when present; a string here is malformed data
/// rather than a descriptive tag.
const NUMERIC_STATS: &[&str] = &[
    stat::PTS,
    stat::TRB,
    stat::AST,
    stat::BLK,
    stat::STL,
    stat::MP,
    stat::EFG_PCT,
];

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

impl Snapshot {
    /// Decode a snapshot document.
    ///
    /// Fails only when the text is not a JSON object of arrays or when no bio
    /// record survives validation; everything finer-grained degrades to
    /// absent data and is tallied in [`Snapshot::report`].
    pub fn from_json(text: &str) -> Result<Snapshot, SnapshotError> {
        let raw: RawSnapshot = serde_json::from_str(text)?;
        let mut decoder = Decoder::default();

        let bios = decoder.collect(&raw.bio, "bio", Decoder::bio);
        let season_logs = decoder.collect(&raw.season_logs, "seasonLogs", Decoder::season_line);
        let measurements = decoder.collect(&raw.measurements, "measurements", Decoder::measurement);
        let scout_rankings =
            decoder.collect(&raw.scout_rankings, "scoutRankings", Decoder::scout_ranking);

        if bios.is_empty() {
            return Err(SnapshotError::NoPlayers);
        }

        warn_duplicate_ids(&bios);

        let report = decoder.report;
        if report.records_skipped > 0 || report.fields_dropped > 0 {
            warn!(
                "snapshot decoded with {} skipped records and {} dropped fields",
                report.records_skipped, report.fields_dropped
            );
        }
        info!(
            "snapshot decoded: {} bios, {} season lines, {} measurement rows, {} scout rows",
            bios.len(),
            season_logs.len(),
            measurements.len(),
            scout_rankings.len()
        );

        Ok(Snapshot {
            bios,
            season_logs,
            measurements,
            scout_rankings,
            report,
        })
    }
}

fn warn_duplicate_ids(bios: &[PlayerBio]) {
    let mut seen = std::collections::HashSet::new();
    for bio in bios {
        if !seen.insert(bio.player_id) {
            warn!("duplicate bio record for playerId {}", bio.player_id);
        }
    }
}

#[derive(Debug, Default)]
struct Decoder {
    report: DecodeReport,
}

impl Decoder {
    fn skip(&mut self, collection: &str, reason: &str) {
        warn!("skipping {collection} record: {reason}");
        self.report.records_skipped += 1;
    }

    fn drop_field(&mut self, id: PlayerId, key: &str, value: &Value) {
        debug!("playerId {id}: dropping malformed field {key:?} = {value}");
        self.report.fields_dropped += 1;
    }

    /// Decode every entry of one collection, skipping the ones that fail.
    fn collect<T>(
        &mut self,
        values: &[Value],
        collection: &str,
        decode: impl Fn(&mut Self, (PlayerId, &Map<String, Value>)) -> Option<T>,
    ) -> Vec<T> {
        let mut out = Vec::with_capacity(values.len());
        for value in values {
            if let Some(record) = self.record(value, collection) {
                if let Some(item) = decode(self, record) {
                    out.push(item);
                }
            }
        }
        out
    }

    /// Unwrap one collection entry into an object with a valid id.
    fn record<'v>(
        &mut self,
        value: &'v Value,
        collection: &str,
    ) -> Option<(PlayerId, &'v Map<String, Value>)> {
        let Some(obj) = value.as_object() else {
            self.skip(collection, "entry is not an object");
            return None;
        };
        match obj.get("playerId").and_then(player_id) {
            Some(id) => Some((id, obj)),
            None => {
                self.skip(collection, "missing or non-numeric playerId");
                None
            }
        }
    }

    fn number(&mut self, id: PlayerId, obj: &Map<String, Value>, key: &str) -> Option<f64> {
        match obj.get(key) {
            None | Some(Value::Null) => None,
            Some(value) => match value.as_f64().filter(|v| v.is_finite()) {
                Some(n) => Some(n),
                None => {
                    self.drop_field(id, key, value);
                    None
                }
            },
        }
    }

    fn text(&mut self, id: PlayerId, obj: &Map<String, Value>, key: &str) -> Option<String> {
        match obj.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => non_empty(s.trim()),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(value) => {
                self.drop_field(id, key, value);
                None
            }
        }
    }

    fn date(&mut self, id: PlayerId, obj: &Map<String, Value>, key: &str) -> Option<NaiveDate> {
        let value = obj.get(key)?;
        if value.is_null() {
            return None;
        }
        let parsed = value.as_str().and_then(|s| parse_date(s.trim()));
        if parsed.is_none() {
            self.drop_field(id, key, value);
        }
        parsed
    }

    fn bio(&mut self, (id, obj): (PlayerId, &Map<String, Value>)) -> Option<PlayerBio> {
        let Some(name) = obj
            .get("name")
            .and_then(Value::as_str)
            .and_then(|s| non_empty(s.trim()))
        else {
            self.skip("bio", "missing name");
            return None;
        };
        let current_team = self
            .text(id, obj, "currentTeam")
            .and_then(|t| non_empty(clean_team(&t)));
        let headshot = self
            .text(id, obj, "headshot")
            .or_else(|| self.text(id, obj, "photoUrl"));
        Some(PlayerBio {
            player_id: id,
            name,
            current_team,
            position: self.text(id, obj, "position"),
            height: self.number(id, obj, "height"),
            weight: self.number(id, obj, "weight"),
            birth_date: self.date(id, obj, "birthDate"),
            league: self.text(id, obj, "league"),
            league_type: self.text(id, obj, "leagueType"),
            headshot,
        })
    }

    fn season_line(
        &mut self,
        (id, obj): (PlayerId, &Map<String, Value>),
    ) -> Option<SeasonStatLine> {
        let mut stats = StatLine::new();
        for (key, value) in obj {
            if SEASON_TAG_FIELDS.contains(&key.as_str()) {
                continue;
            }
            match value {
                Value::Null => {}
                Value::Number(_) => {
                    if !value.as_f64().is_some_and(|n| stats.insert(key.as_str(), n)) {
                        self.drop_field(id, key, value);
                    }
                }
                _ if NUMERIC_STATS.contains(&key.as_str()) => self.drop_field(id, key, value),
                _ => {}
            }
        }
        Some(SeasonStatLine {
            player_id: id,
            season: self.text(id, obj, "Season"),
            league: self.text(id, obj, "League"),
            stats,
        })
    }

    fn measurement(
        &mut self,
        (id, obj): (PlayerId, &Map<String, Value>),
    ) -> Option<MeasurementRecord> {
        let mut measurements = Measurements::new();
        for (key, value) in obj {
            if key == "playerId" || value.is_null() {
                continue;
            }
            match value.as_f64() {
                Some(n) if measurements.insert(key.as_str(), n) => {}
                _ => self.drop_field(id, key, value),
            }
        }
        Some(MeasurementRecord {
            player_id: id,
            measurements,
        })
    }

    fn scout_ranking(
        &mut self,
        (id, obj): (PlayerId, &Map<String, Value>),
    ) -> Option<ScoutRankingRecord> {
        let mut ranks = ScoutRanks::new();
        for scout in Scout::ALL {
            let Some(value) = obj.get(scout.column()) else {
                continue;
            };
            if value.is_null() {
                continue;
            }
            match value.as_f64().and_then(rank) {
                Some(r) => ranks.set(scout, Some(r)),
                None => self.drop_field(id, scout.column(), value),
            }
        }
        for key in obj.keys() {
            if key != "playerId" && Scout::from_column(key).is_none() {
                debug!("playerId {id}: ignoring unknown scout column {key:?}");
            }
        }
        Some(ScoutRankingRecord {
            player_id: id,
            ranks,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn player_id(value: &Value) -> Option<PlayerId> {
    if let Some(id) = value.as_u64() {
        return Some(id);
    }
    value
        .as_f64()
        .filter(|v| v.is_finite() && *v >= 0.0 && v.fract() == 0.0)
        .map(|v| v as PlayerId)
}

/// A scout rank must be a whole number of at least 1.
fn rank(value: f64) -> Option<u32> {
    if value.is_finite() && value >= 1.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) {
        Some(value as u32)
    } else {
        None
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Team names in the source sometimes carry a leading `|` separator.
fn clean_team(raw: &str) -> &str {
    raw.trim_start_matches('|').trim()
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
