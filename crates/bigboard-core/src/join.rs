// Record joiner: left join from bios to season logs, measurements and scout
// rankings.

use crate::model::{
    MeasurementRecord, Measurements, PlayerBio, PlayerId, Prospect, ScoutRankingRecord,
    ScoutRanks, SeasonStatLine,
};
use crate::snapshot::Snapshot;

/// Build the composite for one player.
///
/// Season logs are filtered (zero or more, source order kept); measurements
/// and scout rankings take the first match and default to empty. Returns
/// `None` only when `player_id` has no bio.
pub fn join(
    player_id: PlayerId,
    bios: &[PlayerBio],
    season_logs: &[SeasonStatLine],
    measurements: &[MeasurementRecord],
    scout_rankings: &[ScoutRankingRecord],
) -> Option<Prospect> {
    let bio = bios.iter().find(|b| b.player_id == player_id)?;
    Some(assemble(bio, season_logs, measurements, scout_rankings))
}

/// Join every bio in source order. Each bio yields exactly one prospect.
pub fn join_all(snapshot: &Snapshot) -> Vec<Prospect> {
    snapshot
        .bios
        .iter()
        .map(|bio| {
            assemble(
                bio,
                &snapshot.season_logs,
                &snapshot.measurements,
                &snapshot.scout_rankings,
            )
        })
        .collect()
}

fn assemble(
    bio: &PlayerBio,
    season_logs: &[SeasonStatLine],
    measurements: &[MeasurementRecord],
    scout_rankings: &[ScoutRankingRecord],
) -> Prospect {
    let id = bio.player_id;
    Prospect {
        bio: bio.clone(),
        season_logs: season_logs
            .iter()
            .filter(|l| l.player_id == id)
            .cloned()
            .collect(),
        measurements: measurements
            .iter()
            .find(|m| m.player_id == id)
            .map(|m| m.measurements.clone())
            .unwrap_or_else(Measurements::new),
        scout_ranks: scout_rankings
            .iter()
            .find(|r| r.player_id == id)
            .map(|r| r.ranks)
            .unwrap_or_else(ScoutRanks::new),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
