// Integration tests for the prospect engines.
//
// Decode a snapshot, join it and run each derived view over the result, the
// way the binary does.

use bigboard_core::attributes::{normalize_attributes, AttributeKind};
use bigboard_core::board::{BigBoard, BoardFilter, ChipTone};
use bigboard_core::compare::{Comparison, Selection};
use bigboard_core::consensus::{
    average_rank, consensus_order, format_average_rank, scout_outliers, BoardSummary, OutlierFlag,
};
use bigboard_core::join::{join, join_all};
use bigboard_core::model::{MeasurementKind, Prospect, Scout};
use bigboard_core::performance::{prospect_score, CompetitionTable, Podium};
use bigboard_core::session::{ColorMode, Session};
use bigboard_core::snapshot::Snapshot;

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ===========================================================================
// Test helpers
// ===========================================================================

/// Fixture directory, relative to the crate root (the cwd for `cargo test`).
const FIXTURES: &str = "tests/fixtures";

fn load_fixture() -> Snapshot {
    let text = std::fs::read_to_string(format!("{FIXTURES}/players.json"))
        .expect("fixture players.json should exist");
    Snapshot::from_json(&text).expect("fixture should decode")
}

fn prospects() -> Vec<Prospect> {
    join_all(&load_fixture())
}

fn find(prospects: &[Prospect], id: u64) -> &Prospect {
    prospects
        .iter()
        .find(|p| p.id() == id)
        .expect("player present")
}

fn draft_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 25).unwrap()
}

// ===========================================================================
// Single-player scenario
// ===========================================================================

#[test]
fn minimal_snapshot_end_to_end() {
    let json = r#"{
        "bio": [{"playerId": 1, "name": "A"}],
        "seasonLogs": [{"playerId": 1, "PTS": 20, "TRB": 5, "AST": 3, "BLK": 0.5,
                        "STL": 1, "MP": 30, "eFG%": 55}],
        "scoutRankings": [{"playerId": 1, "ESPN Rank": 3, "Sam Vecenie Rank": 5}]
    }"#;
    let snapshot = Snapshot::from_json(json).unwrap();
    let prospect = join(
        1,
        &snapshot.bios,
        &snapshot.season_logs,
        &snapshot.measurements,
        &snapshot.scout_rankings,
    )
    .unwrap();

    assert_eq!(average_rank(&prospect.scout_ranks), Some(4.0));
    assert_eq!(format_average_rank(average_rank(&prospect.scout_ranks)), "4.0");

    let attrs = normalize_attributes(&prospect.season_averages());
    assert!((attrs.get(AttributeKind::Scoring) - 66.667).abs() < 1e-9);
    assert!((attrs.get(AttributeKind::Playmaking) - 30.0).abs() < 1e-9);
    assert!((attrs.get(AttributeKind::Rebounding) - 33.333).abs() < 1e-9);
    assert!((attrs.get(AttributeKind::Defense) - 30.0).abs() < 1e-9);
    assert!((attrs.get(AttributeKind::Efficiency) - 55.0).abs() < 1e-9);

    // No league at all: "Other" multiplier.
    let score = prospect_score(&prospect, &CompetitionTable::default());
    assert!((score - 66.8 * 0.5).abs() < 1e-9);
}

#[test]
fn unmatched_bio_joins_to_empty_collections() {
    let snapshot =
        Snapshot::from_json(r#"{"bio": [{"playerId": 9, "name": "Lonely"}]}"#).unwrap();
    let prospects = join_all(&snapshot);
    assert_eq!(prospects.len(), 1);
    let p = &prospects[0];
    assert!(p.season_logs.is_empty());
    assert!(p.measurements.is_empty());
    assert!(p.scout_ranks.is_empty());
    assert!(p.season_averages().is_empty());
}

// ===========================================================================
// Fixture snapshot
// ===========================================================================

#[test]
fn fixture_decode_report() {
    let snapshot = load_fixture();
    assert_eq!(snapshot.bios.len(), 5);
    assert_eq!(snapshot.report.records_skipped, 1);
    // Bailey's height and eFG%, Traore's fractional rank.
    assert_eq!(snapshot.report.fields_dropped, 3);
}

#[test]
fn fixture_fields_are_cleaned() {
    let players = prospects();
    let harper = find(&players, 2);
    assert_eq!(harper.bio.current_team.as_deref(), Some("Rutgers"));
    assert_eq!(harper.bio.birth_date, NaiveDate::from_ymd_opt(2006, 3, 2));

    let flagg = find(&players, 1);
    assert_eq!(
        flagg.bio.headshot.as_deref(),
        Some("https://img.example.com/flagg.png")
    );
    assert_eq!(flagg.measurements.get(MeasurementKind::BenchPress), Some(0.0));

    let bailey = find(&players, 3);
    assert_eq!(bailey.bio.height, None);
    assert_eq!(bailey.season_averages().get("eFG%"), None);

    let traore = find(&players, 4);
    assert_eq!(traore.scout_ranks.get(Scout::SamVecenie), None);
    assert_eq!(traore.scout_ranks.count(), 1);
}

#[test]
fn fixture_consensus_order() {
    let players = prospects();
    let ids: Vec<_> = consensus_order(&players).iter().map(|p| p.id()).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[test]
fn fixture_outliers() {
    let players = prospects();
    let flags = scout_outliers(&find(&players, 3).scout_ranks);
    assert!(flags.contains(&(Scout::SamVecenie, OutlierFlag::Unfavorable)));
    assert_eq!(
        flags
            .iter()
            .filter(|(_, f)| *f == OutlierFlag::None)
            .count(),
        3
    );
    // One surviving rank only.
    let traore = scout_outliers(&find(&players, 4).scout_ranks);
    assert_eq!(traore, vec![(Scout::Espn, OutlierFlag::InsufficientData)]);
}

#[test]
fn fixture_summary() {
    let summary = BoardSummary::compute(&prospects(), 3);
    assert_eq!(
        summary.top_prospects,
        vec!["Cooper Flagg", "Dylan Harper", "Ace Bailey"]
    );
    // Variances 0.0, 0.16 and 4.25 averaged.
    assert!((summary.average_scout_variance - 4.41 / 3.0).abs() < 1e-9);
    assert_eq!(summary.formatted_variance(), "1.5");
    assert_eq!(summary.ranked_players, 4);
    assert_eq!(summary.total_players, 5);
}

#[test]
fn fixture_multi_season_average() {
    let players = prospects();
    let avg = find(&players, 4).season_averages();
    assert!((avg.get("PTS").unwrap() - 9.5).abs() < 1e-9);
    assert!((avg.get("AST").unwrap() - 4.5).abs() < 1e-9);
    // Only one of the two seasons recorded steals.
    assert!((avg.get("STL").unwrap() - 0.9).abs() < 1e-9);
    assert_eq!(avg.get("BLK"), None);
}

#[test]
fn fixture_board_filters_and_chips() {
    let players = prospects();
    let board = BigBoard::build(&players, &BoardFilter::default(), draft_day());
    assert_eq!(board.rows.len(), 5);
    assert_eq!(
        board.teams,
        vec!["Duke", "Rutgers", "Saint-Quentin", "Overtime Elite"]
    );
    assert_eq!(board.rows[0].height, "6'9\"");
    assert_eq!(board.rows[4].average_rank_label(), "-");
    assert_eq!(board.rows[4].age, "N/A");

    let flagg_pts = &board.rows[0].chips[0];
    assert_eq!(flagg_pts.tone, ChipTone::High);

    let rutgers = BigBoard::build(
        &players,
        &BoardFilter {
            search: String::new(),
            team: Some("Rutgers".into()),
        },
        draft_day(),
    );
    let ids: Vec<_> = rutgers.rows.iter().map(|r| r.prospect.id()).collect();
    assert_eq!(ids, vec![2, 3]);
}

#[test]
fn fixture_comparison_and_podium() {
    let players = prospects();
    let table = CompetitionTable::default();
    let selected: Vec<&Prospect> = vec![find(&players, 1), find(&players, 2), find(&players, 4)];
    let cmp = Comparison::build(&selected, &table);

    let wingspan = cmp
        .measurements
        .iter()
        .find(|r| r.label == "Wingspan")
        .unwrap();
    assert_eq!(wingspan.values, vec![Some(84.0), Some(82.5), None]);
    assert_eq!(wingspan.best, Some(0));

    let podium = cmp.podium.expect("three players make a podium");
    let places: Vec<_> = podium.slots.iter().map(|s| s.place).collect();
    assert_eq!(places, vec![2, 0, 1]);
    assert_eq!(podium.winner().unwrap().prospect.id(), 1);
    // Traore: LNB Pro A.
    let traore = podium.slots.iter().find(|s| s.prospect.id() == 4).unwrap();
    assert!((traore.multiplier - 0.89).abs() < 1e-12);

    let direct = Podium::build(&selected, &table).unwrap();
    assert_eq!(direct.slots.len(), 3);
}

#[test]
fn session_random_comparison_is_reproducible() {
    let players = prospects();
    let mut a = Session::default();
    let mut b = Session::default();
    a.selection
        .randomize_fill(&players, &mut StdRng::seed_from_u64(2025));
    b.selection
        .randomize_fill(&players, &mut StdRng::seed_from_u64(2025));
    assert_eq!(a.selection.ids(), b.selection.ids());
    assert_eq!(a.selection.len(), 4);
    assert_eq!(a.selection.resolve(&players).len(), 4);
    assert_eq!(a.color_mode, ColorMode::Light);

    let mut capped = Selection::new(2);
    capped.add(1).unwrap();
    assert!(capped.add(2).is_ok());
    assert!(capped.add(3).is_err());
}
