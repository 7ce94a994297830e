// Integration tests for the big board application.
//
// These run each command end-to-end against the fixture snapshot through the
// library crate's public API, the way the binary does.

use std::collections::BTreeMap;
use std::path::Path;

use bigboard_app::app::{App, AppError};
use bigboard_app::config::Config;
use bigboard_app::source::{fetch_snapshot, FetchError};
use bigboard_core::board::BoardFilter;
use bigboard_core::compare::SelectionError;
use bigboard_core::session::{ColorMode, ReportError};
use bigboard_core::snapshot::Snapshot;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ===========================================================================
// Test helpers
// ===========================================================================

const FIXTURES: &str = "tests/fixtures";

fn inline_config() -> Config {
    let mut multipliers = BTreeMap::new();
    multipliers.insert("OTE".to_string(), 0.70);
    Config {
        source: "players.json".into(),
        top_n: 3,
        max_players: 4,
        color_mode: ColorMode::Light,
        ansi: false,
        multipliers,
    }
}

async fn load_fixture() -> Snapshot {
    fetch_snapshot("players.json", Path::new(FIXTURES))
        .await
        .expect("fixture should load")
}

fn draft_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 25).unwrap()
}

async fn fixture_app() -> App {
    App::new(inline_config(), &load_fixture().await, draft_day())
}

// ===========================================================================
// Source
// ===========================================================================

#[tokio::test]
async fn fixture_loads_from_relative_path() {
    let snapshot = load_fixture().await;
    assert_eq!(snapshot.bios.len(), 5);
    assert_eq!(snapshot.report.records_skipped, 1);
}

#[tokio::test]
async fn shipped_sample_loads_from_workspace_root() {
    let workspace = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    let default_source = bigboard_app::config::DEFAULT_CONFIG
        .lines()
        .find_map(|line| line.strip_prefix("source = "))
        .map(|v| v.trim_matches('"'))
        .expect("default config names a source");
    let snapshot = fetch_snapshot(default_source, &workspace)
        .await
        .expect("sample snapshot should load");
    assert_eq!(snapshot.bios.len(), 5);
    assert_eq!(snapshot.report.records_skipped, 0);
    assert_eq!(snapshot.report.fields_dropped, 0);
}

#[tokio::test]
async fn missing_snapshot_fails_once() {
    let err = fetch_snapshot("does-not-exist.json", Path::new(FIXTURES))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Io { .. }));
}

// ===========================================================================
// Commands
// ===========================================================================

#[tokio::test]
async fn board_command_lists_in_consensus_order() {
    let app = fixture_app().await;
    let text = app.board(&BoardFilter::default());
    assert!(text.starts_with("Big Board (5 of 5 prospects)"));
    let flagg = text.find("Cooper Flagg").unwrap();
    let harper = text.find("Dylan Harper").unwrap();
    let sleeper = text.find("Unranked Sleeper").unwrap();
    assert!(flagg < harper && harper < sleeper);
    assert!(text.contains("PTS: 19.2"));
    assert!(text.contains("Teams: Duke, Rutgers, Saint-Quentin, Overtime Elite"));
}

#[tokio::test]
async fn board_command_with_empty_filter_result() {
    let app = fixture_app().await;
    let text = app.board(&BoardFilter {
        search: "zzz".into(),
        team: None,
    });
    assert!(text.contains("No players match the current filter."));
}

#[tokio::test]
async fn summary_command_uses_configured_top_n() {
    let app = fixture_app().await;
    let text = app.summary();
    assert!(text.contains("  1. Cooper Flagg\n  2. Dylan Harper\n  3. Ace Bailey"));
    assert!(!text.contains("Nolan Traore"));
    assert!(text.contains("Average scout variance: 1.5"));
}

#[tokio::test]
async fn profile_command_submits_and_shows_reports() {
    let mut app = fixture_app().await;
    let text = app
        .profile(3, Some("Vecenie"), Some("Tough shot diet"), Some(7))
        .unwrap();
    assert!(text.contains("Ace Bailey (#3)"));
    assert!(text.contains("Height: N/A"));
    assert!(text.contains("(low)"));
    assert!(text.contains("(Vecenie) 7/10  Tough shot diet"));

    let again = app.profile(3, None, None, None).unwrap();
    assert!(again.contains("Tough shot diet"));
    assert_eq!(app.session.reports_for(3).len(), 1);
}

#[tokio::test]
async fn profile_command_rejects_bad_input() {
    let mut app = fixture_app().await;
    assert!(matches!(
        app.profile(42, None, None, None),
        Err(AppError::UnknownPlayer(42))
    ));
    assert!(matches!(
        app.profile(1, None, Some("  "), None),
        Err(AppError::Report(ReportError::EmptyNotes))
    ));
    assert!(matches!(
        app.profile(1, None, Some("fine"), Some(11)),
        Err(AppError::Report(ReportError::RatingOutOfRange(11)))
    ));
    assert!(app.session.reports_for(1).is_empty());
}

#[tokio::test]
async fn profile_json_has_nested_collections() {
    let app = fixture_app().await;
    let text = app.profile_json(5).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["bio"]["name"], "Unranked Sleeper");
    assert_eq!(value["season_logs"].as_array().map(Vec::len), Some(0));
    assert!(value["measurements"]
        .as_object()
        .is_some_and(|m| m.is_empty()));
    assert!(matches!(app.profile_json(99), Err(AppError::UnknownPlayer(99))));
}

#[tokio::test]
async fn profile_uses_config_multiplier_override() {
    let mut app = fixture_app().await;
    let text = app.profile(5, None, None, None).unwrap();
    assert!(text.contains("(x0.70 competition)"));
    assert!(text.contains("Unranked"));
}

#[tokio::test]
async fn compare_command_by_ids() {
    let mut app = fixture_app().await;
    let mut rng = StdRng::seed_from_u64(1);
    let text = app.compare(&[1, 2, 4], None, &mut rng).unwrap();
    assert!(text.contains("Performance podium"));
    assert!(text.contains("1st Cooper Flagg"));
    assert!(text.contains("Wingspan"));
    assert_eq!(app.session.selection.ids(), &[1, 2, 4]);
}

#[tokio::test]
async fn compare_command_errors() {
    let mut app = fixture_app().await;
    let mut rng = StdRng::seed_from_u64(1);
    assert!(matches!(
        app.compare(&[1], None, &mut rng),
        Err(AppError::TooFewPlayers(1))
    ));
    assert!(matches!(
        app.compare(&[1, 1], None, &mut rng),
        Err(AppError::Selection(SelectionError::Duplicate(1)))
    ));
    assert!(matches!(
        app.compare(&[1, 2, 3, 4, 5], None, &mut rng),
        Err(AppError::Selection(SelectionError::Full { max: 4 }))
    ));
    assert!(matches!(
        app.compare(&[1, 77], None, &mut rng),
        Err(AppError::UnknownPlayer(77))
    ));
}

#[tokio::test]
async fn compare_random_is_capped_and_seeded() {
    let mut a = fixture_app().await;
    let mut b = fixture_app().await;
    a.compare(&[1], Some(10), &mut StdRng::seed_from_u64(9))
        .unwrap();
    b.compare(&[1], Some(10), &mut StdRng::seed_from_u64(9))
        .unwrap();
    assert_eq!(a.session.selection.len(), 4);
    assert_eq!(a.session.selection.ids()[0], 1);
    assert_eq!(a.session.selection.ids(), b.session.selection.ids());

    let mut c = fixture_app().await;
    c.compare(&[], Some(2), &mut StdRng::seed_from_u64(3))
        .unwrap();
    assert_eq!(c.session.selection.len(), 2);
}

#[tokio::test]
async fn export_command_writes_csv() {
    let app = fixture_app().await;
    let dir = std::env::temp_dir().join("bigboard_app_export");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("board.csv");

    assert_eq!(app.export(&path).unwrap(), 5);
    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines[1].starts_with("1,1,Cooper Flagg,Duke,F,ACC,1.0,5,"));
    assert!(lines[5].starts_with("5,5,Unranked Sleeper,"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn toggled_theme_changes_palette() {
    let mut app = fixture_app().await;
    let light = app.palette();
    app.session.toggle_color_mode();
    assert_eq!(app.session.color_mode, ColorMode::Dark);
    assert_ne!(light, app.palette());
}
