// Plain-text views: big board, player profile, comparison and summary.
//
// Every function returns the finished text so the binary only prints it.

use bigboard_core::attributes::{normalize_attributes, AttributeKind};
use bigboard_core::board::{BigBoard, ChipTone, StatChip};
use bigboard_core::compare::{Comparison, ComparisonRow};
use bigboard_core::consensus::{average_rank, format_average_rank, scout_outliers, BoardSummary};
use bigboard_core::format::{
    format_age, format_height, format_measurement, format_stat, NOT_AVAILABLE,
};
use bigboard_core::model::{MeasurementKind, Prospect};
use bigboard_core::performance::{prospect_score, CompetitionTable, Podium};
use bigboard_core::session::{ColorMode, ScoutReport};
use bigboard_core::stats::one_decimal;
use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// ANSI styling chosen by colour mode. With `ansi` off every method returns
/// the text unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    mode: ColorMode,
    ansi: bool,
}

impl Palette {
    pub fn new(mode: ColorMode, ansi: bool) -> Self {
        Palette { mode, ansi }
    }

    pub fn plain() -> Self {
        Palette::new(ColorMode::Light, false)
    }

    fn paint(&self, text: &str, light: &str, dark: &str) -> String {
        if !self.ansi {
            return text.to_string();
        }
        let code = match self.mode {
            ColorMode::Light => light,
            ColorMode::Dark => dark,
        };
        format!("\x1b[{code}m{text}\x1b[0m")
    }

    pub fn heading(&self, text: &str) -> String {
        self.paint(text, "1;34", "1;96")
    }

    /// Best value in a comparison row, or a high stat chip.
    pub fn good(&self, text: &str) -> String {
        self.paint(text, "1;32", "1;92")
    }

    pub fn bad(&self, text: &str) -> String {
        self.paint(text, "31", "91")
    }

    pub fn dim(&self, text: &str) -> String {
        self.paint(text, "2", "90")
    }
}

fn chip_text(chip: &StatChip, palette: &Palette) -> String {
    let label = chip.label();
    match chip.tone {
        ChipTone::High => palette.good(&label),
        ChipTone::Low => palette.bad(&label),
        ChipTone::Neutral => label,
    }
}

fn or_na(value: Option<&str>) -> &str {
    value.unwrap_or(NOT_AVAILABLE)
}

// ---------------------------------------------------------------------------
// Big board
// ---------------------------------------------------------------------------

pub fn render_board(board: &BigBoard<'_>, palette: &Palette) -> String {
    let mut lines = vec![palette.heading(&format!(
        "Big Board ({} of {} prospects)",
        board.rows.len(),
        board.total
    ))];
    if board.rows.is_empty() {
        lines.push("No players match the current filter.".to_string());
        return lines.join("\n");
    }
    lines.push(format!(
        "{:>3}  {:<24} {:<18} {:<5} {:<7} {:>5} {:>5}  {}",
        "#", "Name", "Team", "Pos", "Height", "Age", "Avg", "Per game"
    ));
    for row in &board.rows {
        let bio = &row.prospect.bio;
        let chips: Vec<String> = row.chips.iter().map(|c| chip_text(c, palette)).collect();
        lines.push(format!(
            "{:>3}  {:<24} {:<18} {:<5} {:<7} {:>5} {:>5}  {}",
            row.position,
            bio.name,
            or_na(bio.current_team.as_deref()),
            or_na(bio.position.as_deref()),
            row.height,
            row.age,
            row.average_rank_label(),
            chips.join("  ")
        ));
    }
    lines.push(palette.dim(&format!("Teams: {}", board.teams.join(", "))));
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

pub fn render_profile(
    prospect: &Prospect,
    table: &CompetitionTable,
    as_of: NaiveDate,
    reports: &[&ScoutReport],
    palette: &Palette,
) -> String {
    let bio = &prospect.bio;
    let mut lines = vec![palette.heading(&format!("{} (#{})", bio.name, bio.player_id))];
    lines.push(format!(
        "Team: {}  Position: {}  League: {}",
        or_na(bio.current_team.as_deref()),
        or_na(bio.position.as_deref()),
        or_na(bio.league_label())
    ));
    lines.push(format!(
        "Height: {}  Weight: {}  Age: {}",
        bio.height
            .map(format_height)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        format_measurement(MeasurementKind::Weight, bio.weight),
        format_age(bio.birth_date, as_of)
    ));
    if let Some(headshot) = bio.headshot.as_deref() {
        lines.push(palette.dim(&format!("Photo: {headshot}")));
    }

    lines.push(String::new());
    lines.push(palette.heading("Scout rankings"));
    if prospect.scout_ranks.is_empty() {
        lines.push("  Unranked".to_string());
    } else {
        let ranks = prospect.scout_ranks.present();
        for ((scout, rank), (_, flag)) in ranks.zip(scout_outliers(&prospect.scout_ranks)) {
            let note = match flag.label() {
                "" => String::new(),
                label => format!("  ({label})"),
            };
            lines.push(format!("  {:<16} {:>4}{}", scout.label(), rank, note));
        }
        lines.push(format!(
            "  {:<16} {:>4}",
            "Consensus",
            format_average_rank(average_rank(&prospect.scout_ranks))
        ));
    }

    lines.push(String::new());
    lines.push(palette.heading("Measurements"));
    if prospect.measurements.is_empty() {
        lines.push("  No measurements recorded".to_string());
    } else {
        for kind in MeasurementKind::ALL {
            lines.push(format!(
                "  {:<16} {}",
                kind.label(),
                format_measurement(kind, prospect.measurements.get(kind))
            ));
        }
    }

    lines.push(String::new());
    lines.push(palette.heading("Season stats"));
    if prospect.season_logs.is_empty() {
        lines.push("  No season stats recorded".to_string());
    } else {
        lines.push(format!(
            "  {:<9} {:<14} {:>5} {:>5} {:>5} {:>5} {:>5} {:>5}",
            "Season", "League", "PTS", "TRB", "AST", "BLK", "STL", "MP"
        ));
        for line in &prospect.season_logs {
            let s = &line.stats;
            lines.push(format!(
                "  {:<9} {:<14} {:>5} {:>5} {:>5} {:>5} {:>5} {:>5}",
                or_na(line.season.as_deref()),
                or_na(line.league.as_deref()),
                format_stat(s.get("PTS")),
                format_stat(s.get("TRB")),
                format_stat(s.get("AST")),
                format_stat(s.get("BLK")),
                format_stat(s.get("STL")),
                format_stat(s.get("MP")),
            ));
        }
    }

    let averages = prospect.season_averages();
    let attributes = normalize_attributes(&averages);
    lines.push(String::new());
    lines.push(palette.heading("Attributes"));
    for attr in attributes.iter() {
        lines.push(format!(
            "  {:<11} {:>6.1} {}",
            attr.kind.subject(),
            attr.value,
            bar(attr.value, attr.full_mark, 20)
        ));
    }
    lines.push(format!(
        "  Performance {} (x{:.2} competition)",
        one_decimal(prospect_score(prospect, table)),
        table.multiplier_for(bio)
    ));

    lines.push(String::new());
    lines.push(palette.heading("Scout reports"));
    if reports.is_empty() {
        lines.push("  None this session".to_string());
    }
    for report in reports {
        let by = report
            .scout
            .as_deref()
            .map(|scout| format!(" ({scout})"))
            .unwrap_or_default();
        lines.push(format!(
            "  [{}]{by} {}/10  {}",
            report.submitted_at.format("%Y-%m-%d %H:%M"),
            report.rating,
            report.notes
        ));
    }
    lines.join("\n")
}

fn bar(value: f64, full: f64, width: usize) -> String {
    let filled = if full > 0.0 {
        ((value / full) * width as f64)
            .round()
            .clamp(0.0, width as f64) as usize
    } else {
        0
    };
    format!("{}{}", "#".repeat(filled), ".".repeat(width - filled))
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

fn comparison_row(
    row: &ComparisonRow,
    fmt: impl Fn(Option<f64>) -> String,
    palette: &Palette,
) -> String {
    let cells: Vec<String> = row
        .values
        .iter()
        .enumerate()
        .map(|(idx, v)| {
            let cell = format!("{:>14}", fmt(*v));
            if row.best == Some(idx) {
                palette.good(&cell)
            } else {
                cell
            }
        })
        .collect();
    format!("  {:<16}{}", row.label, cells.join(""))
}

fn rank_cell(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.0}"))
}

pub fn render_comparison(cmp: &Comparison<'_>, palette: &Palette) -> String {
    let header: String = cmp
        .players
        .iter()
        .map(|p| format!("{:>14}", truncate(p.name(), 13)))
        .collect();
    let mut lines = vec![palette.heading("Comparison")];
    lines.push(format!("  {:<16}{}", "", header));

    lines.push(palette.heading("Measurements"));
    for (kind, row) in MeasurementKind::ALL.iter().zip(&cmp.measurements) {
        lines.push(comparison_row(row, |v| format_measurement(*kind, v), palette));
    }

    lines.push(palette.heading("Scout rankings"));
    for row in &cmp.scout_ranks {
        if row.label == "Average" {
            lines.push(comparison_row(row, format_average_rank, palette));
        } else {
            lines.push(comparison_row(row, rank_cell, palette));
        }
    }

    lines.push(palette.heading("Season averages"));
    for row in &cmp.season_stats {
        lines.push(comparison_row(row, format_stat, palette));
    }

    lines.push(palette.heading("Attributes"));
    for kind in AttributeKind::ALL {
        let cells: String = cmp
            .attributes
            .iter()
            .map(|a| format!("{:>14.1}", a.get(kind)))
            .collect();
        lines.push(format!("  {:<16}{}", kind.subject(), cells));
    }

    if let Some(podium) = &cmp.podium {
        lines.push(String::new());
        lines.push(render_podium(podium, palette));
    }
    lines.join("\n")
}

fn place_label(place: usize) -> &'static str {
    match place {
        0 => "1st",
        1 => "2nd",
        2 => "3rd",
        _ => "4th",
    }
}

pub fn render_podium(podium: &Podium<'_>, palette: &Palette) -> String {
    let mut lines = vec![palette.heading("Performance podium")];
    for slot in &podium.slots {
        let line = format!(
            "  {} {:<24} {:>6} (x{:.2}) {}",
            place_label(slot.place),
            slot.prospect.name(),
            one_decimal(slot.score),
            slot.multiplier,
            "#".repeat((slot.bar_height / 10.0).round() as usize)
        );
        lines.push(if slot.place == 0 { palette.good(&line) } else { line });
    }
    lines.join("\n")
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        text.chars().take(max).collect()
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

pub fn render_summary(summary: &BoardSummary, palette: &Palette) -> String {
    let mut lines = vec![palette.heading("Draft board summary")];
    lines.push(format!(
        "Prospects: {} ({} ranked by at least one scout)",
        summary.total_players, summary.ranked_players
    ));
    lines.push(format!(
        "Average scout variance: {}",
        summary.formatted_variance()
    ));
    lines.push("Top prospects:".to_string());
    if summary.top_prospects.is_empty() {
        lines.push("  No ranked prospects".to_string());
    }
    for (idx, name) in summary.top_prospects.iter().enumerate() {
        lines.push(format!("  {}. {}", idx + 1, name));
    }
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
