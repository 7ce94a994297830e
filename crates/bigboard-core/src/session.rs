// Per-run session context: colour mode, comparison selection and scout
// reports. Passed explicitly to whatever needs it.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::compare::Selection;
use crate::model::PlayerId;

// ---------------------------------------------------------------------------
// Colour mode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ColorMode {
    #[default]
    Light,
    Dark,
}

impl ColorMode {
    pub fn toggle(self) -> Self {
        match self {
            ColorMode::Light => ColorMode::Dark,
            ColorMode::Dark => ColorMode::Light,
        }
    }

    /// Parse a config value. Case-insensitive.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(ColorMode::Light),
            "dark" => Some(ColorMode::Dark),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorMode::Light => "light",
            ColorMode::Dark => "dark",
        }
    }
}

// ---------------------------------------------------------------------------
// Scout reports
// ---------------------------------------------------------------------------

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 10;
/// Rating used when the reporter does not pick one.
pub const DEFAULT_RATING: u8 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("report notes must not be empty")]
    EmptyNotes,

    #[error("rating {0} is outside 1-10")]
    RatingOutOfRange(u8),
}

/// A free-text scouting note on one player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoutReport {
    pub player_id: PlayerId,
    pub scout: Option<String>,
    pub notes: String,
    pub rating: u8,
    pub submitted_at: DateTime<Utc>,
}

impl ScoutReport {
    /// Validate and timestamp a report. Notes are stored trimmed.
    pub fn new(
        player_id: PlayerId,
        notes: &str,
        rating: Option<u8>,
        submitted_at: DateTime<Utc>,
    ) -> Result<Self, ReportError> {
        let notes = notes.trim();
        if notes.is_empty() {
            return Err(ReportError::EmptyNotes);
        }
        let rating = rating.unwrap_or(DEFAULT_RATING);
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(ReportError::RatingOutOfRange(rating));
        }
        Ok(ScoutReport {
            player_id,
            scout: None,
            notes: notes.to_string(),
            rating,
            submitted_at,
        })
    }

    /// Sign the report. A blank name leaves it anonymous.
    pub fn with_scout(mut self, scout: Option<&str>) -> Self {
        self.scout = scout
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        self
    }
}

/// Where submitted reports go.
pub trait ReportStore {
    fn submit(&mut self, report: ScoutReport);

    /// Reports for one player, oldest first.
    fn reports_for(&self, player_id: PlayerId) -> Vec<&ScoutReport>;
}

/// Reports held for the lifetime of the process only.
#[derive(Debug, Default)]
pub struct InMemoryReportStore {
    reports: HashMap<PlayerId, Vec<ScoutReport>>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.reports.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ReportStore for InMemoryReportStore {
    fn submit(&mut self, report: ScoutReport) {
        info!(
            "scout report for player {} (rating {})",
            report.player_id, report.rating
        );
        self.reports
            .entry(report.player_id)
            .or_default()
            .push(report);
    }

    fn reports_for(&self, player_id: PlayerId) -> Vec<&ScoutReport> {
        self.reports
            .get(&player_id)
            .map(|r| r.iter().collect())
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct Session<S: ReportStore> {
    pub color_mode: ColorMode,
    pub selection: Selection,
    store: S,
}

impl<S: ReportStore> Session<S> {
    pub fn new(color_mode: ColorMode, selection: Selection, store: S) -> Self {
        Session {
            color_mode,
            selection,
            store,
        }
    }

    pub fn toggle_color_mode(&mut self) -> ColorMode {
        self.color_mode = self.color_mode.toggle();
        self.color_mode
    }

    /// Validate and store a report stamped with the current time.
    pub fn submit_report(
        &mut self,
        player_id: PlayerId,
        scout: Option<&str>,
        notes: &str,
        rating: Option<u8>,
    ) -> Result<(), ReportError> {
        let report = ScoutReport::new(player_id, notes, rating, Utc::now())?
            .with_scout(scout);
        self.store.submit(report);
        Ok(())
    }

    pub fn reports_for(&self, player_id: PlayerId) -> Vec<&ScoutReport> {
        self.store.reports_for(player_id)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl Default for Session<InMemoryReportStore> {
    fn default() -> Self {
        Session::new(ColorMode::default(), Selection::default(), InMemoryReportStore::new())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
