// Application state for one run: the joined prospects, the config and the
// session, plus one method per command.

use std::path::Path;

use bigboard_core::board::{BigBoard, BoardFilter};
use bigboard_core::compare::{Comparison, Selection, SelectionError};
use bigboard_core::consensus::BoardSummary;
use bigboard_core::join::join_all;
use bigboard_core::model::{PlayerId, Prospect};
use bigboard_core::performance::CompetitionTable;
use bigboard_core::session::{InMemoryReportStore, ReportError, ReportStore, Session};
use bigboard_core::snapshot::Snapshot;
use chrono::NaiveDate;
use rand::Rng;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;
use crate::export;
use crate::render::{self, Palette};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("no player with id {0}")]
    UnknownPlayer(PlayerId),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("comparison needs at least 2 players, got {0}")]
    TooFewPlayers(usize),

    #[error("failed to export board: {0}")]
    Export(#[from] csv::Error),

    #[error("failed to serialize player: {0}")]
    Json(#[from] serde_json::Error),
}

pub struct App<S: ReportStore = InMemoryReportStore> {
    pub config: Config,
    pub prospects: Vec<Prospect>,
    pub session: Session<S>,
    table: CompetitionTable,
    as_of: NaiveDate,
}

impl App<InMemoryReportStore> {
    /// Join the snapshot and open a fresh in-memory session.
    pub fn new(config: Config, snapshot: &Snapshot, as_of: NaiveDate) -> Self {
        let session = Session::new(
            config.color_mode,
            Selection::new(config.max_players),
            InMemoryReportStore::new(),
        );
        App::with_session(config, snapshot, as_of, session)
    }
}

impl<S: ReportStore> App<S> {
    pub fn with_session(
        config: Config,
        snapshot: &Snapshot,
        as_of: NaiveDate,
        session: Session<S>,
    ) -> Self {
        let prospects = join_all(snapshot);
        let table = config.competition_table();
        info!(
            "{} prospects joined; competition table has {} leagues",
            prospects.len(),
            table.len()
        );
        App {
            config,
            prospects,
            session,
            table,
            as_of,
        }
    }

    pub fn palette(&self) -> Palette {
        Palette::new(self.session.color_mode, self.config.ansi)
    }

    fn prospect(&self, id: PlayerId) -> Result<&Prospect, AppError> {
        self.prospects
            .iter()
            .find(|p| p.id() == id)
            .ok_or(AppError::UnknownPlayer(id))
    }

    pub fn board(&self, filter: &BoardFilter) -> String {
        let board = BigBoard::build(&self.prospects, filter, self.as_of);
        render::render_board(&board, &self.palette())
    }

    pub fn summary(&self) -> String {
        let summary = BoardSummary::compute(&self.prospects, self.config.top_n);
        render::render_summary(&summary, &self.palette())
    }

    /// Profile view. A note, when given, is submitted as a scout report first.
    pub fn profile(
        &mut self,
        id: PlayerId,
        scout: Option<&str>,
        note: Option<&str>,
        rating: Option<u8>,
    ) -> Result<String, AppError> {
        self.prospect(id)?;
        if let Some(note) = note {
            self.session.submit_report(id, scout, note, rating)?;
        }
        let prospect = self.prospect(id)?;
        let reports = self.session.reports_for(id);
        Ok(render::render_profile(
            prospect,
            &self.table,
            self.as_of,
            &reports,
            &self.palette(),
        ))
    }

    /// The joined prospect record as pretty JSON.
    pub fn profile_json(&self, id: PlayerId) -> Result<String, AppError> {
        Ok(serde_json::to_string_pretty(self.prospect(id)?)?)
    }

    /// Compare explicit ids, then top up with `random` more players.
    pub fn compare<R: Rng + ?Sized>(
        &mut self,
        ids: &[PlayerId],
        random: Option<usize>,
        rng: &mut R,
    ) -> Result<String, AppError> {
        self.session.selection.clear();
        for &id in ids {
            self.prospect(id)?;
            self.session.selection.add(id)?;
        }
        if let Some(extra) = random {
            let capacity = self.session.selection.max_players();
            let target = (self.session.selection.len() + extra).min(capacity);
            if self.session.selection.len() + extra > capacity {
                warn!("only {capacity} players can be compared; random fill capped");
            }
            let mut limited = Selection::new(target);
            for &id in self.session.selection.ids() {
                limited.add(id)?;
            }
            limited.randomize_fill(&self.prospects, rng);
            self.session.selection = Selection::new(capacity);
            for &id in limited.ids() {
                self.session.selection.add(id)?;
            }
        }

        let players = self.session.selection.resolve(&self.prospects);
        if players.len() < 2 {
            return Err(AppError::TooFewPlayers(players.len()));
        }
        let comparison = Comparison::build(&players, &self.table);
        Ok(render::render_comparison(&comparison, &self.palette()))
    }

    pub fn export(&self, path: &Path) -> Result<usize, AppError> {
        let board = BigBoard::build(&self.prospects, &BoardFilter::default(), self.as_of);
        Ok(export::export_board(&board, path)?)
    }
}
