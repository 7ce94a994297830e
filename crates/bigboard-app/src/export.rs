// CSV export of the big board.

use std::io;
use std::path::Path;

use bigboard_core::board::BigBoard;
use bigboard_core::stats::round_to;
use serde::Serialize;
use tracing::info;

/// One exported board row. Absent numbers are empty cells; `height` and
/// `age` keep the board's display text, "N/A" included.
#[derive(Debug, Serialize)]
struct BoardRecord<'a> {
    rank: usize,
    player_id: u64,
    name: &'a str,
    team: Option<&'a str>,
    position: Option<&'a str>,
    league: Option<&'a str>,
    average_rank: Option<f64>,
    scouts: usize,
    height: &'a str,
    age: &'a str,
    pts: Option<f64>,
    trb: Option<f64>,
    ast: Option<f64>,
    blk: Option<f64>,
    stl: Option<f64>,
}

/// Write the board as CSV with a header row. Returns the rows written.
pub fn write_board<W: io::Write>(board: &BigBoard<'_>, writer: W) -> Result<usize, csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in &board.rows {
        let bio = &row.prospect.bio;
        let chip = |stat: &str| {
            row.chips
                .iter()
                .find(|c| c.stat == stat)
                .and_then(|c| c.value)
        };
        csv_writer.serialize(BoardRecord {
            rank: row.position,
            player_id: bio.player_id,
            name: &bio.name,
            team: bio.current_team.as_deref(),
            position: bio.position.as_deref(),
            league: bio.league_label(),
            average_rank: row.average_rank.map(|a| round_to(a, 1)),
            scouts: row.prospect.scout_ranks.count(),
            height: &row.height,
            age: &row.age,
            pts: chip("PTS"),
            trb: chip("TRB"),
            ast: chip("AST"),
            blk: chip("BLK"),
            stl: chip("STL"),
        })?;
    }
    csv_writer.flush()?;
    Ok(board.rows.len())
}

/// Write the board to `path`, replacing any existing file.
pub fn export_board(board: &BigBoard<'_>, path: &Path) -> Result<usize, csv::Error> {
    let file = std::fs::File::create(path)?;
    let written = write_board(board, file)?;
    info!("exported {written} board rows to {}", path.display());
    Ok(written)
}
