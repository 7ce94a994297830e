// Big board entry point.
//
// Startup sequence:
// 1. Initialize tracing (stderr; stdout carries the views)
// 2. Load config
// 3. Fetch and decode the snapshot once
// 4. Run the requested command and print its view

use std::path::PathBuf;

use anyhow::Context;
use bigboard_app::app::App;
use bigboard_app::config;
use bigboard_app::source;
use bigboard_core::board::BoardFilter;
use bigboard_core::model::PlayerId;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

#[derive(Parser)]
#[command(name = "bigboard")]
#[command(about = "NBA draft prospect big board: consensus rankings, profiles and comparisons")]
#[command(version)]
struct Cli {
    /// Snapshot path or URL, overriding `data.source` in the config
    #[arg(long, global = true)]
    source: Option<String>,

    /// Use the opposite of the configured colour mode for this run
    #[arg(long, global = true)]
    toggle_theme: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Consensus-ordered board of every prospect
    Board {
        /// Case-insensitive name search
        #[arg(short, long, default_value = "")]
        search: String,

        /// Exact team name
        #[arg(short, long)]
        team: Option<String>,
    },

    /// One player's full profile
    Profile {
        id: PlayerId,

        /// Submit a scout report with these notes before showing the profile
        #[arg(long)]
        note: Option<String>,

        /// Name to sign the report with
        #[arg(long, requires = "note")]
        scout: Option<String>,

        /// Report rating, 1-10 (default 5)
        #[arg(long, requires = "note")]
        rating: Option<u8>,

        /// Print the joined record as JSON instead of the profile view
        #[arg(long, conflicts_with = "note")]
        json: bool,
    },

    /// Side-by-side comparison of 2-4 players
    Compare {
        ids: Vec<PlayerId>,

        /// Add this many randomly chosen players
        #[arg(short, long)]
        random: Option<usize>,

        /// Seed for the random pick
        #[arg(long, requires = "random")]
        seed: Option<u64>,
    },

    /// Top prospects and scout agreement
    Summary,

    /// Write the full board as CSV
    Export { path: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 1. Initialize tracing
    init_tracing()?;

    // 2. Load config
    let config = config::load_config()
        .context("failed to load configuration")?;
    let source = cli.source.clone().unwrap_or_else(|| config.source.clone());
    info!("config loaded: source={source}, top_n={}", config.top_n);

    // 3. Fetch the snapshot
    let base_dir = std::env::current_dir()
        .context("failed to resolve working directory")?;
    let snapshot = source::fetch_snapshot(&source, &base_dir)
        .await
        .with_context(|| format!("failed to load snapshot from {source}"))?;

    let as_of = chrono::Local::now().date_naive();
    let mut app = App::new(config, &snapshot, as_of);
    if cli.toggle_theme {
        app.session.toggle_color_mode();
    }

    // 4. Run the command
    let output = match cli.command {
        Commands::Board { search, team } => app.board(&BoardFilter { search, team }),
        Commands::Profile { id, json: true, .. } => {
            app.profile_json(id).context("failed to build profile")?
        }
        Commands::Profile {
            id,
            scout,
            note,
            rating,
            ..
        } => app
            .profile(id, scout.as_deref(), note.as_deref(), rating)
            .context("failed to build profile")?,
        Commands::Compare { ids, random, seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            app.compare(&ids, random, &mut rng)
                .context("failed to build comparison")?
        }
        Commands::Summary => app.summary(),
        Commands::Export { path } => {
            let rows = app
                .export(&path)
                .with_context(|| format!("failed to export to {}", path.display()))?;
            format!("Wrote {rows} players to {}", path.display())
        }
    };
    println!("{output}");

    Ok(())
}

fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bigboard=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
