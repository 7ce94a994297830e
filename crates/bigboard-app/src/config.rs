// Configuration loading and parsing (bigboard.toml).

use bigboard_core::compare::DEFAULT_MAX_PLAYERS;
use bigboard_core::performance::CompetitionTable;
use bigboard_core::session::ColorMode;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// File name under `config/`.
pub const CONFIG_FILE: &str = "bigboard.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    /// Snapshot path or URL.
    pub source: String,
    pub top_n: usize,
    pub max_players: usize,
    pub color_mode: ColorMode,
    pub ansi: bool,
    /// League multiplier overrides, keyed as written in the file.
    pub multipliers: BTreeMap<String, f64>,
}

impl Config {
    /// The built-in competition table with this config's overrides applied.
    pub fn competition_table(&self) -> CompetitionTable {
        CompetitionTable::with_overrides(self.multipliers.iter().map(|(k, v)| (k.as_str(), *v)))
    }
}

// ---------------------------------------------------------------------------
// bigboard.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire bigboard.toml file.
#[derive(Debug, Clone, Deserialize)]
struct BigboardFile {
    data: DataSection,
    #[serde(default)]
    board: BoardSection,
    #[serde(default)]
    compare: CompareSection,
    #[serde(default)]
    display: DisplaySection,
    #[serde(default)]
    competition: CompetitionSection,
}

#[derive(Debug, Clone, Deserialize)]
struct DataSection {
    source: String,
}

#[derive(Debug, Clone, Deserialize)]
struct BoardSection {
    top_n: usize,
}

impl Default for BoardSection {
    fn default() -> Self {
        BoardSection { top_n: 5 }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct CompareSection {
    max_players: usize,
}

impl Default for CompareSection {
    fn default() -> Self {
        CompareSection {
            max_players: DEFAULT_MAX_PLAYERS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct DisplaySection {
    #[serde(default = "default_color_mode")]
    color_mode: String,
    #[serde(default = "default_ansi")]
    ansi: bool,
}

impl Default for DisplaySection {
    fn default() -> Self {
        DisplaySection {
            color_mode: default_color_mode(),
            ansi: default_ansi(),
        }
    }
}

fn default_color_mode() -> String {
    ColorMode::default().as_str().to_string()
}

fn default_ansi() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
struct CompetitionSection {
    #[serde(default)]
    multipliers: BTreeMap<String, f64>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/bigboard.toml` relative to `base_dir`.
///
/// Does not write defaults; prefer `load_config()` which does.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let file: BigboardFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    let color_mode =
        ColorMode::parse(&file.display.color_mode).ok_or_else(|| ConfigError::ValidationError {
            field: "display.color_mode".into(),
            message: format!(
                "expected \"light\" or \"dark\", got {:?}",
                file.display.color_mode
            ),
        })?;

    let config = Config {
        source: file.data.source,
        top_n: file.board.top_n,
        max_players: file.compare.max_players,
        color_mode,
        ansi: file.display.ansi,
        multipliers: file.competition.multipliers,
    };

    validate(&config)?;

    Ok(config)
}

/// Shipped defaults, written to `config/` when no config exists yet.
pub const DEFAULT_CONFIG: &str = include_str!("../defaults/bigboard.toml");

/// Write the default `config/bigboard.toml` under `base_dir` unless one is
/// already there. Returns the path when a file was created.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let config_dir = base_dir.join("config");
    let target = config_dir.join(CONFIG_FILE);
    if target.exists() {
        return Ok(None);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create {}: {e}", config_dir.display()),
    })?;

    // create_new: never overwrite a file that appeared since the check
    let mut file = match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&target)
    {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(None),
        Err(e) => {
            return Err(ConfigError::DefaultsCopyError {
                message: format!("failed to create {}: {e}", target.display()),
            })
        }
    };
    file.write_all(DEFAULT_CONFIG.as_bytes()).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to write {}: {e}", target.display()),
    })?;

    Ok(Some(target))
}

/// Loads config relative to the current working directory, writing defaults
/// first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    if let Some(created) = ensure_config_file(&cwd)? {
        info!("wrote default config to {}", created.display());
    }
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.source.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data.source".into(),
            message: "must not be empty".into(),
        });
    }

    if config.top_n == 0 {
        return Err(ConfigError::ValidationError {
            field: "board.top_n".into(),
            message: "must be greater than 0".into(),
        });
    }

    if !(2..=DEFAULT_MAX_PLAYERS).contains(&config.max_players) {
        return Err(ConfigError::ValidationError {
            field: "compare.max_players".into(),
            message: format!(
                "must be between 2 and {DEFAULT_MAX_PLAYERS} inclusive, got {}",
                config.max_players
            ),
        });
    }

    for (league, multiplier) in &config.multipliers {
        if !multiplier.is_finite() || *multiplier <= 0.0 {
            return Err(ConfigError::ValidationError {
                field: format!("competition.multipliers.{league}"),
                message: format!("must be > 0, got {multiplier}"),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Write `body` as config/bigboard.toml under a fresh temp dir.
    fn write_config(name: &str, body: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("config").join(CONFIG_FILE), body).unwrap();
        tmp
    }

    #[test]
    fn first_run_writes_defaults() {
        let tmp = std::env::temp_dir().join("bigboard_config_defaults");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let created =
            ensure_config_file(&tmp).expect("should write default config");
        assert_eq!(created, Some(tmp.join("config").join(CONFIG_FILE)));
        let config = load_config_from(&tmp).expect("should load default config");

        assert_eq!(config.source, "data/players.json");
        assert_eq!(config.top_n, 5);
        assert_eq!(config.max_players, 4);
        assert_eq!(config.color_mode, ColorMode::Light);
        assert!(config.ansi);
        assert_eq!(config.multipliers.get("Overtime Elite"), Some(&0.70));
        assert_eq!(config.competition_table().lookup("overtime elite"), Some(0.70));

        // Second call leaves the existing file alone.
        fs::write(
            tmp.join("config").join(CONFIG_FILE),
            "[data]\nsource = \"edited.json\"\n",
        )
        .unwrap();
        assert_eq!(ensure_config_file(&tmp).unwrap(), None);
        assert_eq!(load_config_from(&tmp).unwrap().source, "edited.json");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn default_source_ships_with_the_workspace() {
        let workspace = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
        let tmp = write_config("bigboard_config_shipped", DEFAULT_CONFIG);
        let config = load_config_from(&tmp).unwrap();
        let sample = workspace.join(&config.source);
        assert!(sample.is_file(), "missing sample snapshot {}", sample.display());
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn optional_sections_default() {
        let tmp = write_config(
            "bigboard_config_minimal",
            "[data]\nsource = \"https://example.com/players.json\"\n",
        );
        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config.top_n, 5);
        assert_eq!(config.max_players, 4);
        assert_eq!(config.color_mode, ColorMode::Light);
        assert!(config.multipliers.is_empty());
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn missing_file_is_reported() {
        let tmp = std::env::temp_dir().join("bigboard_config_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();
        assert!(matches!(
            load_config_from(&tmp),
            Err(ConfigError::FileNotFound { .. })
        ));
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let tmp = write_config("bigboard_config_bad_toml", "[data\nsource = 1");
        assert!(matches!(
            load_config_from(&tmp),
            Err(ConfigError::ParseError { .. })
        ));
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn top_n_zero_rejected() {
        let tmp = write_config(
            "bigboard_config_top_n_zero",
            "[data]\nsource = \"p.json\"\n[board]\ntop_n = 0\n",
        );
        match load_config_from(&tmp) {
            Err(ConfigError::ValidationError { field, .. }) => assert_eq!(field, "board.top_n"),
            other => panic!("expected ValidationError, got {other:?}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn max_players_out_of_range_rejected() {
        for (name, value) in [("bigboard_config_max_one", 1), ("bigboard_config_max_five", 5)] {
            let tmp = write_config(
                name,
                &format!("[data]\nsource = \"p.json\"\n[compare]\nmax_players = {value}\n"),
            );
            match load_config_from(&tmp) {
                Err(ConfigError::ValidationError { field, .. }) => {
                    assert_eq!(field, "compare.max_players")
                }
                other => panic!("expected ValidationError, got {other:?}"),
            }
            let _ = fs::remove_dir_all(&tmp);
        }
    }

    #[test]
    fn non_positive_multiplier_rejected() {
        let tmp = write_config(
            "bigboard_config_zero_multiplier",
            "[data]\nsource = \"p.json\"\n[competition.multipliers]\n\"NBL\" = 0.0\n",
        );
        match load_config_from(&tmp) {
            Err(ConfigError::ValidationError { field, .. }) => {
                assert_eq!(field, "competition.multipliers.NBL")
            }
            other => panic!("expected ValidationError, got {other:?}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn unknown_color_mode_rejected() {
        let tmp = write_config(
            "bigboard_config_bad_color",
            "[data]\nsource = \"p.json\"\n[display]\ncolor_mode = \"sepia\"\n",
        );
        match load_config_from(&tmp) {
            Err(ConfigError::ValidationError { field, .. }) => {
                assert_eq!(field, "display.color_mode")
            }
            other => panic!("expected ValidationError, got {other:?}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn dark_mode_parses() {
        let tmp = write_config(
            "bigboard_config_dark",
            "[data]\nsource = \"p.json\"\n[display]\ncolor_mode = \"dark\"\nansi = false\n",
        );
        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config.color_mode, ColorMode::Dark);
        assert!(!config.ansi);
        let _ = fs::remove_dir_all(&tmp);
    }
}
