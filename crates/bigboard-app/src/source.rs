// Snapshot source: one read of a local file or one HTTP GET, then decode.

use std::path::{Path, PathBuf};

use bigboard_core::snapshot::{Snapshot, SnapshotError};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to fetch snapshot: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Decode(#[from] SnapshotError),
}

/// Whether `source` should be fetched over HTTP rather than read from disk.
pub fn is_remote(source: &str) -> bool {
    let lower = source.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Load and decode the snapshot. Relative paths resolve against `base_dir`.
///
/// Any failure is final: no retry and no partial data.
pub async fn fetch_snapshot(source: &str, base_dir: &Path) -> Result<Snapshot, FetchError> {
    let text = if is_remote(source) {
        fetch_remote(source.trim()).await?
    } else {
        let path = base_dir.join(source);
        info!("reading snapshot from {}", path.display());
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| FetchError::Io { path, source: e })?
    };
    Ok(Snapshot::from_json(&text)?)
}

async fn fetch_remote(url: &str) -> Result<String, FetchError> {
    info!("fetching snapshot from {url}");
    let response = reqwest::Client::new()
        .get(url)
        .send()
        .await?
        .error_for_status()?;
    Ok(response.text().await?)
}
