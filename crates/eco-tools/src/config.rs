use std::env;
use std::path::PathBuf;

use eco_core::cache::SNAPSHOT_FILE_PATH;
use eco_core::{CatalogCache, EcoError};
use tracing::info;

#[derive(Clone, Debug)]
pub struct Config {
    /// Directory holding ecoA..ecoE.json, eco_interpolated.json and fromTo.json
    pub data_dir: PathBuf,
    /// Binary catalog snapshot, preferred over the JSON shards when present
    pub snapshot_path: PathBuf,
    pub include_interpolated: bool,
    /// Default undo budget for backward searches
    pub max_plies: Option<usize>,
}

impl Config {
    /// Load `.env` if present and read configuration from the environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            data_dir: env::var("ECO_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            snapshot_path: env::var("ECO_SNAPSHOT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(SNAPSHOT_FILE_PATH)),
            include_interpolated: env::var("ECO_INCLUDE_INTERPOLATED")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
            max_plies: env::var("ECO_MAX_PLIES")
                .ok()
                .and_then(|v| v.parse().ok()),
        }
    }

    /// Load the catalog: the snapshot when it exists, the JSON shards otherwise.
    pub fn load_cache(&self) -> Result<CatalogCache, EcoError> {
        if self.snapshot_path.exists() {
            info!("Loading catalog snapshot from {}", self.snapshot_path.display());
            CatalogCache::load_snapshot(&self.snapshot_path)
        } else {
            info!("Loading catalog shards from {}", self.data_dir.display());
            CatalogCache::load_dir(&self.data_dir, self.include_interpolated)
        }
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(value.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off")
}
