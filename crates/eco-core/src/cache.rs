//! Caller-owned catalog cache.
//!
//! Holds the merged catalog together with the indexes derived from it. Build
//! it once (from the JSON shards or from a bincode snapshot) and pass it by
//! reference to whatever does lookups; to pick up new data, build a new cache
//! and swap it in.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::EcoError;
use crate::merge::{merge_shards, MergePrecedence, Shard};
use crate::opening::{OpeningCatalog, OpeningRecord};
use crate::position_index::{build_position_index, PositionIndex};
use crate::resolver::resolve;
use crate::search::{search_backward, GameHandle, SearchOptions, SearchOutcome};
use crate::transitions::{build_transition_graph, TransitionEdge, TransitionGraph};

/// Category shards, one per ECO letter.
pub const SHARD_PATTERN: &str = "eco[A-E].json";
pub const INTERPOLATED_FILE: &str = "eco_interpolated.json";
pub const TRANSITIONS_FILE: &str = "fromTo.json";

/// Default path to the binary catalog snapshot.
pub const SNAPSHOT_FILE_PATH: &str = "data/eco_catalog.bin";

#[derive(Serialize)]
struct SnapshotRef<'a> {
    catalog: &'a OpeningCatalog,
    edges: &'a [TransitionEdge],
}

#[derive(Deserialize)]
struct Snapshot {
    catalog: OpeningCatalog,
    edges: Vec<TransitionEdge>,
}

#[derive(Debug, Clone, Default)]
pub struct CatalogCache {
    catalog: OpeningCatalog,
    position_index: PositionIndex,
    transitions: TransitionGraph,
}

impl CatalogCache {
    pub fn new(catalog: OpeningCatalog, edges: Vec<TransitionEdge>) -> Self {
        let position_index = build_position_index(&catalog);
        let transitions = build_transition_graph(edges);
        info!(
            "Catalog ready: {} openings, {} board layouts, {} transitions",
            catalog.len(),
            position_index.len(),
            transitions.len()
        );
        Self {
            catalog,
            position_index,
            transitions,
        }
    }

    /// Load `ecoA.json`..`ecoE.json` (and optionally `eco_interpolated.json`)
    /// plus `fromTo.json` from a data directory. Later shards win on conflicts.
    pub fn load_dir<P: AsRef<Path>>(dir: P, include_interpolated: bool) -> Result<Self, EcoError> {
        let dir = dir.as_ref();
        let shards = load_shards(dir, include_interpolated)?;
        let catalog = merge_shards(shards, MergePrecedence::LastWins);

        let transitions_path = dir.join(TRANSITIONS_FILE);
        let edges = if transitions_path.exists() {
            read_json(&transitions_path)?
        } else {
            warn!("No {} in {}, transition lookups will be empty", TRANSITIONS_FILE, dir.display());
            Vec::new()
        };

        Ok(Self::new(catalog, edges))
    }

    /// Load the cache from a bincode snapshot.
    pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Self, EcoError> {
        let file = File::open(path)?;
        let snapshot: Snapshot = bincode::deserialize_from(BufReader::new(file))?;
        Ok(Self::new(snapshot.catalog, snapshot.edges))
    }

    /// Save the catalog and edge list as a bincode snapshot.
    pub fn save_snapshot<P: AsRef<Path>>(&self, path: P) -> Result<(), EcoError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        let snapshot = SnapshotRef {
            catalog: &self.catalog,
            edges: self.transitions.edges(),
        };
        bincode::serialize_into(BufWriter::new(file), &snapshot)?;
        Ok(())
    }

    pub fn catalog(&self) -> &OpeningCatalog {
        &self.catalog
    }

    pub fn position_index(&self) -> &PositionIndex {
        &self.position_index
    }

    pub fn transitions(&self) -> &TransitionGraph {
        &self.transitions
    }

    /// Exact match, then board-layout fallback.
    pub fn resolve(&self, fen: &str) -> Option<&OpeningRecord> {
        resolve(&self.catalog, fen, Some(&self.position_index))
    }

    /// Backward search with board-layout fallback enabled.
    pub fn search_backward<G>(
        &self,
        game: &mut G,
        max_plies: Option<usize>,
    ) -> Result<SearchOutcome<'_>, EcoError>
    where
        G: GameHandle + ?Sized,
    {
        let options = SearchOptions {
            max_plies,
            position_index: Some(&self.position_index),
            ..Default::default()
        };
        search_backward(game, &self.catalog, &options)
    }

    pub fn neighbors_from(&self, fen: &str) -> Vec<Option<&OpeningRecord>> {
        self.transitions.neighbors_from(&self.catalog, fen)
    }

    pub fn neighbors_to(&self, fen: &str) -> Vec<Option<&OpeningRecord>> {
        self.transitions.neighbors_to(&self.catalog, fen)
    }
}

/// Read the catalog shards of a data directory in merge order: the category
/// files by name, then the interpolated file when requested.
pub fn load_shards(dir: &Path, include_interpolated: bool) -> Result<Vec<Shard>, EcoError> {
    let pattern = dir.join(SHARD_PATTERN);
    let mut paths: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())?
        .filter_map(|p| p.ok())
        .collect();
    paths.sort();

    if paths.is_empty() {
        warn!("No catalog shards matching {} in {}", SHARD_PATTERN, dir.display());
    }

    if include_interpolated {
        let interpolated = dir.join(INTERPOLATED_FILE);
        if interpolated.exists() {
            paths.push(interpolated);
        } else {
            warn!("Missing {} in {}", INTERPOLATED_FILE, dir.display());
        }
    }

    let mut shards = Vec::with_capacity(paths.len());
    for path in paths {
        let openings: OpeningCatalog = read_json(&path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        info!("Loaded shard {}: {} openings", name, openings.len());
        shards.push(Shard::new(name, openings));
    }
    Ok(shards)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, EcoError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("eco-cache-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_fixture(dir: &Path) {
        fs::write(
            dir.join("ecoB.json"),
            r#"{
                "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1":
                    {"src": "eco_tsv", "eco": "B00", "moves": "1. e4", "name": "King's Pawn Game", "isEcoRoot": true}
            }"#,
        )
        .unwrap();
        fs::write(
            dir.join("ecoC.json"),
            r#"{
                "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2":
                    {"src": "eco_tsv", "eco": "C20", "moves": "1. e4 e5", "name": "King's Pawn Game: Open"}
            }"#,
        )
        .unwrap();
        fs::write(
            dir.join(INTERPOLATED_FILE),
            r#"{
                "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1":
                    {"src": "interpolated", "eco": "B00", "moves": "1. e4", "name": "Overridden", "rootSrc": "eco_tsv"}
            }"#,
        )
        .unwrap();
        fs::write(
            dir.join(TRANSITIONS_FILE),
            r#"[[
                "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
                "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2",
                "eco_tsv",
                "eco_tsv"
            ]]"#,
        )
        .unwrap();
    }

    #[test]
    fn test_load_dir_merges_in_order() {
        let dir = temp_dir("load");
        write_fixture(&dir);

        let cache = CatalogCache::load_dir(&dir, false).unwrap();
        assert_eq!(cache.catalog().len(), 2);
        assert_eq!(cache.transitions().len(), 1);
        let e4 = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        assert_eq!(cache.resolve(e4).unwrap().name, "King's Pawn Game");
        assert_eq!(cache.neighbors_from(e4)[0].unwrap().eco, "C20");

        let with_interpolated = CatalogCache::load_dir(&dir, true).unwrap();
        assert_eq!(with_interpolated.resolve(e4).unwrap().name, "Overridden");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_snapshot_restores_catalog_and_edges() {
        let dir = temp_dir("snapshot");
        write_fixture(&dir);
        let cache = CatalogCache::load_dir(&dir, true).unwrap();

        let path = dir.join("nested").join("catalog.bin");
        cache.save_snapshot(&path).unwrap();
        let loaded = CatalogCache::load_snapshot(&path).unwrap();

        assert_eq!(loaded.catalog(), cache.catalog());
        assert_eq!(loaded.transitions().edges(), cache.transitions().edges());
        assert_eq!(loaded.position_index(), cache.position_index());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_empty_dir() {
        let dir = temp_dir("empty");
        let cache = CatalogCache::load_dir(&dir, true).unwrap();
        assert!(cache.catalog().is_empty());
        assert!(cache.resolve("anything").is_none());
        fs::remove_dir_all(&dir).unwrap();
    }
}
