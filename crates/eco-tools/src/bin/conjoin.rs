//! Merge the per-category catalog shards into a single eco.json and/or a
//! binary snapshot.
//!
//! Usage: cargo run --bin conjoin -- [--interpolated] [--check] [--out eco.json] [--snapshot [path]]

use anyhow::{bail, Context};
use eco_core::cache::{load_shards, TRANSITIONS_FILE};
use eco_core::merge::{find_overlaps, merge_shards, MergePrecedence};
use eco_core::{compact_catalog, CatalogCache, TransitionEdge};
use eco_tools::args::{parse_conjoin_args, ConjoinArgs};
use eco_tools::{config::Config, logging};
use std::env;
use std::fs::{self, File};
use std::io::BufReader;

fn main() -> anyhow::Result<()> {
    logging::init();

    let config = Config::from_env();
    let args: Vec<String> = env::args().skip(1).collect();
    let ConjoinArgs {
        include_interpolated,
        check,
        out,
        snapshot,
    } = parse_conjoin_args(&args)?;
    let snapshot = snapshot.map(|path| path.unwrap_or_else(|| config.snapshot_path.clone()));

    let mut shards = load_shards(&config.data_dir, include_interpolated)
        .with_context(|| format!("Failed to read shards from {}", config.data_dir.display()))?;

    if check && include_interpolated && shards.len() > 1 {
        let interpolated = shards.pop().context("No shards loaded")?;
        let main = merge_shards(shards.iter().cloned(), MergePrecedence::LastWins);
        let overlaps = find_overlaps(&main, &interpolated.openings);
        if !overlaps.is_empty() {
            bail!(
                "{} interpolated positions are also in the main catalog (first: {})",
                overlaps.len(),
                overlaps[0]
            );
        }
        println!("Interpolated shard is disjoint from the main catalog");
        shards.push(interpolated);
    }

    let catalog = merge_shards(shards, MergePrecedence::LastWins);
    println!("Merged catalog: {} openings", catalog.len());

    if let Some(path) = &out {
        println!("Writing {}...", path.display());
        let json = compact_catalog(catalog.iter().map(|(fen, record)| (fen.as_str(), record)));
        fs::write(path, serde_json::to_string_pretty(&json)?)?;
    }

    if let Some(path) = &snapshot {
        let transitions_path = config.data_dir.join(TRANSITIONS_FILE);
        let edges: Vec<TransitionEdge> = if transitions_path.exists() {
            serde_json::from_reader(BufReader::new(File::open(&transitions_path)?))?
        } else {
            Vec::new()
        };
        let cache = CatalogCache::new(catalog, edges);
        println!("Writing snapshot {}...", path.display());
        cache.save_snapshot(path)?;
        let size = fs::metadata(path)?.len();
        println!("  Size: {} KB", size / 1024);
    }

    Ok(())
}
