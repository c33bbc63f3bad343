//! Print the opening at a FEN plus the openings one move before and after it.
//!
//! Usage: cargo run --bin find-opening -- "<fen>" ["<fen>" ...]

use anyhow::Context;
use eco_core::position::validate_board;
use eco_core::{CompactRecord, OpeningRecord};
use eco_tools::{config::Config, logging};
use serde_json::json;
use std::env;

fn main() -> anyhow::Result<()> {
    logging::init();

    let fens: Vec<String> = env::args().skip(1).collect();
    if fens.is_empty() {
        eprintln!("Usage: find-opening <fen> [<fen> ...]");
        std::process::exit(1);
    }

    let config = Config::from_env();
    let cache = config.load_cache().context("Failed to load opening catalog")?;

    for fen in &fens {
        validate_board(fen)?;

        let result = json!({
            "opening": cache.catalog().get(fen.as_str()).map(OpeningRecord::compact),
            "from": compact_neighbors(cache.neighbors_to(fen)),
            "to": compact_neighbors(cache.neighbors_from(fen)),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        println!("\n------\n");
    }

    Ok(())
}

fn compact_neighbors(neighbors: Vec<Option<&OpeningRecord>>) -> Vec<Option<CompactRecord<'_>>> {
    neighbors.into_iter().map(|n| n.map(OpeningRecord::compact)).collect()
}
