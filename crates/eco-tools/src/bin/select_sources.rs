//! Print the openings that come from (or, with --exclude, do not come from)
//! the given sources. Alias sources count as well as the primary `src`.
//!
//! Usage: cargo run --bin select-sources -- [--exclude] <source> [<source> ...]

use anyhow::{bail, Context};
use eco_core::cache::load_shards;
use eco_core::merge::{merge_shards, MergePrecedence};
use eco_core::query::{exclude_source, select_sources};
use eco_core::{compact_catalog, OpeningSource};
use eco_tools::{config::Config, logging};
use std::env;

fn main() -> anyhow::Result<()> {
    logging::init();

    let mut exclude = false;
    let mut sources: Vec<String> = Vec::new();
    for arg in env::args().skip(1) {
        if arg == "--exclude" {
            exclude = true;
        } else {
            sources.push(arg);
        }
    }

    if sources.is_empty() {
        eprintln!("Usage: select-sources [--exclude] <source> [<source> ...]");
        eprintln!("Sources: {}", OpeningSource::ALL.map(|s| s.as_str()).join(", "));
        std::process::exit(1);
    }
    if exclude && sources.len() > 1 {
        bail!("--exclude takes exactly one source");
    }

    let config = Config::from_env();
    let shards = load_shards(&config.data_dir, false)
        .with_context(|| format!("Failed to read shards from {}", config.data_dir.display()))?;
    let catalog = merge_shards(shards, MergePrecedence::LastWins);

    let hits = if exclude {
        exclude_source(&catalog, &sources[0])
    } else {
        let wanted: Vec<&str> = sources.iter().map(String::as_str).collect();
        select_sources(&catalog, &wanted)
    };

    println!("{}", serde_json::to_string_pretty(&compact_catalog(hits))?);
    Ok(())
}
