//! Find the deepest known opening for a game given as PGN or bare movetext.
//!
//! Usage: cargo run --bin lookup-moves -- "1. e4 e5 2. Nf3 Nc6 3. Bb5 a6" [--max-plies N]

use anyhow::Context;
use eco_core::pgn::game_from_pgn;
use eco_tools::args::{parse_lookup_args, LookupArgs, LOOKUP_USAGE};
use eco_tools::{config::Config, logging};
use serde_json::json;
use std::env;

fn main() -> anyhow::Result<()> {
    logging::init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("Usage: {LOOKUP_USAGE}");
        eprintln!();
        eprintln!("Example:");
        eprintln!("  lookup-moves \"1. e4 e5 2. Nf3 Nc6 3. Bb5 a6 4. Ba4 Nf6 5. O-O Be7\" --max-plies 10");
        std::process::exit(1);
    }

    let config = Config::from_env();
    let LookupArgs { pgn, max_plies } = parse_lookup_args(&args, config.max_plies)?;

    let cache = config.load_cache().context("Failed to load opening catalog")?;
    let mut game = game_from_pgn(&pgn).context("Failed to read moves")?;

    let outcome = cache.search_backward(&mut game, max_plies)?;
    let result = match outcome.record {
        Some(record) => json!({
            "name": record.name,
            "eco": record.eco,
            "moves": record.moves,
            "pliesBack": outcome.plies_back,
        }),
        None => json!({ "name": null, "pliesBack": 0 }),
    };
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
