//! Flag parsing for the tool binaries.
//!
//! Flags are hand-parsed from `std::env::args()`. A flag that needs a value
//! and does not get a usable one is an error rather than a silent default.

use anyhow::{bail, Context};
use std::path::PathBuf;

pub const LOOKUP_USAGE: &str = "lookup-moves <pgn> [--max-plies N]";
pub const CONJOIN_USAGE: &str =
    "conjoin [--interpolated] [--check] [--out <path>] [--snapshot [<path>]]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupArgs {
    pub pgn: String,
    pub max_plies: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConjoinArgs {
    pub include_interpolated: bool,
    pub check: bool,
    pub out: Option<PathBuf>,
    /// `Some(None)` means `--snapshot` without a path: use the configured one.
    pub snapshot: Option<Option<PathBuf>>,
}

/// Parse `lookup-moves` arguments (without the program name).
/// `default_max_plies` applies unless `--max-plies` is given.
pub fn parse_lookup_args(args: &[String], default_max_plies: Option<usize>) -> anyhow::Result<LookupArgs> {
    let Some(pgn) = args.first() else {
        bail!("Missing PGN. Usage: {LOOKUP_USAGE}");
    };

    let mut max_plies = default_max_plies;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--max-plies" => {
                let value = flag_value(args, i)
                    .with_context(|| format!("--max-plies needs a number. Usage: {LOOKUP_USAGE}"))?;
                let plies: usize = value
                    .parse()
                    .with_context(|| format!("Invalid --max-plies value '{value}'. Usage: {LOOKUP_USAGE}"))?;
                max_plies = Some(plies);
                i += 2;
            }
            other => bail!("Unknown argument '{other}'. Usage: {LOOKUP_USAGE}"),
        }
    }

    Ok(LookupArgs {
        pgn: pgn.clone(),
        max_plies,
    })
}

/// Parse `conjoin` arguments (without the program name).
pub fn parse_conjoin_args(args: &[String]) -> anyhow::Result<ConjoinArgs> {
    let mut parsed = ConjoinArgs::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--interpolated" => {
                parsed.include_interpolated = true;
                i += 1;
            }
            "--check" => {
                parsed.check = true;
                i += 1;
            }
            "--out" => {
                let value = flag_value(args, i)
                    .with_context(|| format!("--out needs a path. Usage: {CONJOIN_USAGE}"))?;
                parsed.out = Some(PathBuf::from(value));
                i += 2;
            }
            "--snapshot" => match flag_value(args, i) {
                Some(value) => {
                    parsed.snapshot = Some(Some(PathBuf::from(value)));
                    i += 2;
                }
                None => {
                    parsed.snapshot = Some(None);
                    i += 1;
                }
            },
            other => bail!("Unknown argument '{other}'. Usage: {CONJOIN_USAGE}"),
        }
    }

    Ok(parsed)
}

/// The value after flag `i`, unless it is missing or another flag.
fn flag_value(args: &[String], i: usize) -> Option<&str> {
    args.get(i + 1)
        .map(String::as_str)
        .filter(|value| !value.starts_with("--"))
}
