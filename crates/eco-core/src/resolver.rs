//! Single-position opening lookup.

use tracing::debug;

use crate::opening::{OpeningCatalog, OpeningRecord};
use crate::position::normalize;
use crate::position_index::PositionIndex;

/// Look up the opening for a FEN.
///
/// An exact catalog hit wins outright. Otherwise, if a position index is
/// supplied, the first catalog FEN sharing the board layout is used (turn,
/// castling, en passant and counters ignored). Absence is a normal result.
pub fn resolve<'a>(
    catalog: &'a OpeningCatalog,
    fen: &str,
    index: Option<&PositionIndex>,
) -> Option<&'a OpeningRecord> {
    resolve_entry(catalog, fen, index).map(|(_, record)| record)
}

/// Same as [`resolve`], also returning the catalog FEN that matched.
pub fn resolve_entry<'a>(
    catalog: &'a OpeningCatalog,
    fen: &str,
    index: Option<&PositionIndex>,
) -> Option<(&'a str, &'a OpeningRecord)> {
    if let Some((key, record)) = catalog.get_key_value(fen) {
        return Some((key.as_str(), record));
    }

    let key = normalize(fen);
    let matched = index?.first(key)?;
    let entry = catalog.get_key_value(matched);
    if entry.is_some() {
        debug!(fen, matched, "Resolved opening by board layout");
    }
    entry.map(|(key, record)| (key.as_str(), record))
}
