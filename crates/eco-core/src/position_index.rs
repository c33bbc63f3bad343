//! Position-only index over the catalog.

use indexmap::IndexMap;

use crate::opening::OpeningCatalog;
use crate::position::normalize;

/// Board layout -> every full FEN in the catalog with that layout.
///
/// Lists keep catalog iteration order, so the first entry of each list is the
/// first catalog FEN for that layout. Rebuild it whenever the catalog changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionIndex {
    positions: IndexMap<String, Vec<String>>,
}

impl PositionIndex {
    /// All full FENs sharing a board layout, in catalog order.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.positions.get(key).map(Vec::as_slice)
    }

    /// The first-inserted full FEN for a board layout.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key)?.first().map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.positions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Build the position index for a catalog.
pub fn build_position_index(catalog: &OpeningCatalog) -> PositionIndex {
    let mut positions: IndexMap<String, Vec<String>> = IndexMap::new();

    for fen in catalog.keys() {
        positions
            .entry(normalize(fen).to_string())
            .or_default()
            .push(fen.clone());
    }

    PositionIndex { positions }
}
