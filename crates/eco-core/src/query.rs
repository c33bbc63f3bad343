//! Catalog filters: ECO code, ECO category, canonical roots and sources.
//!
//! All filters keep catalog iteration order.

use indexmap::IndexMap;

use crate::error::EcoError;
use crate::opening::{EcoCategory, OpeningCatalog, OpeningRecord};

/// All openings with exactly this ECO code, e.g. "B12".
pub fn by_category_code<'a>(catalog: &'a OpeningCatalog, code: &str) -> Vec<&'a OpeningRecord> {
    catalog.values().filter(|record| record.eco == code).collect()
}

/// All openings in an ECO category. `letter` must be one of A-E (either case);
/// anything else is [`EcoError::InvalidCategory`]. A valid category with no
/// openings gives an empty list.
pub fn by_category_letter<'a>(
    catalog: &'a OpeningCatalog,
    letter: &str,
) -> Result<Vec<&'a OpeningRecord>, EcoError> {
    let category: EcoCategory = letter.parse()?;
    Ok(catalog
        .values()
        .filter(|record| record.category() == Some(category))
        .collect())
}

/// The canonical ECO root variations, keyed by FEN.
pub fn canonical_roots(catalog: &OpeningCatalog) -> IndexMap<&str, &OpeningRecord> {
    catalog
        .iter()
        .filter(|(_, record)| record.is_eco_root)
        .map(|(fen, record)| (fen.as_str(), record))
        .collect()
}

/// Openings whose `src` or any alias source is in `sources`.
pub fn select_sources<'a>(
    catalog: &'a OpeningCatalog,
    sources: &[&str],
) -> IndexMap<&'a str, &'a OpeningRecord> {
    catalog
        .iter()
        .filter(|(_, record)| record.source_tags().any(|tag| sources.contains(&tag)))
        .map(|(fen, record)| (fen.as_str(), record))
        .collect()
}

/// Openings that neither come from `source` nor carry an alias from it.
pub fn exclude_source<'a>(
    catalog: &'a OpeningCatalog,
    source: &str,
) -> IndexMap<&'a str, &'a OpeningRecord> {
    catalog
        .iter()
        .filter(|(_, record)| record.source_tags().all(|tag| tag != source))
        .map(|(fen, record)| (fen.as_str(), record))
        .collect()
}
