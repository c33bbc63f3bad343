//! Merging catalog shards (ecoA..ecoE, interpolated) into one catalog.

use tracing::debug;

use crate::opening::OpeningCatalog;

/// Which shard wins when two shards carry the same FEN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePrecedence {
    /// Later shards overwrite earlier ones.
    #[default]
    LastWins,
    /// The first shard to define a FEN keeps it.
    FirstWins,
}

/// A named slice of the catalog, e.g. one `ecoB.json` file.
#[derive(Debug, Clone, Default)]
pub struct Shard {
    pub name: String,
    pub openings: OpeningCatalog,
}

impl Shard {
    pub fn new(name: impl Into<String>, openings: OpeningCatalog) -> Self {
        Self {
            name: name.into(),
            openings,
        }
    }
}

/// Merge shards in order into a single catalog.
///
/// A FEN keeps the position where it was first inserted regardless of which
/// shard's record ends up stored for it.
pub fn merge_shards<I>(shards: I, precedence: MergePrecedence) -> OpeningCatalog
where
    I: IntoIterator<Item = Shard>,
{
    let mut catalog = OpeningCatalog::new();

    for shard in shards {
        let mut conflicts = 0usize;
        for (fen, record) in shard.openings {
            match catalog.get_mut(&fen) {
                Some(existing) => {
                    conflicts += 1;
                    if precedence == MergePrecedence::LastWins {
                        *existing = record;
                    }
                }
                None => {
                    catalog.insert(fen, record);
                }
            }
        }
        if conflicts > 0 {
            debug!(shard = %shard.name, conflicts, ?precedence, "Shard overlaps earlier shards");
        }
    }

    catalog
}

/// FENs present in both catalogs, in `a`'s order.
pub fn find_overlaps<'a>(a: &'a OpeningCatalog, b: &OpeningCatalog) -> Vec<&'a str> {
    a.keys()
        .filter(|fen| b.contains_key(fen.as_str()))
        .map(String::as_str)
        .collect()
}
