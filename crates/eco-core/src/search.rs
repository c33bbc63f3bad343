//! Backward search: find the deepest known opening behind a live game.
//!
//! The search resolves the current position, then undoes one move at a time
//! until something in the catalog matches or the ply budget / game history runs
//! out. The game is always loaded back to the FEN it started at.

use tracing::{debug, error};

use crate::error::EcoError;
use crate::opening::{OpeningCatalog, OpeningRecord};
use crate::position::ply_from_descriptor;
use crate::position_index::PositionIndex;
use crate::resolver::resolve;

/// The game-state capability the search needs. Any chess library wrapper that
/// can report its FEN, take back a move and load a FEN will do.
pub trait GameHandle {
    type Error: std::error::Error + Send + Sync + 'static;

    /// FEN of the current position.
    fn current(&self) -> String;

    /// Take back the last move. `Ok(false)` (or an error) means there is no
    /// history left.
    fn undo(&mut self) -> Result<bool, Self::Error>;

    /// Reset the game to a FEN.
    fn load(&mut self, fen: &str) -> Result<(), Self::Error>;

    /// Number of moves in the game's history, for handles that track one.
    /// Caps the undo budget. When `None`, the walk runs until `undo` reports
    /// exhaustion and `max_depth` reads the ply depth from the FEN's counters.
    fn history_len(&self) -> Option<usize> {
        None
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchOptions<'a> {
    /// Maximum number of moves to undo. `None` means the whole history.
    pub max_plies: Option<usize>,
    /// Positions deeper than this are skipped without a lookup; the skipped
    /// plies still count toward `plies_back`.
    pub max_depth: Option<usize>,
    /// Enables board-layout fallback matching.
    pub position_index: Option<&'a PositionIndex>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome<'a> {
    pub record: Option<&'a OpeningRecord>,
    /// Moves undone before the match. Always 0 when nothing was found.
    pub plies_back: usize,
}

impl<'a> SearchOutcome<'a> {
    pub fn not_found() -> Self {
        Self {
            record: None,
            plies_back: 0,
        }
    }

    pub fn is_found(&self) -> bool {
        self.record.is_some()
    }
}

/// Find the deepest catalogued opening reachable by undoing moves.
///
/// The game is borrowed exclusively for the call and is loaded back to its
/// starting FEN on every exit path, including a panic inside the handle. Undo
/// failures end the walk as "not found"; a failure to restore is returned as
/// [`EcoError::Restore`].
pub fn search_backward<'a, G>(
    game: &mut G,
    catalog: &'a OpeningCatalog,
    options: &SearchOptions<'_>,
) -> Result<SearchOutcome<'a>, EcoError>
where
    G: GameHandle + ?Sized,
{
    let mut guard = RestoreGuard {
        original: game.current(),
        game,
        armed: true,
    };

    let outcome = walk(&mut *guard.game, catalog, options, &guard.original);
    guard.finish()?;

    debug!(
        found = outcome.is_found(),
        plies_back = outcome.plies_back,
        "Backward search finished"
    );
    Ok(outcome)
}

fn walk<'a, G>(
    game: &mut G,
    catalog: &'a OpeningCatalog,
    options: &SearchOptions<'_>,
    original: &str,
) -> SearchOutcome<'a>
where
    G: GameHandle + ?Sized,
{
    let history = game.history_len();
    // The counters in the FEN only place the fast-forward; they never bound
    // the walk, since exporters often write them as "0 1".
    let depth = history.or_else(|| ply_from_descriptor(original));

    // Skip past positions deeper than any opening can be.
    let mut skipped = 0;
    if let (Some(max_depth), Some(depth)) = (options.max_depth, depth) {
        while depth.saturating_sub(skipped) > max_depth {
            if !try_undo(game) {
                return SearchOutcome::not_found();
            }
            skipped += 1;
        }
    }

    let budget = match (options.max_plies, history.map(|h| h.saturating_sub(skipped))) {
        (Some(max), Some(remaining)) => max.min(remaining),
        (Some(max), None) => max,
        (None, Some(remaining)) => remaining,
        (None, None) => usize::MAX,
    };

    let mut undone = 0;
    loop {
        if let Some(record) = resolve(catalog, &game.current(), options.position_index) {
            return SearchOutcome {
                record: Some(record),
                plies_back: skipped + undone,
            };
        }
        if undone >= budget || !try_undo(game) {
            return SearchOutcome::not_found();
        }
        undone += 1;
    }
}

fn try_undo<G: GameHandle + ?Sized>(game: &mut G) -> bool {
    match game.undo() {
        Ok(undone) => undone,
        Err(e) => {
            debug!(error = %e, "Undo failed, treating history as exhausted");
            false
        }
    }
}

/// Loads the starting FEN back into the game. `finish` reports a failed
/// restore; dropping the guard while armed (during a panic) restores best-effort.
struct RestoreGuard<'g, G: GameHandle + ?Sized> {
    game: &'g mut G,
    original: String,
    armed: bool,
}

impl<G: GameHandle + ?Sized> RestoreGuard<'_, G> {
    fn finish(&mut self) -> Result<(), EcoError> {
        self.armed = false;
        self.game
            .load(&self.original)
            .map_err(|e| EcoError::Restore {
                descriptor: self.original.clone(),
                source: Box::new(e),
            })
    }
}

impl<G: GameHandle + ?Sized> Drop for RestoreGuard<'_, G> {
    fn drop(&mut self) {
        if self.armed {
            if let Err(e) = self.game.load(&self.original) {
                error!(fen = %self.original, error = %e, "Failed to restore game after panic");
            }
        }
    }
}
