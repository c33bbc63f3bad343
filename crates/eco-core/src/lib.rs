//! Opening catalog lookups.
//!
//! Indexes a catalog of opening positions keyed by FEN and resolves, for any
//! position or live game, the nearest known opening. The main entry points are
//! [`resolver::resolve`] for a single FEN and [`search::search_backward`] for a
//! game that may have moved past known theory.

pub mod cache;
pub mod error;
pub mod game;
pub mod merge;
pub mod opening;
pub mod pgn;
pub mod position;
pub mod position_index;
pub mod query;
pub mod resolver;
pub mod search;
pub mod transitions;

pub use cache::CatalogCache;
pub use error::EcoError;
pub use game::ShakmatyGame;
pub use opening::{compact_catalog, CompactRecord, EcoCategory, OpeningCatalog, OpeningRecord, OpeningSource};
pub use position_index::{build_position_index, PositionIndex};
pub use resolver::resolve;
pub use search::{search_backward, GameHandle, SearchOptions, SearchOutcome};
pub use transitions::{build_transition_graph, TransitionEdge, TransitionGraph};
