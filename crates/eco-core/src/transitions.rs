//! Opening transition graph (the `fromTo.json` edge list).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::opening::{OpeningCatalog, OpeningRecord, OpeningSource};

/// One book move between two catalogued positions.
///
/// In the data files an edge is a 4-element array:
/// `[from_fen, to_fen, from_src, to_src]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEdge {
    pub from: String,
    pub to: String,
    pub from_src: OpeningSource,
    pub to_src: OpeningSource,
}

/// Edge list plus adjacency by source and by destination FEN.
///
/// Read-only once built; build a new graph for a new edge set.
#[derive(Debug, Clone, Default)]
pub struct TransitionGraph {
    edges: Vec<TransitionEdge>,
    by_from: HashMap<String, Vec<usize>>,
    by_to: HashMap<String, Vec<usize>>,
}

/// Build the adjacency views for an edge list. Edge order is kept within
/// each adjacency list.
pub fn build_transition_graph(edges: Vec<TransitionEdge>) -> TransitionGraph {
    let mut by_from: HashMap<String, Vec<usize>> = HashMap::new();
    let mut by_to: HashMap<String, Vec<usize>> = HashMap::new();

    for (i, edge) in edges.iter().enumerate() {
        by_from.entry(edge.from.clone()).or_default().push(i);
        by_to.entry(edge.to.clone()).or_default().push(i);
    }

    TransitionGraph {
        edges,
        by_from,
        by_to,
    }
}

impl TransitionGraph {
    pub fn edges(&self) -> &[TransitionEdge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// FENs reachable in one book move from `fen`.
    pub fn next_fens<'g>(&'g self, fen: &str) -> impl Iterator<Item = &'g str> + 'g {
        self.adjacent(&self.by_from, fen)
            .map(|edge| edge.to.as_str())
    }

    /// FENs that lead to `fen` in one book move.
    pub fn previous_fens<'g>(&'g self, fen: &str) -> impl Iterator<Item = &'g str> + 'g {
        self.adjacent(&self.by_to, fen)
            .map(|edge| edge.from.as_str())
    }

    /// Openings one move after `fen`. Endpoints missing from the catalog come
    /// back as `None` so positions line up with the edge list.
    pub fn neighbors_from<'a>(
        &self,
        catalog: &'a OpeningCatalog,
        fen: &str,
    ) -> Vec<Option<&'a OpeningRecord>> {
        self.next_fens(fen).map(|to| catalog.get(to)).collect()
    }

    /// Openings one move before `fen`, with `None` for dangling endpoints.
    pub fn neighbors_to<'a>(
        &self,
        catalog: &'a OpeningCatalog,
        fen: &str,
    ) -> Vec<Option<&'a OpeningRecord>> {
        self.previous_fens(fen).map(|from| catalog.get(from)).collect()
    }

    fn adjacent<'g>(
        &'g self,
        view: &'g HashMap<String, Vec<usize>>,
        fen: &str,
    ) -> impl Iterator<Item = &'g TransitionEdge> + 'g {
        view.get(fen)
            .into_iter()
            .flatten()
            .map(move |&i| &self.edges[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(from: &str, to: &str) -> TransitionEdge {
        TransitionEdge {
            from: from.to_string(),
            to: to.to_string(),
            from_src: OpeningSource::EcoTsv,
            to_src: OpeningSource::Interpolated,
        }
    }

    fn record(name: &str) -> OpeningRecord {
        OpeningRecord {
            src: OpeningSource::EcoTsv,
            eco: "C20".to_string(),
            moves: "1. e4 e5".to_string(),
            name: name.to_string(),
            aliases: None,
            scid: None,
            is_eco_root: false,
            root_src: None,
        }
    }

    #[test]
    fn test_edge_parses_from_array() {
        let json = r#"[["a w - - 0 1", "b b - - 0 1", "eco_tsv", "interpolated"]]"#;
        let edges: Vec<TransitionEdge> = serde_json::from_str(json).unwrap();
        assert_eq!(edges, vec![edge("a w - - 0 1", "b b - - 0 1")]);
    }

    #[test]
    fn test_adjacency_both_directions() {
        let graph = build_transition_graph(vec![
            edge("start", "e4"),
            edge("start", "d4"),
            edge("e4", "e4e5"),
            edge("d4", "e4e5"),
        ]);

        assert_eq!(graph.len(), 4);
        assert_eq!(graph.next_fens("start").collect::<Vec<_>>(), vec!["e4", "d4"]);
        assert_eq!(graph.previous_fens("e4e5").collect::<Vec<_>>(), vec!["e4", "d4"]);
        assert_eq!(graph.next_fens("e4e5").count(), 0);
        assert_eq!(graph.previous_fens("nowhere").count(), 0);
    }

    #[test]
    fn test_dangling_endpoints_leave_holes() {
        let mut catalog = OpeningCatalog::new();
        catalog.insert("e4".to_string(), record("King's Pawn"));

        let graph = build_transition_graph(vec![edge("start", "e4"), edge("start", "missing")]);
        let next = graph.neighbors_from(&catalog, "start");
        assert_eq!(next.len(), 2);
        assert_eq!(next[0].unwrap().name, "King's Pawn");
        assert!(next[1].is_none());

        let prev = graph.neighbors_to(&catalog, "e4");
        assert_eq!(prev.len(), 1);
        assert!(prev[0].is_none());
    }
}
