use eco_core::{GameHandle, OpeningCatalog, OpeningRecord, OpeningSource};

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct ScriptError(pub &'static str);

/// A game handle driven by a fixed list of earlier FENs (oldest first).
pub struct ScriptedGame {
    pub earlier: Vec<String>,
    pub current: String,
    pub undo_calls: usize,
    pub load_calls: usize,
    /// Undo raises instead of returning `false` once history runs out.
    pub raise_when_empty: bool,
}

impl ScriptedGame {
    pub fn new(earlier: &[&str], current: &str) -> Self {
        Self {
            earlier: earlier.iter().map(|s| s.to_string()).collect(),
            current: current.to_string(),
            undo_calls: 0,
            load_calls: 0,
            raise_when_empty: false,
        }
    }
}

impl GameHandle for ScriptedGame {
    type Error = ScriptError;

    fn current(&self) -> String {
        self.current.clone()
    }

    fn undo(&mut self) -> Result<bool, ScriptError> {
        self.undo_calls += 1;
        match self.earlier.pop() {
            Some(fen) => {
                self.current = fen;
                Ok(true)
            }
            None if self.raise_when_empty => Err(ScriptError("no move to undo")),
            None => Ok(false),
        }
    }

    fn load(&mut self, fen: &str) -> Result<(), ScriptError> {
        self.load_calls += 1;
        self.earlier.clear();
        self.current = fen.to_string();
        Ok(())
    }
}

pub fn record(src: OpeningSource, eco: &str, name: &str, moves: &str) -> OpeningRecord {
    OpeningRecord {
        src,
        eco: eco.to_string(),
        moves: moves.to_string(),
        name: name.to_string(),
        aliases: None,
        scid: None,
        is_eco_root: false,
        root_src: None,
    }
}

pub fn petrov_catalog() -> OpeningCatalog {
    let mut catalog = OpeningCatalog::new();
    catalog.insert(
        "posX w - - 0 1".to_string(),
        record(OpeningSource::EcoTsv, "C42", "Petrov's Defense", "1. e4 e5 2. Nf3 Nf6"),
    );
    catalog
}
