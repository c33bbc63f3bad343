//! A `GameHandle` backed by shakmaty.

use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::{CastlingMode, Chess, EnPassantMode, Position};
use thiserror::Error;

use crate::search::GameHandle;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    #[error("Invalid SAN '{0}'")]
    InvalidSan(String),

    #[error("Illegal move '{san}' at {fen}")]
    IllegalMove { san: String, fen: String },
}

/// FEN the way the opening catalog writes it: the en passant square is always
/// emitted after a double pawn push.
pub fn catalog_fen(pos: &Chess) -> String {
    Fen::from_position(pos, EnPassantMode::Always).to_string()
}

/// A game as a line of positions with a cursor.
///
/// `undo` moves the cursor back; `load` moves it onto the line when the FEN is
/// already part of it, so a backward search leaves the game as it found it,
/// moves included.
#[derive(Debug, Clone)]
pub struct ShakmatyGame {
    line: Vec<Chess>,
    fens: Vec<String>,
    cursor: usize,
}

impl Default for ShakmatyGame {
    fn default() -> Self {
        Self::from_position(Chess::default())
    }
}

impl ShakmatyGame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_position(pos: Chess) -> Self {
        Self {
            fens: vec![catalog_fen(&pos)],
            line: vec![pos],
            cursor: 0,
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        Ok(Self::from_position(parse_fen(fen)?))
    }

    /// Play a sequence of SAN moves from the standard starting position.
    pub fn from_san_moves<S: AsRef<str>>(moves: &[S]) -> Result<Self, GameError> {
        let mut game = Self::default();
        for san in moves {
            game.play_san(san.as_ref())?;
        }
        Ok(game)
    }

    /// Play a SAN move at the cursor. Positions after the cursor are dropped.
    pub fn play_san(&mut self, san: &str) -> Result<(), GameError> {
        let parsed: San = san
            .parse()
            .map_err(|_| GameError::InvalidSan(san.to_string()))?;
        let pos = self.position().clone();
        let mv = parsed.to_move(&pos).map_err(|_| GameError::IllegalMove {
            san: san.to_string(),
            fen: self.fens[self.cursor].clone(),
        })?;
        let next = pos.play(mv).map_err(|_| GameError::IllegalMove {
            san: san.to_string(),
            fen: self.fens[self.cursor].clone(),
        })?;
        self.push(next);
        Ok(())
    }

    /// Append a position reached from the current one.
    pub(crate) fn push(&mut self, pos: Chess) {
        self.line.truncate(self.cursor + 1);
        self.fens.truncate(self.cursor + 1);
        self.fens.push(catalog_fen(&pos));
        self.line.push(pos);
        self.cursor += 1;
    }

    pub fn position(&self) -> &Chess {
        &self.line[self.cursor]
    }

    /// Moves played from the start of the line up to the cursor.
    pub fn ply(&self) -> usize {
        self.cursor
    }
}

fn parse_fen(fen: &str) -> Result<Chess, GameError> {
    let invalid = |reason: String| GameError::InvalidFen {
        fen: fen.to_string(),
        reason,
    };
    let parsed: Fen = fen.parse().map_err(|e| invalid(format!("{e}")))?;
    parsed
        .into_position(CastlingMode::Standard)
        .map_err(|e| invalid(format!("{e}")))
}

impl GameHandle for ShakmatyGame {
    type Error = GameError;

    fn current(&self) -> String {
        self.fens[self.cursor].clone()
    }

    fn undo(&mut self) -> Result<bool, GameError> {
        if self.cursor == 0 {
            return Ok(false);
        }
        self.cursor -= 1;
        Ok(true)
    }

    fn load(&mut self, fen: &str) -> Result<(), GameError> {
        if let Some(i) = self.fens.iter().rposition(|f| f == fen) {
            self.cursor = i;
            return Ok(());
        }
        *self = Self::from_position(parse_fen(fen)?);
        Ok(())
    }

    fn history_len(&self) -> Option<usize> {
        Some(self.cursor)
    }
}
