//! FEN field helpers: position keys, ply counting and board validation.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::EcoError;

static BOARD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([1-8PNBRQKpnbrqk]+/){7}[1-8PNBRQKpnbrqk]+$").unwrap());

static MULTI_DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{2,}").unwrap());

/// Strips everything but the board layout (field 0) from a FEN.
///
/// Turn, castling rights, en passant square and move counters are dropped, so
/// every FEN with the same piece placement maps to the same key. An empty
/// string yields an empty key.
pub fn normalize(fen: &str) -> &str {
    fen.split_whitespace().next().unwrap_or("")
}

/// Half-moves played before this position, derived from the side-to-move and
/// fullmove fields. `None` when either field is missing or unparsable.
pub fn ply_from_descriptor(fen: &str) -> Option<usize> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    let black_to_move = match *fields.get(1)? {
        "w" => 0,
        "b" => 1,
        _ => return None,
    };
    let fullmove: usize = fields.get(5)?.parse().ok()?;
    Some(fullmove.saturating_sub(1) * 2 + black_to_move)
}

/// Check that the board field of a FEN is eight ranks of pieces and
/// single-digit empty counts.
pub fn validate_board(fen: &str) -> Result<(), EcoError> {
    let board = normalize(fen);
    if BOARD_RE.is_match(board) && !MULTI_DIGIT_RE.is_match(board) {
        Ok(())
    } else {
        Err(EcoError::InvalidDescriptor(fen.to_string()))
    }
}
