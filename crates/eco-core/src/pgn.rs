//! Load PGN movetext into a `ShakmatyGame`.

use pgn_reader::{RawTag, Reader, SanPlus, Visitor};
use std::ops::ControlFlow;

use crate::error::EcoError;
use crate::game::ShakmatyGame;

/// Visitor that replays the mainline of the first game.
#[derive(Default)]
struct LineBuilder {
    game: Option<ShakmatyGame>,
    error: Option<EcoError>,
}

impl Visitor for LineBuilder {
    type Tags = Option<String>;
    type Movetext = ShakmatyGame;
    type Output = ();

    fn begin_tags(&mut self) -> ControlFlow<(), Option<String>> {
        ControlFlow::Continue(None)
    }

    fn tag(&mut self, tags: &mut Option<String>, name: &[u8], value: RawTag<'_>) -> ControlFlow<()> {
        if name == b"FEN" {
            *tags = Some(value.decode_utf8_lossy().into_owned());
        }
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, tags: Option<String>) -> ControlFlow<(), ShakmatyGame> {
        let game = match tags {
            Some(fen) => ShakmatyGame::from_fen(&fen),
            None => Ok(ShakmatyGame::new()),
        };
        match game {
            Ok(game) => ControlFlow::Continue(game),
            Err(e) => {
                self.error = Some(EcoError::Pgn(e.to_string()));
                ControlFlow::Break(())
            }
        }
    }

    fn san(&mut self, game: &mut ShakmatyGame, san_plus: SanPlus) -> ControlFlow<()> {
        match game.play_san(&san_plus.san.to_string()) {
            Ok(()) => ControlFlow::Continue(()),
            Err(e) => {
                self.error = Some(EcoError::Pgn(e.to_string()));
                ControlFlow::Break(())
            }
        }
    }

    fn end_game(&mut self, game: ShakmatyGame) {
        self.game = Some(game);
    }
}

/// Replay PGN (headers optional) into a game positioned after the last
/// mainline move. A `[FEN]` tag sets the starting position.
pub fn game_from_pgn(pgn: &str) -> Result<ShakmatyGame, EcoError> {
    let mut builder = LineBuilder::default();
    let mut reader = Reader::new(pgn.as_bytes());
    reader.read_game(&mut builder)?;

    if let Some(err) = builder.error {
        return Err(err);
    }
    builder
        .game
        .ok_or_else(|| EcoError::Pgn("No game found in input".to_string()))
}
