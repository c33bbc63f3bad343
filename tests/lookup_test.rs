//! Backward search and resolver behaviour against scripted game handles.

mod common;

use common::{petrov_catalog, record, ScriptedGame};
use eco_core::query::by_category_letter;
use eco_core::{
    build_position_index, resolve, search_backward, EcoError, GameHandle, OpeningCatalog,
    OpeningSource, SearchOptions, SearchOutcome,
};

#[test]
fn test_petrov_found_four_plies_back() {
    let catalog = petrov_catalog();
    let mut game = ScriptedGame::new(
        &["posX w - - 0 1", "posP b - - 0 2", "posQ w - - 0 3", "posR b - - 0 4"],
        "posY w - - 0 5",
    );
    let options = SearchOptions {
        max_plies: Some(50),
        ..Default::default()
    };

    let outcome = search_backward(&mut game, &catalog, &options).unwrap();
    let record = outcome.record.expect("Petrov should be found");
    assert_eq!(record.name, "Petrov's Defense");
    assert_eq!(record.eco, "C42");
    assert_eq!(outcome.plies_back, 4);
    assert_eq!(game.current(), "posY w - - 0 5");
    assert_eq!(game.load_calls, 1);
}

#[test]
fn test_petrov_found_with_flat_counters() {
    let catalog = petrov_catalog();
    // Exported without move counters: every FEN ends in "0 1".
    let mut game = ScriptedGame::new(
        &["posX w - - 0 1", "posP b - - 0 1", "posQ w - - 0 1", "posR b - - 0 1"],
        "posY w - - 0 1",
    );
    let options = SearchOptions {
        max_plies: Some(50),
        ..Default::default()
    };

    let outcome = search_backward(&mut game, &catalog, &options).unwrap();
    assert_eq!(outcome.record.unwrap().eco, "C42");
    assert_eq!(outcome.plies_back, 4);
    assert_eq!(game.current(), "posY w - - 0 1");
}

#[test]
fn test_no_history_not_found() {
    let catalog = petrov_catalog();
    let mut game = ScriptedGame::new(&[], "posY w - - 0 5");

    let outcome = search_backward(&mut game, &catalog, &SearchOptions::default()).unwrap();
    assert_eq!(outcome, SearchOutcome::not_found());
    assert_eq!(game.current(), "posY w - - 0 5");
}

#[test]
fn test_raised_exhaustion_is_not_found() {
    let catalog = petrov_catalog();
    let mut game = ScriptedGame::new(&["posQ w - - 0 3"], "posY w - - 0 5");
    game.raise_when_empty = true;

    let outcome = search_backward(&mut game, &catalog, &SearchOptions::default()).unwrap();
    assert_eq!(outcome.record, None);
    assert_eq!(outcome.plies_back, 0);
    assert_eq!(game.undo_calls, 2);
    assert_eq!(game.current(), "posY w - - 0 5");
}

#[test]
fn test_zero_budget_checks_only_current() {
    let catalog = petrov_catalog();
    let options = SearchOptions {
        max_plies: Some(0),
        ..Default::default()
    };

    let mut miss = ScriptedGame::new(&["posX w - - 0 1"], "posY b - - 0 1");
    let outcome = search_backward(&mut miss, &catalog, &options).unwrap();
    assert!(!outcome.is_found());
    assert_eq!(miss.undo_calls, 0);

    let mut hit = ScriptedGame::new(&[], "posX w - - 0 1");
    let outcome = search_backward(&mut hit, &catalog, &options).unwrap();
    assert!(outcome.is_found());
    assert_eq!(hit.undo_calls, 0);
}

#[test]
fn test_exact_match_beats_fallback() {
    let mut catalog = OpeningCatalog::new();
    catalog.insert("board w KQkq - 0 1".into(), record(OpeningSource::EcoTsv, "A00", "White", ""));
    catalog.insert("board b KQkq - 0 1".into(), record(OpeningSource::Scid, "A01", "Black", ""));
    let index = build_position_index(&catalog);

    for (fen, record) in &catalog {
        assert_eq!(resolve(&catalog, fen, Some(&index)), Some(record));
    }
    // Fallback always picks the first catalog entry for the board.
    assert_eq!(resolve(&catalog, "board b - - 9 9", Some(&index)).unwrap().name, "White");
}

#[test]
fn test_index_build_is_deterministic() {
    let mut catalog = OpeningCatalog::new();
    for (i, side) in ["w", "b"].iter().enumerate() {
        for board in ["b1", "b2", "b3"] {
            catalog.insert(
                format!("{board} {side} - - 0 {}", i + 1),
                record(OpeningSource::EcoJs, "B00", board, ""),
            );
        }
    }

    let first = build_position_index(&catalog);
    let second = build_position_index(&catalog);
    assert_eq!(first.keys().collect::<Vec<_>>(), second.keys().collect::<Vec<_>>());
    for key in first.keys() {
        assert_eq!(first.get(key), second.get(key));
    }
}

#[test]
fn test_category_letter_validation() {
    let catalog = petrov_catalog();
    for bad in ["F", "", "aa"] {
        assert!(matches!(
            by_category_letter(&catalog, bad),
            Err(EcoError::InvalidCategory(_))
        ));
    }
    assert!(by_category_letter(&catalog, "A").unwrap().is_empty());
    assert_eq!(by_category_letter(&catalog, "C").unwrap().len(), 1);
}
