use std::collections::HashSet;

use menace::tictactoe::{Board, D4Transform};

mod common;

#[test]
fn canonical_key_is_invariant_under_all_symmetries() {
    for board in common::reachable_boards() {
        let key = board.canonical_key();
        for transform in D4Transform::all() {
            assert_eq!(
                board.transform(&transform).canonical_key(),
                key,
                "{transform:?} changed the key of\n{board}"
            );
        }
    }
}

#[test]
fn canonical_key_is_the_smallest_variant() {
    for board in common::reachable_boards() {
        let smallest = D4Transform::all()
            .iter()
            .map(|t| board.transform(t).encode())
            .min()
            .unwrap();
        assert_eq!(board.canonical_key(), smallest);
    }
}

#[test]
fn asymmetric_pair_gets_distinct_keys() {
    // Corner opening and edge opening are not related by any symmetry.
    let corner = Board::from_string("X........").unwrap();
    let edge = Board::from_string(".X.......").unwrap();
    assert_ne!(corner.canonical_key(), edge.canonical_key());

    let a = Board::from_string("XO.......").unwrap();
    let b = Board::from_string("X.O......").unwrap();
    assert_ne!(a.canonical_key(), b.canonical_key());
}

#[test]
fn keys_separate_exactly_the_symmetry_classes() {
    let boards = common::reachable_boards();
    assert_eq!(boards.len(), 5478);

    let keys: HashSet<_> = boards.iter().map(Board::canonical_key).collect();
    assert_eq!(keys.len(), 765);

    // Two boards share a key only if some symmetry maps one onto the other.
    let mut by_key = std::collections::HashMap::new();
    for board in &boards {
        let representative = *by_key.entry(board.canonical_key()).or_insert(*board);
        assert!(
            D4Transform::all()
                .iter()
                .any(|t| representative.transform(t) == *board),
            "boards with key {} are not symmetric",
            board.canonical_key()
        );
    }
}

#[test]
fn moves_map_between_frames() {
    for board in common::reachable_boards() {
        let ctx = board.canonical_context();
        let canonical = Board::from_cells(ctx.key.cells());
        for pos in board.empty_positions() {
            let mapped = ctx.to_canonical(pos);
            assert!(canonical.is_empty(mapped));
            assert_eq!(ctx.to_original(mapped), pos);
        }
    }
}
