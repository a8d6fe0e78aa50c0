//! Property-based tests for the pour engine and win evaluator
//!
//! Boards come from seeded deals, then random move sequences are applied.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use water_sort::{Board, Container, Move, PourError};

const SYMBOLS: [char; 5] = ['A', 'B', 'C', 'D', 'E'];

fn deal(types: usize, capacity: usize, empty: usize, seed: u64) -> Board<char> {
    let mut rng = StdRng::seed_from_u64(seed);
    Board::generate(&SYMBOLS[..types], capacity, empty, &mut rng)
}

fn board_strategy() -> impl Strategy<Value = Board<char>> {
    (1usize..=5, 1usize..=6, 1usize..=3, any::<u64>())
        .prop_map(|(types, capacity, empty, seed)| deal(types, capacity, empty, seed))
}

fn moves_strategy() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0usize..8, 0usize..8), 0..60)
}

proptest! {
    /// Every type keeps exactly `capacity` blocks whatever is poured
    #[test]
    fn pours_conserve_blocks(board in board_strategy(), moves in moves_strategy()) {
        let mut board = board;
        let capacity = board.get(0).unwrap().get_capacity();
        let symbols = board.symbols();
        for (from, to) in moves {
            let _ = board.pour(Move::new(from % board.len(), to % board.len()));
            for symbol in &symbols {
                prop_assert_eq!(board.count_of(symbol), capacity);
            }
        }
    }

    /// No container ever exceeds its capacity
    #[test]
    fn pours_respect_capacity(board in board_strategy(), moves in moves_strategy()) {
        let mut board = board;
        for (from, to) in moves {
            let _ = board.pour(Move::new(from % board.len(), to % board.len()));
            for container in board.containers() {
                prop_assert!(container.len() <= container.get_capacity());
            }
        }
    }

    /// A legal pour moves exactly min(top run, free space) blocks of the top type
    #[test]
    fn legal_pours_are_maximal(board in board_strategy(), moves in moves_strategy()) {
        let mut board = board;
        for (from, to) in moves {
            let mv = Move::new(from % board.len(), to % board.len());
            if !board.is_legal(mv) {
                continue;
            }
            let source = board.get(mv.from).unwrap().clone();
            let destination = board.get(mv.to).unwrap().clone();
            let top = *source.get_top_block().unwrap();
            let expected = source.get_top_run().min(destination.get_free_space());

            let moved = board.pour(mv).unwrap();
            prop_assert_eq!(moved, expected);
            prop_assert_eq!(board.get(mv.from).unwrap().len(), source.len() - moved);
            let cells = board.get(mv.to).unwrap().get_cells();
            prop_assert_eq!(cells.len(), destination.len() + moved);
            prop_assert!(cells[destination.len()..].iter().all(|c| *c == top));
        }
    }

    /// Illegal pours change nothing and fail the same way twice
    #[test]
    fn rejected_pours_are_idempotent(board in board_strategy(), from in 0usize..8, to in 0usize..8) {
        let mut board = board;
        let mv = Move::new(from % board.len(), to % board.len());
        prop_assume!(!board.is_legal(mv));
        let before = board.clone();
        let first = board.pour(mv).unwrap_err();
        let second = board.pour(mv).unwrap_err();
        prop_assert_eq!(first, second);
        prop_assert_eq!(board, before);
    }

    /// The hint list and the pour gate agree on every ordered pair
    #[test]
    fn enumerator_matches_gate(board in board_strategy(), moves in moves_strategy()) {
        let mut board = board;
        for (from, to) in moves {
            let _ = board.pour(Move::new(from % board.len(), to % board.len()));
        }
        let legal = board.legal_moves();
        for from in 0..board.len() {
            for to in 0..board.len() {
                let mv = Move::new(from, to);
                prop_assert_eq!(legal.contains(&mv), board.clone().pour(mv).is_ok());
            }
        }
        let mut sorted = legal.clone();
        sorted.sort_by_key(|mv| (mv.from, mv.to));
        prop_assert_eq!(legal, sorted);
    }

    /// Solved means every container is empty or full of one type
    #[test]
    fn solved_matches_definition(board in board_strategy(), moves in moves_strategy()) {
        let mut board = board;
        for (from, to) in moves {
            let _ = board.pour(Move::new(from % board.len(), to % board.len()));
        }
        let expected = board.containers().iter().all(|c| {
            c.is_empty() || (c.is_full() && c.get_cells().iter().all(|x| Some(x) == c.get_top_block()))
        });
        prop_assert_eq!(board.is_solved(), expected);
    }
}

#[test]
fn empty_source_is_rejected() {
    let mut board = Board::from_layout("AB,BA,", 2).unwrap();
    let before = board.clone();
    assert_eq!(board.pour(Move::new(2, 0)), Err(PourError::EmptySource));
    assert_eq!(board, before);
}

#[test]
fn partial_uniform_container_is_not_solved() {
    let board = Board::from_layout("AAA,AA,", 5).unwrap();
    assert!(!board.is_solved());
}

#[test]
fn mixed_full_container_is_not_solved() {
    let board = Board::from_containers(vec![
        Container::from_cells(vec!['A', 'A', 'A', 'A'], 4).unwrap(),
        Container::from_cells(vec!['B', 'B', 'B', 'A'], 4).unwrap(),
    ]);
    assert!(board.get(0).unwrap().is_sorted());
    assert!(!board.get(1).unwrap().is_sorted());
    assert!(!board.is_solved());
}
