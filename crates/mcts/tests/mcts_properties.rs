//! Property-based tests for the MCTS agent on the real board.
//!
//! These tests verify the search invariants:
//! - the chosen move is always legal
//! - visit counts add up along the tree
//! - scores stay within [0, 1]
//! - the same seed gives the same search

use proptest::prelude::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use uttt_board::Board;
use uttt_core::{Agent, Game};
use uttt_mcts::{Mcts, MctsConfig, RolloutEvaluator};

type BoardMcts = Mcts<Board, RolloutEvaluator<ChaCha8Rng>, ChaCha8Rng>;

fn mcts(iterations: usize, seed: u64) -> BoardMcts {
    Mcts::new(
        MctsConfig::with_iterations(iterations),
        RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(seed)),
        ChaCha8Rng::seed_from_u64(seed ^ 0x5eed),
    )
}

// =============================================================================
// Strategies for generating test inputs
// =============================================================================

/// Generate a random seed for MCTS
fn arb_seed() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Generate a random number of iterations (small for fast tests)
fn arb_iterations() -> impl Strategy<Value = usize> {
    2usize..150
}

/// Generate an unfinished position by playing random moves.
fn arb_position() -> impl Strategy<Value = Board> {
    (0usize..40, arb_seed()).prop_map(|(num_moves, seed)| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut board = Board::new();
        for _ in 0..num_moves {
            let moves = board.available_moves();
            let Some(&mv) = moves.choose(&mut rng) else {
                break;
            };
            let mut next = board.clone();
            next.apply_move(mv).unwrap();
            if next.is_terminal() {
                break;
            }
            board = next;
        }
        board
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_best_move_is_legal(
        seed in arb_seed(),
        iterations in arb_iterations(),
        board in arb_position()
    ) {
        let mut mcts = mcts(iterations, seed);
        let snapshot = board.clone();

        let mv = mcts.pick_move(&board).unwrap();

        prop_assert!(board.available_moves().contains(&mv), "illegal move {}", mv);
        // Deciding never touches the live state
        prop_assert_eq!(board, snapshot);
    }

    /// A fresh root is visited once per iteration; every visit after the
    /// first goes through exactly one child.
    #[test]
    fn prop_visit_counts_add_up(
        seed in arb_seed(),
        iterations in arb_iterations(),
        board in arb_position()
    ) {
        let result = mcts(iterations, seed).search(&board).unwrap();

        prop_assert_eq!(result.iterations, iterations);
        prop_assert_eq!(result.root_visits as usize, iterations);

        let child_visits: u32 = result.children.iter().map(|c| c.visits).sum();
        prop_assert_eq!(child_visits as usize, iterations - 1);
    }

    /// Once expanded, the root has one child per legal move, in order.
    #[test]
    fn prop_root_children_match_available_moves(
        seed in arb_seed(),
        iterations in arb_iterations(),
        board in arb_position()
    ) {
        let result = mcts(iterations, seed).search(&board).unwrap();
        let moves: Vec<_> = result.children.iter().map(|c| c.mv).collect();
        prop_assert_eq!(moves, board.available_moves());
    }

    #[test]
    fn prop_scores_in_range(
        seed in arb_seed(),
        iterations in arb_iterations(),
        board in arb_position()
    ) {
        let result = mcts(iterations, seed).search(&board).unwrap();
        for child in &result.children {
            prop_assert!(
                (0.0..=1.0).contains(&child.score),
                "score {} for {} out of range",
                child.score,
                child.mv
            );
        }
    }

    /// Same seed should produce identical results
    #[test]
    fn prop_deterministic(
        seed in arb_seed(),
        iterations in arb_iterations(),
        board in arb_position()
    ) {
        let result1 = mcts(iterations, seed).search(&board).unwrap();
        let result2 = mcts(iterations, seed).search(&board).unwrap();

        prop_assert_eq!(result1.best_move, result2.best_move);
        prop_assert_eq!(result1.children, result2.children);
    }

    /// The chosen move has the best score among visited children.
    #[test]
    fn prop_best_move_has_best_score(
        seed in arb_seed(),
        iterations in arb_iterations(),
        board in arb_position()
    ) {
        let result = mcts(iterations, seed).search(&board).unwrap();
        let best = result.best().unwrap();
        for child in result.children.iter().filter(|c| c.visits > 0) {
            prop_assert!(child.score <= best.score);
        }
    }
}
