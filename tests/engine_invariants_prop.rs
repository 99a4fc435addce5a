//! Property tests for the engine over generated command scripts.
//!
//! Invariants:
//! - score, lines and pieces locked never decrease within a session
//! - level never drops below `level_for(lines)` and never decreases
//! - the board never holds a full row between commands
//! - the current piece never overlaps locked cells or leaves the side walls
//! - a session only ends at spawn, and a dead engine ignores commands

use proptest::prelude::*;

use blockfall::core::{level_for, GameEngine, Randomizer, ScoringPolicy};
use blockfall::types::{Command, BOARD_HEIGHT, BOARD_WIDTH};

const COMMANDS: [Command; 8] = [
    Command::MoveLeft,
    Command::MoveRight,
    Command::SoftDrop,
    Command::HardDrop,
    Command::RotateCw,
    Command::RotateCcw,
    Command::Pause,
    Command::Tick,
];

fn assert_board_consistent(engine: &GameEngine) {
    for y in 0..BOARD_HEIGHT as usize {
        assert!(!engine.board().is_row_full(y), "row {} left full", y);
    }
    if !engine.is_game_over() {
        if let Some(piece) = engine.current() {
            assert!(!engine.board().collides(&piece.cells()));
            for (x, _) in piece.cells() {
                assert!(x >= 0 && x < BOARD_WIDTH as i8);
            }
        }
    }
}

#[test]
fn four_rotations_are_identity_during_play() {
    let mut engine = GameEngine::new(31337);
    engine.start_game();
    for _ in 0..3 {
        engine.tick();
    }
    let before = engine.current().unwrap();
    let mut accepted = 0;
    for _ in 0..4 {
        if engine.rotate(true) {
            accepted += 1;
        }
    }
    if accepted == 4 {
        assert_eq!(engine.current().unwrap().cells(), before.cells());
    }
}

proptest! {
    #[test]
    fn generated_scripts_respect_engine_invariants(
        seed in any::<u32>(),
        script in prop::collection::vec(0usize..COMMANDS.len(), 1..400),
        use_bag7 in any::<bool>(),
        start_level in 1u32..4,
    ) {
        let randomizer = if use_bag7 { Randomizer::Bag7 } else { Randomizer::Uniform };
        let mut engine = GameEngine::with_policy(seed, ScoringPolicy::CLASSIC, randomizer);
        engine.set_level(start_level);
        engine.start_game();

        for idx in script {
            let command = COMMANDS[idx];
            let before = (engine.score(), engine.lines(), engine.level(), engine.pieces_locked());
            let was_over = engine.is_game_over();

            let changed = engine.apply(command);

            prop_assert!(engine.score() >= before.0);
            prop_assert!(engine.lines() >= before.1);
            prop_assert!(engine.level() >= before.2);
            prop_assert!(engine.pieces_locked() >= before.3);
            prop_assert!(engine.level() >= level_for(engine.lines()));
            prop_assert!(engine.level() >= start_level);
            assert_board_consistent(&engine);

            if was_over {
                prop_assert!(!changed);
                break;
            }
            if engine.is_game_over() {
                // Only a lock can top out.
                prop_assert!(engine.pieces_locked() > before.3);
            }
        }
    }

    #[test]
    fn pause_round_trip_preserves_snapshot(
        seed in any::<u32>(),
        moves in prop::collection::vec(0usize..6, 0..40),
    ) {
        let mut engine = GameEngine::new(seed);
        engine.start_game();
        for idx in moves {
            engine.apply(COMMANDS[idx]);
        }
        prop_assume!(engine.is_running());

        let before = engine.snapshot();
        engine.toggle_pause();
        engine.toggle_pause();
        prop_assert_eq!(engine.snapshot(), before);
    }
}
