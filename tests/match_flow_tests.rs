//! Full match-flow integration tests.
//!
//! These drive [`LudoEngine`] exclusively through its public intent API
//! with scripted dice, the way a UI would: request rolls, tick the clock,
//! pick tokens when the engine waits for a choice.

use ludo_core::{
    Color, EngineConfig, Event, GameMode, LudoEngine, TokenId, GOAL,
};

/// Tick far enough for every cascaded delay to fire.
fn settle(engine: &mut LudoEngine) {
    for _ in 0..16 {
        engine.tick(1000);
    }
}

/// Roll whenever permitted and let follow-ups play out, `rolls` times.
fn drive_rolls(engine: &mut LudoEngine, rolls: usize) {
    for _ in 0..rolls {
        assert!(engine.request_roll(), "expected to be allowed to roll");
        settle(engine);
    }
}

// =============================================================================
// Opening Flow
// =============================================================================

/// Test that an unusable opening roll passes the turn around the table.
#[test]
fn test_opening_discards_rotate_turn() {
    let mut engine = LudoEngine::with_script(EngineConfig::default(), &[3, 1, 5, 2]);

    let order = [Color::Green, Color::Yellow, Color::Blue, Color::Red];
    for expected in order {
        assert_eq!(engine.active_color(), expected);
        drive_rolls(&mut engine, 1);
    }
    // Full circle, nothing spawned.
    assert_eq!(engine.active_color(), Color::Green);
    for color in Color::all() {
        assert!(engine.state().tokens(color).iter().all(|t| t.is_home()));
    }
}

/// Test that a six spawns a token and the follow-up die moves it.
#[test]
fn test_six_spawns_then_moves() {
    let mut engine = LudoEngine::with_script(EngineConfig::default(), &[6, 2]);

    drive_rolls(&mut engine, 2);

    let runner = engine.state().token(Color::Green, TokenId::new(0));
    assert_eq!(runner.steps, 2);
    assert_eq!(engine.active_color(), Color::Yellow);
}

/// Test that three sixes in a row forfeit the whole turn.
#[test]
fn test_triple_six_forfeits() {
    let mut engine = LudoEngine::with_script(EngineConfig::default(), &[6, 6, 6]);

    drive_rolls(&mut engine, 3);

    // Nothing spawned, nothing moved, turn gone.
    assert!(engine
        .state()
        .tokens(Color::Green)
        .iter()
        .all(|t| t.is_home()));
    assert_eq!(engine.active_color(), Color::Yellow);
    assert!(engine
        .history()
        .iter()
        .any(|e| matches!(e, Event::TurnForfeited { color: Color::Green })));
}

// =============================================================================
// Captures
// =============================================================================

/// Test a scripted capture: green runs down yellow's runner on an open
/// cell, gets sent another roll, and yellow restarts from home.
#[test]
fn test_scripted_capture_grants_extra_roll() {
    // Turn by turn:
    //   G 6,2  spawn, advance to rel 2
    //   Y 3  B 3  R 3  all discarded
    //   G 4  rel 6
    //   Y 6,2  spawn, advance to rel 2 (global 15)
    //   B 1  R 1  discarded
    //   G 5  rel 11
    //   Y 1  rel 3 (global 16)
    //   B 2  R 2  discarded
    //   G 5  rel 16 (global 16) captures yellow, extra roll
    //   G 1  rel 17
    let script = [6, 2, 3, 3, 3, 4, 6, 2, 1, 1, 5, 1, 2, 2, 5, 1];
    let mut engine = LudoEngine::with_script(EngineConfig::default(), &script);

    drive_rolls(&mut engine, script.len());

    assert_eq!(engine.state().token(Color::Green, TokenId::new(0)).steps, 17);
    assert!(engine.state().token(Color::Yellow, TokenId::new(0)).is_home());
    assert!(engine.progress(Color::Green).has_captured);
    assert!(engine.history().iter().any(|e| matches!(
        e,
        Event::Captured {
            by: Color::Green,
            victim: Color::Yellow,
            cell: 16,
            ..
        }
    )));
    // The capture kept green's turn alive for one more roll.
    assert_eq!(engine.active_color(), Color::Yellow);
}

// =============================================================================
// Choice Handling
// =============================================================================

/// Test that with two distinct runners the engine waits for a token
/// choice instead of auto-moving.
#[test]
fn test_ambiguous_move_waits_for_choice() {
    // G 6,2: spawn t0 to 0, move it to 2. Y/B/R discard 3s.
    // G 6: spawn-or-advance is ambiguous; chain continues with a 1 and
    // then the engine must wait.
    let script = [6, 2, 3, 3, 3, 6, 1];
    let mut engine = LudoEngine::with_script(EngineConfig::default(), &script);

    drive_rolls(&mut engine, 5);
    assert!(engine.request_roll()); // the 6
    settle(&mut engine);
    assert!(engine.request_roll()); // the 1
    settle(&mut engine);

    // Still green's turn: two dice queued, several candidate tokens.
    assert_eq!(engine.active_color(), Color::Green);
    assert_eq!(engine.dice_queue().len(), 2);
    let targets = engine.valid_tokens();
    assert!(targets.len() > 1);

    // Resolve the choice: spend the six on a fresh spawn.
    let six = engine
        .dice_queue()
        .iter()
        .find(|r| r.value == 6)
        .unwrap();
    assert!(engine.move_token(TokenId::new(1), Color::Green, six.id));
    settle(&mut engine);

    // The remaining 1 had two runners (rel 0 and rel 2); pick one.
    if engine.active_color() == Color::Green {
        let die = engine.dice_queue().first().unwrap();
        assert!(engine.move_token(TokenId::new(1), Color::Green, die.id));
        settle(&mut engine);
    }
    assert_eq!(engine.active_color(), Color::Yellow);
    assert_eq!(engine.state().token(Color::Green, TokenId::new(1)).steps, 1);
    assert_eq!(engine.state().token(Color::Green, TokenId::new(0)).steps, 2);
}

// =============================================================================
// Modes and Replays
// =============================================================================

/// Test that Master mode keeps an uncaptured color circling the ring.
#[test]
fn test_master_mode_engine_flow() {
    let config = EngineConfig {
        mode: GameMode::Master,
        ..EngineConfig::default()
    };
    // Green spawns and walks; without a capture it may never enter the
    // home stretch no matter how long the match runs.
    let script: Vec<u8> = std::iter::once(6)
        .chain(std::iter::repeat(5).take(60))
        .collect();
    let mut engine = LudoEngine::with_script(config, &script);

    for _ in 0..script.len() {
        if engine.can_roll() {
            engine.request_roll();
        }
        settle(&mut engine);
    }

    for color in Color::all() {
        if !engine.progress(color).has_captured {
            for token in engine.state().tokens(color) {
                assert!(token.steps < 52, "locked token escaped the ring");
            }
        }
    }
}

/// Test that identical scripts and intents replay to identical matches.
#[test]
fn test_scripted_replay_is_exact() {
    let script: Vec<u8> = (0..120).map(|i| (i % 6) + 1).collect();
    let config = EngineConfig {
        seed: 99,
        ..EngineConfig::default()
    };
    let mut a = LudoEngine::with_script(config, &script);
    let mut b = LudoEngine::with_script(config, &script);

    for _ in 0..80 {
        for engine in [&mut a, &mut b] {
            if engine.can_roll() {
                engine.request_roll();
            } else if let Some(die) = engine.selected_die() {
                if let Some(&(color, id)) = engine.valid_tokens().first() {
                    engine.move_token(id, color, die.id);
                }
            }
            engine.tick(1000);
        }
        assert_eq!(a.state(), b.state());
        assert_eq!(a.history().len(), b.history().len());
    }
}

/// Test the coordinate contract the UI renders against.
#[test]
fn test_step_coordinate_contract() {
    assert_eq!(GOAL, 56);
    assert_eq!(ludo_core::HOME, -1);
    assert_eq!(ludo_core::RING_END, 50);
    assert_eq!(ludo_core::STRETCH_START, 51);
    assert_eq!(ludo_core::RING_CELLS, 52);
}
