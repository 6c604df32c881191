//! Two-team play integration tests.
//!
//! Teams pair the colors sitting opposite each other: (green, blue) and
//! (yellow, red). A player may move a teammate's token only when none of
//! their own tokens has a legal move for the selected die, teammates
//! never capture or block each other, and victory is shared.

use ludo_core::{
    Color, EngineConfig, Event, GameMode, GameResult, GameState, LudoEngine, Rules, TokenId,
    GOAL,
};

fn team_config() -> EngineConfig {
    EngineConfig {
        teams: true,
        ..EngineConfig::default()
    }
}

fn settle(engine: &mut LudoEngine) {
    for _ in 0..16 {
        engine.tick(1000);
    }
}

// =============================================================================
// Teammate Fallback
// =============================================================================

/// Test that a die the turn-holder cannot use is spent on the partner's
/// token instead of being discarded.
#[test]
fn test_partner_token_moves_on_owners_dead_die() {
    // G 3 discarded (everyone home), Y 3, B 6+2 spawns and runs, R 3,
    // then green's 3 has no own move but blue's runner can take it.
    let script = [3, 3, 6, 2, 3, 3];
    let mut engine = LudoEngine::with_script(team_config(), &script);

    for _ in 0..script.len() {
        assert!(engine.request_roll());
        settle(&mut engine);
    }

    // Blue's runner logs three moves: the spawn and the 2 on blue's own
    // turn, then green's dead 3.
    assert_eq!(engine.state().token(Color::Blue, TokenId::new(0)).steps, 5);
    let blue_moves = engine
        .history()
        .iter()
        .filter(|e| matches!(e, Event::Moved { color: Color::Blue, .. }))
        .count();
    assert_eq!(blue_moves, 3);
    assert!(engine
        .history()
        .iter()
        .any(|e| matches!(
            e,
            Event::Moved { color: Color::Blue, from: 2, to: 5, .. }
        )));
    // Discards: green's opening 3 (blue also home then), yellow's and
    // red's 3s. Green's final 3 went to blue instead of the bin.
    let discards = engine
        .history()
        .iter()
        .filter(|e| matches!(e, Event::DieDiscarded { .. }))
        .count();
    assert_eq!(discards, 3);
}

// =============================================================================
// Rules-Level Team Semantics
// =============================================================================

/// Test that a teammate pair on an intermediate cell does not block.
#[test]
fn test_teammate_pair_never_blocks_passage() {
    let mut state = GameState::new();
    state.set_steps(Color::Green, TokenId::new(0), 2);
    // Blue pair on global cell 5 = blue relative step 31.
    state.set_steps(Color::Blue, TokenId::new(0), 31);
    state.set_steps(Color::Blue, TokenId::new(1), 31);

    let solo = Rules::new(GameMode::Classic, false);
    let teamed = Rules::new(GameMode::Classic, true);
    assert!(!solo.is_valid_move(&state, Color::Green, TokenId::new(0), 5));
    assert!(teamed.is_valid_move(&state, Color::Green, TokenId::new(0), 5));
}

/// Test that the own-tokens-first gate holds even when the own move is
/// objectively worse.
#[test]
fn test_own_token_gate_is_unconditional() {
    let mut state = GameState::new();
    state.set_steps(Color::Green, TokenId::new(0), 10);
    state.set_steps(Color::Blue, TokenId::new(0), 48);

    let teamed = Rules::new(GameMode::Classic, true);
    let (color, ids) = teamed.movers_for(&state, Color::Green, 3);
    assert_eq!(color, Color::Green);
    assert_eq!(ids.as_slice(), &[TokenId::new(0)]);
}

/// Test that both dead-ends fall through: neither side of the team can
/// use the die, so nobody moves.
#[test]
fn test_no_mover_when_whole_team_is_stuck() {
    let state = GameState::new();
    let teamed = Rules::new(GameMode::Classic, true);
    let (_, ids) = teamed.movers_for(&state, Color::Green, 3);
    assert!(ids.is_empty());
}

/// Test shared victory: one color finishing wins for the whole team.
#[test]
fn test_team_victory_is_shared() {
    let mut state = GameState::new();
    for id in TokenId::all() {
        state.set_steps(Color::Red, id, GOAL);
    }
    let teamed = Rules::new(GameMode::Classic, true);
    let result = teamed.terminal_result(&state).unwrap();
    assert_eq!(result, GameResult::Winners(vec![Color::Red, Color::Yellow]));
    assert!(result.is_winner(Color::Yellow));
    assert!(!result.is_winner(Color::Green));
}

/// Test that Master-mode locks are tracked per color, not per team: a
/// partner's capture does not unlock your home stretch.
#[test]
fn test_master_lock_is_per_color_within_team() {
    let mut state = GameState::new();
    state.record_capture(Color::Blue);
    state.set_steps(Color::Green, TokenId::new(0), 48);
    state.set_steps(Color::Blue, TokenId::new(0), 48);

    let rules = Rules::new(GameMode::Master, true);
    // Blue has captured: the 6 enters the stretch.
    let plan = rules.plan_move(&state, Color::Blue, TokenId::new(0), 6).unwrap();
    assert_eq!(plan.to, 54);
    // Green has not: the same move wraps back onto the ring.
    let plan = rules.plan_move(&state, Color::Green, TokenId::new(0), 6).unwrap();
    assert_eq!(plan.to, 2);
}
