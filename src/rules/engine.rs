//! The turn engine.
//!
//! [`LudoEngine`] owns the authoritative match state and is the only
//! thing that mutates it. The UI feeds it intents ([`request_roll`],
//! [`select_die`], [`move_token`]) and drives time through [`tick`];
//! everything else (roll resolution, auto-moves, stuck-die discards,
//! turn advances) happens as scheduled follow-ups so that a stale
//! callback can never fire against superseded state.
//!
//! Invalid intents are silent no-ops: the UI computes legality itself
//! for highlighting and is expected to only offer legal actions, so an
//! illegal one is simply ignored rather than surfaced as an error.
//!
//! [`request_roll`]: LudoEngine::request_roll
//! [`select_die`]: LudoEngine::select_die
//! [`move_token`]: LudoEngine::move_token
//! [`tick`]: LudoEngine::tick

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board;
use crate::core::{
    Color, DiceQueue, DiceRng, DieId, DieRoll, Event, GameState, PlayerProgress, TokenId,
    TurnState, TurnSummary,
};
use crate::schedule::{FollowUp, Scheduler};

use super::legal::{MovePlan, Rules};
use super::{GameMode, GameResult, Relationship};

/// Match configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Rule set variant.
    pub mode: GameMode,

    /// Two-team play: (green, blue) vs (yellow, red).
    pub teams: bool,

    /// Seed for the die roller.
    pub seed: u64,

    /// Delay between a roll request and its face value.
    pub roll_delay_ms: u64,

    /// Delay before an unambiguous move plays itself.
    pub auto_move_delay_ms: u64,

    /// Display delay before a turn passes (skip, forfeit, exhaustion).
    pub advance_delay_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::Classic,
            teams: false,
            seed: 0,
            roll_delay_ms: 500,
            auto_move_delay_ms: 500,
            advance_delay_ms: 1000,
        }
    }
}

/// The rules and turn engine for one match.
#[derive(Clone, Debug)]
pub struct LudoEngine {
    config: EngineConfig,
    rules: Rules,
    state: GameState,
    turn: TurnState,
    queue: DiceQueue,
    rng: DiceRng,
    scheduler: Scheduler,
    history: Vector<Event>,
    next_die_id: u64,
    last_roll: Option<u8>,
    faces_this_turn: SmallVec<[u8; 4]>,
    prev_turn: Option<TurnSummary>,
}

impl LudoEngine {
    /// Create a fresh match.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            rules: Rules::new(config.mode, config.teams),
            state: GameState::new(),
            turn: TurnState::new(),
            queue: DiceQueue::new(),
            rng: DiceRng::new(config.seed),
            scheduler: Scheduler::new(),
            history: Vector::new(),
            next_die_id: 0,
            last_roll: None,
            faces_this_turn: SmallVec::new(),
            prev_turn: None,
        }
    }

    /// Create a fresh match with pre-decided die faces.
    ///
    /// Replays are exact: the same script yields the same match given the
    /// same intents, and the roller falls back to the seeded weighted
    /// stream once the script runs out.
    #[must_use]
    pub fn with_script(config: EngineConfig, faces: &[u8]) -> Self {
        let mut engine = Self::new(config);
        engine.rng.push_script(faces);
        engine
    }

    // === Reads ===

    /// The configuration this match was created with.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The rule set (mode plus team toggle).
    #[must_use]
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Authoritative token positions and progress.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Roll/turn-pointer state.
    #[must_use]
    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    /// The color whose turn it is.
    #[must_use]
    pub fn active_color(&self) -> Color {
        self.turn.active_color()
    }

    /// May the active color roll right now?
    #[must_use]
    pub fn can_roll(&self) -> bool {
        self.turn.can_roll
    }

    /// Is a roll animation pending?
    #[must_use]
    pub fn rolling(&self) -> bool {
        self.turn.rolling
    }

    /// Progress flags for a color.
    #[must_use]
    pub fn progress(&self, color: Color) -> PlayerProgress {
        self.state.progress(color)
    }

    /// The active color's unspent dice, in roll order.
    #[must_use]
    pub fn dice_queue(&self) -> &DiceQueue {
        &self.queue
    }

    /// The currently selected die, if any.
    #[must_use]
    pub fn selected_die(&self) -> Option<DieRoll> {
        self.turn.selected.and_then(|id| self.queue.get(id))
    }

    /// Face value of the most recently resolved roll.
    #[must_use]
    pub fn last_roll(&self) -> Option<u8> {
        self.last_roll
    }

    /// Summary of the previous turn, for the dice panel.
    #[must_use]
    pub fn prev_turn(&self) -> Option<&TurnSummary> {
        self.prev_turn.as_ref()
    }

    /// Everything that has happened, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<Event> {
        &self.history
    }

    /// The match result, once some color has finished all four tokens.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.rules.terminal_result(&self.state)
    }

    /// Time until the next scheduled follow-up fires, if any.
    #[must_use]
    pub fn next_due_in(&self) -> Option<u64> {
        self.scheduler.next_due_in()
    }

    /// Tokens the selected die can legally move, for highlighting.
    ///
    /// Falls back to the partner's tokens (team play) only when the
    /// turn-holder has no legal move of their own.
    #[must_use]
    pub fn valid_tokens(&self) -> Vec<(Color, TokenId)> {
        let Some(roll) = self.selected_die() else {
            return Vec::new();
        };
        if self.turn.forfeited || self.turn.rolling {
            return Vec::new();
        }
        let (color, ids) = self
            .rules
            .movers_for(&self.state, self.active_color(), roll.value);
        ids.into_iter().map(|id| (color, id)).collect()
    }

    /// Queued dice that would legally move a token.
    ///
    /// Used by the UI to disambiguate when a token is movable by more
    /// than one queued die.
    #[must_use]
    pub fn dice_for_token(&self, id: TokenId, owner: Color) -> Vec<DieRoll> {
        if self.result().is_some() || self.turn.forfeited {
            return Vec::new();
        }
        self.queue
            .iter()
            .filter(|roll| self.may_move(owner, id, roll.value))
            .collect()
    }

    /// Full control check for a (token, die value) intent, including the
    /// team-sharing gate: your own tokens first.
    fn may_move(&self, owner: Color, id: TokenId, die_value: u8) -> bool {
        let active = self.active_color();
        if owner != active {
            if self.rules.relationship(active, owner) != Relationship::Teammate {
                return false;
            }
            // A teammate's token may only move when the turn-holder has
            // zero legal moves of their own for this die.
            if !self.rules.legal_own_tokens(&self.state, active, die_value).is_empty() {
                return false;
            }
        }
        self.rules.is_valid_move(&self.state, owner, id, die_value)
    }

    // === Intents ===

    /// Ask for a roll. Ignored while locked, mid-roll, or after the
    /// match has ended.
    pub fn request_roll(&mut self) -> bool {
        if self.result().is_some() || self.turn.forfeited {
            return false;
        }
        if !self.turn.can_roll || self.turn.rolling {
            return false;
        }
        self.turn.rolling = true;
        self.turn.can_roll = false;
        self.scheduler.bump_epoch();
        self.scheduler
            .schedule(FollowUp::ResolveRoll, self.config.roll_delay_ms);
        true
    }

    /// Select a queued die. Only permitted once the roll chain for the
    /// current sub-turn has stopped.
    pub fn select_die(&mut self, id: DieId) -> bool {
        if self.result().is_some() || self.turn.forfeited {
            return false;
        }
        if self.turn.rolling || self.turn.can_roll {
            return false;
        }
        if self.queue.get(id).is_none() {
            return false;
        }
        self.turn.selected = Some(id);
        self.scheduler.bump_epoch();
        self.scheduler
            .schedule(FollowUp::AutoResolve, self.config.auto_move_delay_ms);
        true
    }

    /// Spend a queued die on a token. Ignored when the die is gone, the
    /// move is illegal, or the token is not the caller's to move.
    pub fn move_token(&mut self, id: TokenId, owner: Color, die: DieId) -> bool {
        if self.result().is_some() || self.turn.forfeited {
            return false;
        }
        let Some(roll) = self.queue.get(die) else {
            return false;
        };
        if !self.may_move(owner, id, roll.value) {
            return false;
        }
        let Some(plan) = self.rules.plan_move(&self.state, owner, id, roll.value) else {
            return false;
        };
        self.apply_plan(owner, &plan, die);
        true
    }

    /// Advance the engine clock, firing any due follow-ups.
    ///
    /// Each fired follow-up mutates state and thereby revokes whatever
    /// else was scheduled against the old state.
    pub fn tick(&mut self, elapsed_ms: u64) {
        self.scheduler.advance(elapsed_ms);
        while let Some(follow_up) = self.scheduler.pop_due() {
            match follow_up {
                FollowUp::ResolveRoll => self.resolve_roll(),
                FollowUp::AutoResolve => self.auto_resolve(),
                FollowUp::AdvanceTurn | FollowUp::ForfeitTurn => self.advance_turn(),
            }
        }
    }

    // === Internals ===

    fn alloc_die(&mut self, value: u8) -> DieRoll {
        let id = DieId(self.next_die_id);
        self.next_die_id += 1;
        DieRoll { id, value }
    }

    fn resolve_roll(&mut self) {
        let color = self.active_color();
        self.turn.rolling = false;

        let value = self.rng.roll_face();
        self.last_roll = Some(value);
        self.faces_this_turn.push(value);
        let die = self.alloc_die(value);
        self.queue.push(die);
        self.history.push_back(Event::RollResolved { color, die });
        self.scheduler.bump_epoch();

        if value == 6 {
            self.turn.consecutive_sixes += 1;
            if self.turn.consecutive_sixes >= 3 {
                // Triple six: the die stays visible for a moment, then
                // the whole queue is forfeited and the turn passes.
                self.turn.can_roll = false;
                self.turn.forfeited = true;
                self.turn.selected = None;
                self.history.push_back(Event::TurnForfeited { color });
                self.scheduler
                    .schedule(FollowUp::ForfeitTurn, self.config.advance_delay_ms);
                return;
            }
            // The six grants another roll; dice keep stacking.
            self.turn.can_roll = true;
            return;
        }

        self.turn.consecutive_sixes = 0;
        self.turn.can_roll = false;
        if self.turn.selected.is_none() && self.queue.len() == 1 {
            self.turn.selected = Some(die.id);
        }
        self.scheduler
            .schedule(FollowUp::AutoResolve, self.config.auto_move_delay_ms);
    }

    /// Resolve the current die selection without user input when there
    /// is nothing to choose: a single distinguishable move plays itself,
    /// and a die nobody can use is discarded so the game never stalls.
    fn auto_resolve(&mut self) {
        if self.turn.rolling || self.turn.can_roll || self.turn.forfeited {
            return;
        }
        if self.queue.is_empty() {
            return;
        }

        if self.turn.selected.is_none() {
            self.turn.selected = self.queue.first().map(|r| r.id);
        }
        let Some(roll) = self.selected_die() else {
            return;
        };

        let (color, movers) = self
            .rules
            .movers_for(&self.state, self.active_color(), roll.value);

        if movers.is_empty() {
            self.queue.remove(roll.id);
            self.turn.selected = self.queue.first().map(|r| r.id);
            self.history.push_back(Event::DieDiscarded {
                color: self.active_color(),
                die: roll,
            });
            self.scheduler.bump_epoch();
            if self.queue.is_empty() {
                self.scheduler
                    .schedule(FollowUp::AdvanceTurn, self.config.advance_delay_ms);
            } else {
                self.scheduler
                    .schedule(FollowUp::AutoResolve, self.config.auto_move_delay_ms);
            }
            return;
        }

        // Tokens on the same source step are interchangeable, so a
        // single distinct source means a single distinguishable move.
        let mut sources: SmallVec<[i8; 4]> = movers
            .iter()
            .map(|&id| self.state.token(color, id).steps)
            .collect();
        sources.sort_unstable();
        sources.dedup();
        if sources.len() == 1 {
            if let Some(plan) = self.rules.plan_move(&self.state, color, movers[0], roll.value) {
                self.apply_plan(color, &plan, roll.id);
            }
        }
        // Otherwise wait for an explicit token choice.
    }

    fn apply_plan(&mut self, owner: Color, plan: &MovePlan, die: DieId) {
        let mut captured = false;

        // Captures happen on the open ring, off safe spots, against
        // non-teammates only.
        if plan.to <= self.rules.ring_limit(&self.state, owner) {
            let cell = board::global_cell(owner, plan.to);
            if !board::is_safe(cell) {
                for victim_color in Color::all() {
                    if self.rules.relationship(owner, victim_color) != Relationship::Opponent {
                        continue;
                    }
                    let victims = self.rules.tokens_on_cell(&self.state, victim_color, cell);
                    if victims.is_empty() {
                        continue;
                    }
                    if victims.len() >= 2 && !plan.paired {
                        // A validated-but-stale pairing mismatch must not
                        // let a lone token break a pair.
                        continue;
                    }
                    for v in victims {
                        self.state.send_home(victim_color, v);
                        self.history.push_back(Event::Captured {
                            by: owner,
                            victim: victim_color,
                            token: v,
                            cell,
                        });
                    }
                    captured = true;
                }
                if captured {
                    self.state.record_capture(owner);
                }
            }
        }

        for &mover in &plan.movers {
            self.state.set_steps(owner, mover, plan.to);
        }
        self.history.push_back(Event::Moved {
            color: owner,
            token: plan.movers[0],
            from: plan.from,
            to: plan.to,
            paired: plan.paired,
        });

        self.queue.remove(die);
        self.turn.selected = self.queue.first().map(|r| r.id);
        self.scheduler.bump_epoch();

        if captured {
            // A capture grants another roll; the turn continues.
            self.turn.can_roll = true;
        }
        if self.result().is_some() {
            return;
        }
        if !self.turn.can_roll {
            if self.queue.is_empty() {
                self.scheduler
                    .schedule(FollowUp::AdvanceTurn, self.config.advance_delay_ms);
            } else {
                self.scheduler
                    .schedule(FollowUp::AutoResolve, self.config.auto_move_delay_ms);
            }
        }
    }

    fn advance_turn(&mut self) {
        let from = self.active_color();
        self.prev_turn = Some(TurnSummary {
            color: from,
            faces: std::mem::take(&mut self.faces_this_turn),
        });
        self.queue.clear();
        self.turn.advance();
        let to = self.active_color();
        self.history.push_back(Event::TurnAdvanced { from, to });
        self.scheduler.bump_epoch();
    }
}
