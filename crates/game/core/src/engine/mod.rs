//! The per-tick reducer for one round.
//!
//! [`RoundEngine`] is the only mutator of [`RoundContext`]. A single
//! cooperative driver calls [`RoundEngine::tick`] with the current
//! clock; within one tick the stages run in fixed order (player step,
//! item pickup, rope, win check, adversary decisions, loss check) and
//! per-entity cadence comes from timestamp comparison, never from
//! separate threads.
pub mod movement;

use crate::env::RoundEnv;
use crate::input::InputState;
use crate::state::{Position, RoundContext, RoundPhase, TimeMs};
use crate::strategy::{StrategyKind, path_search, policy};

/// Things that happened during one tick, in occurrence order.
///
/// Renderer-side collaborators (rope drop animation, falling leaves,
/// sound) key off these; the core never waits for them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundEvent {
    ItemCollected { position: Position, total: u32 },
    ItemThresholdReached,
    RopeExtended,
    RoundWon,
    RoundLost,
    /// A policy adversary could not get a usable decision and held
    /// position instead. The round continues.
    StrategyUnavailable { adversary: usize },
}

/// Outcome of one tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickReport {
    pub phase: RoundPhase,
    pub events: Vec<RoundEvent>,
}

/// Tick reducer borrowing the round state.
pub struct RoundEngine<'a> {
    ctx: &'a mut RoundContext,
}

impl<'a> RoundEngine<'a> {
    pub fn new(ctx: &'a mut RoundContext) -> Self {
        Self { ctx }
    }

    /// Advances the round by one tick.
    ///
    /// Outside `Playing` this is a no-op: terminal phases freeze all
    /// movement until an explicit reset builds a new context.
    pub fn tick(&mut self, now: TimeMs, input: InputState, env: &RoundEnv<'_>) -> TickReport {
        let mut events = Vec::new();

        if self.ctx.phase != RoundPhase::Playing {
            return TickReport {
                phase: self.ctx.phase,
                events,
            };
        }

        self.step_player(now, input);
        self.collect_item(now, &mut events);

        if self.ctx.rope.update(now, self.ctx.config.rope_extend_ms) {
            events.push(RoundEvent::RopeExtended);
        }

        // Win is checked before adversary movement (source order), so a
        // same-tick capture on the exit cell resolves in the player's
        // favor and the rest of the tick is skipped.
        if self.check_won() {
            events.push(RoundEvent::RoundWon);
            return TickReport {
                phase: self.ctx.phase,
                events,
            };
        }

        self.step_adversaries(now, env, &mut events);

        if self.check_lost() {
            events.push(RoundEvent::RoundLost);
        }

        TickReport {
            phase: self.ctx.phase,
            events,
        }
    }

    /// Player movement: gated by the interval of the cell currently
    /// stood on (slow terrain is felt when leaving it, not entering),
    /// and the timer resets only when a step is actually taken.
    fn step_player(&mut self, now: TimeMs, input: InputState) {
        let interval = if self.ctx.field.is_slow(self.ctx.player.position) {
            self.ctx.config.slow_interval_ms
        } else {
            self.ctx.config.normal_interval_ms
        };
        if now.millis_since(self.ctx.player.last_move_at) < interval {
            return;
        }
        let Some(direction) = input.held_direction() else {
            return;
        };
        if let Some(destination) =
            movement::step_target(&self.ctx.field, self.ctx.player.position, direction)
        {
            self.ctx.player.position = destination;
            self.ctx.player.last_move_at = now;
        }
    }

    /// Item pickup fires at most once per cell: consuming clears the
    /// flag, so standing still (or coming back) cannot re-trigger it.
    fn collect_item(&mut self, now: TimeMs, events: &mut Vec<RoundEvent>) {
        let position = self.ctx.player.position;
        if !self.ctx.field.consume_item(position) {
            return;
        }
        self.ctx.items_collected += 1;
        events.push(RoundEvent::ItemCollected {
            position,
            total: self.ctx.items_collected,
        });
        if self.ctx.threshold_reached() && !self.ctx.rope.is_armed() {
            self.ctx.rope.arm(now);
            events.push(RoundEvent::ItemThresholdReached);
        }
    }

    fn check_won(&mut self) -> bool {
        if self.ctx.threshold_reached()
            && self.ctx.player.position == self.ctx.config.exit
            && self.ctx.rope.is_extended()
        {
            self.ctx.phase = RoundPhase::Won;
            return true;
        }
        false
    }

    fn step_adversaries(&mut self, now: TimeMs, env: &RoundEnv<'_>, events: &mut Vec<RoundEvent>) {
        for i in 0..self.ctx.adversaries.len() {
            let adversary = self.ctx.adversaries[i];
            if now.millis_since(adversary.last_decision_at) < adversary.move_interval_ms {
                continue;
            }

            let step = match adversary.strategy {
                StrategyKind::PathSearch => path_search::next_step(
                    &self.ctx.field,
                    adversary.position,
                    self.ctx.player.position,
                ),
                StrategyKind::Policy => match policy::next_step(self.ctx, env.decisions(), i) {
                    Ok(step) => step,
                    Err(_) => {
                        events.push(RoundEvent::StrategyUnavailable { adversary: i });
                        None
                    }
                },
            };

            let adversary = &mut self.ctx.adversaries[i];
            if let Some(destination) = step {
                adversary.position = destination;
            }
            // Evaluating the decision consumes the interval, moved or
            // not.
            adversary.last_decision_at = now;
        }
    }

    fn check_lost(&mut self) -> bool {
        let caught = self
            .ctx
            .adversaries
            .iter()
            .any(|adversary| adversary.position == self.ctx.player.position);
        if caught {
            self.ctx.phase = RoundPhase::Lost;
        }
        caught
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoundConfig;
    use crate::input::Direction;
    use crate::state::{
        AdversaryRoster, AdversaryState, Field, PlayerState, RopeState,
    };

    fn open_context(adversaries: &[(Position, u64)]) -> RoundContext {
        let config = RoundConfig::default();
        let mut roster = AdversaryRoster::new();
        for &(position, interval) in adversaries {
            roster.push(AdversaryState::new(
                position,
                interval,
                StrategyKind::PathSearch,
            ));
        }
        let mut ctx = RoundContext::new(
            config,
            0,
            Field::new(10, 10),
            PlayerState::new(Position::new(0, 0)),
            roster,
        );
        ctx.start(TimeMs::ZERO);
        ctx
    }

    fn tick(ctx: &mut RoundContext, now: u64, input: InputState) -> TickReport {
        RoundEngine::new(ctx).tick(TimeMs(now), input, &RoundEnv::empty())
    }

    #[test]
    fn player_step_waits_for_interval() {
        let mut ctx = open_context(&[]);
        let hold = InputState::holding(Direction::Right);

        tick(&mut ctx, 100, hold);
        assert_eq!(ctx.player.position, Position::new(0, 0));

        tick(&mut ctx, 150, hold);
        assert_eq!(ctx.player.position, Position::new(1, 0));

        // Interval restarts from the step.
        tick(&mut ctx, 250, hold);
        assert_eq!(ctx.player.position, Position::new(1, 0));
        tick(&mut ctx, 300, hold);
        assert_eq!(ctx.player.position, Position::new(2, 0));
    }

    #[test]
    fn blocked_attempt_does_not_reset_the_timer() {
        let mut ctx = open_context(&[]);
        ctx.field.set_blocked(Position::new(1, 0));

        // Push into the rock: no move, timer untouched.
        tick(&mut ctx, 200, InputState::holding(Direction::Right));
        assert_eq!(ctx.player.position, Position::new(0, 0));

        // Switch direction immediately: the step fires right away
        // because the last *actual* move was at t=0.
        tick(&mut ctx, 201, InputState::holding(Direction::Down));
        assert_eq!(ctx.player.position, Position::new(0, 1));
    }

    #[test]
    fn slow_terrain_reads_the_current_cell_and_reverts_on_leaving() {
        let mut ctx = open_context(&[]);
        ctx.field.set_slow(Position::new(0, 0));
        let hold = InputState::holding(Direction::Right);

        // Standing on slow terrain: the normal interval is not enough.
        tick(&mut ctx, 200, hold);
        assert_eq!(ctx.player.position, Position::new(0, 0));

        tick(&mut ctx, 600, hold);
        assert_eq!(ctx.player.position, Position::new(1, 0));

        // Off the bush the normal cadence applies immediately.
        tick(&mut ctx, 750, hold);
        assert_eq!(ctx.player.position, Position::new(2, 0));
    }

    #[test]
    fn items_collect_once_and_arm_the_rope_at_threshold() {
        let mut ctx = open_context(&[]);
        ctx.config.item_threshold = 1;
        ctx.field.place_item(Position::new(1, 0));

        tick(&mut ctx, 150, InputState::holding(Direction::Right));
        assert_eq!(ctx.items_collected, 1);
        assert!(ctx.rope.is_armed());

        // Standing on the same cell does not re-trigger.
        let report = tick(&mut ctx, 10_000, InputState::NONE);
        assert_eq!(ctx.items_collected, 1);
        assert!(
            !report
                .events
                .iter()
                .any(|e| matches!(e, RoundEvent::ItemCollected { .. }))
        );
    }

    #[test]
    fn winning_needs_threshold_exit_and_extended_rope() {
        // All three conditions satisfied except one, in turn.
        let exit = RoundConfig::default().exit;

        // Missing threshold.
        let mut ctx = open_context(&[]);
        ctx.player.position = exit;
        ctx.rope = RopeState::Extended;
        assert_eq!(tick(&mut ctx, 10, InputState::NONE).phase, RoundPhase::Playing);

        // Missing exit cell.
        let mut ctx = open_context(&[]);
        ctx.items_collected = ctx.config.item_threshold;
        ctx.rope = RopeState::Extended;
        assert_eq!(tick(&mut ctx, 10, InputState::NONE).phase, RoundPhase::Playing);

        // Rope not yet extended.
        let mut ctx = open_context(&[]);
        ctx.items_collected = ctx.config.item_threshold;
        ctx.player.position = exit;
        ctx.rope = RopeState::Extending { since: TimeMs(5) };
        assert_eq!(tick(&mut ctx, 10, InputState::NONE).phase, RoundPhase::Playing);

        // All three.
        let mut ctx = open_context(&[]);
        ctx.items_collected = ctx.config.item_threshold;
        ctx.player.position = exit;
        ctx.rope = RopeState::Extended;
        let report = tick(&mut ctx, 10, InputState::NONE);
        assert_eq!(report.phase, RoundPhase::Won);
        assert!(report.events.contains(&RoundEvent::RoundWon));
    }

    #[test]
    fn capture_loses_the_round_and_freezes_it() {
        let mut ctx = open_context(&[(Position::new(1, 0), 100)]);

        let report = tick(&mut ctx, 100, InputState::NONE);
        assert_eq!(report.phase, RoundPhase::Lost);
        assert!(report.events.contains(&RoundEvent::RoundLost));

        // Frozen: further ticks change nothing.
        let before = ctx.clone();
        tick(&mut ctx, 5_000, InputState::holding(Direction::Down));
        assert_eq!(ctx, before);
    }

    #[test]
    fn adversaries_move_on_their_own_cadence() {
        let mut ctx = open_context(&[(Position::new(9, 0), 400), (Position::new(0, 9), 600)]);

        tick(&mut ctx, 400, InputState::NONE);
        assert_eq!(ctx.adversaries[0].position, Position::new(8, 0));
        assert_eq!(ctx.adversaries[1].position, Position::new(0, 9));

        tick(&mut ctx, 600, InputState::NONE);
        assert_eq!(ctx.adversaries[0].position, Position::new(8, 0));
        assert_eq!(ctx.adversaries[1].position, Position::new(0, 8));
    }

    #[test]
    fn pursuit_closes_one_cell_per_decision_until_capture() {
        // Open 10x10 board, idle player at (0, 0), chaser at (9, 9):
        // distance 18 shrinks by exactly one per decision, capture on
        // the 18th.
        let mut ctx = open_context(&[(Position::new(9, 9), 100)]);

        let first = tick(&mut ctx, 100, InputState::NONE);
        let position = ctx.adversaries[0].position;
        assert!(position == Position::new(8, 9) || position == Position::new(9, 8));
        assert_eq!(first.phase, RoundPhase::Playing);

        for step in 2..=18 {
            let report = tick(&mut ctx, step * 100, InputState::NONE);
            let distance = ctx.adversaries[0].position.distance(ctx.player.position);
            assert_eq!(distance, 18 - step as u32);
            if step < 18 {
                assert_eq!(report.phase, RoundPhase::Playing);
            } else {
                assert_eq!(report.phase, RoundPhase::Lost);
            }
        }
    }

    #[test]
    fn policy_without_source_degrades_to_holding() {
        let mut ctx = open_context(&[]);
        ctx.adversaries
            .push(AdversaryState::new(
                Position::new(9, 9),
                100,
                StrategyKind::Policy,
            ));
        ctx.start(TimeMs::ZERO);

        let report = tick(&mut ctx, 200, InputState::NONE);
        assert_eq!(ctx.adversaries[0].position, Position::new(9, 9));
        assert!(
            report
                .events
                .contains(&RoundEvent::StrategyUnavailable { adversary: 0 })
        );
        assert_eq!(report.phase, RoundPhase::Playing);
    }

    #[test]
    fn idle_rounds_ignore_ticks() {
        let mut ctx = open_context(&[]);
        ctx.phase = RoundPhase::Idle;
        let report = tick(&mut ctx, 1_000, InputState::holding(Direction::Right));
        assert_eq!(report.phase, RoundPhase::Idle);
        assert_eq!(ctx.player.position, Position::new(0, 0));
    }
}
