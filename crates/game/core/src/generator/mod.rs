//! Field generation.
//!
//! Produces a [`RoundContext`] either from randomized placement under
//! spatial constraints or from a fixed stage layout. All sampling is
//! rejection sampling with a hard attempt budget: an infeasible
//! configuration fails deterministically instead of spinning forever.

use arrayvec::ArrayVec;

use crate::config::{GeneratorTuning, RoundConfig};
use crate::env::{RngOracle, StageLayout, compute_seed};
use crate::state::{
    AdversaryRoster, AdversaryState, Field, PlayerState, Position, RoundContext,
};
use crate::strategy::StrategyKind;

/// Round-start failures surfaced to the caller for retry with adjusted
/// parameters. Everything else in the core degrades in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// Rejection sampling exhausted its budget before satisfying the
    /// placement constraints.
    #[error("field generation failed: no valid cell for {target} after {attempts} attempts")]
    GenerationFailed {
        target: &'static str,
        attempts: u32,
    },

    /// A fixed layout does not match the configured board dimensions.
    #[error("stage layout is {found:?}, config wants {expected:?}")]
    LayoutMismatch {
        expected: (u32, u32),
        found: (u32, u32),
    },

    /// The configured adversary count exceeds the compile-time roster
    /// cap.
    #[error("adversary count {0} exceeds the roster capacity")]
    RosterOverflow(u32),
}

/// How the field content is produced.
#[derive(Clone, Copy, Debug)]
pub enum FieldMode<'a> {
    /// Random obstacles, items, and slow-terrain growth.
    Randomized(&'a GeneratorTuning),
    /// Obstacle/slow/item placement read verbatim from stage data.
    Stage(&'a StageLayout),
}

// Draw contexts, one per kind of decision, so reordering unrelated
// code never shifts another draw's seed.
const CTX_OBSTACLE_COUNT: u32 = 0;
const CTX_CELL_X: u32 = 1;
const CTX_CELL_Y: u32 = 2;
const CTX_SLOW_BASE: u32 = 3;
const CTX_SLOW_NORTH: u32 = 4;
const CTX_SLOW_WEST: u32 = 5;
const CTX_INTERVAL: u32 = 6;

/// Seeded generator for one round.
pub struct FieldGenerator<'a> {
    config: &'a RoundConfig,
    rng: &'a dyn RngOracle,
    seed: u64,
    nonce: u64,
}

impl<'a> FieldGenerator<'a> {
    pub fn new(config: &'a RoundConfig, rng: &'a dyn RngOracle, seed: u64) -> Self {
        Self {
            config,
            rng,
            seed,
            nonce: 0,
        }
    }

    /// Builds the full round: field content per `mode`, player at the
    /// configured spawn, adversaries by constrained rejection
    /// sampling.
    pub fn generate(&mut self, mode: FieldMode<'_>) -> Result<RoundContext, GenerationError> {
        let field = match mode {
            FieldMode::Randomized(tuning) => self.random_field(tuning)?,
            FieldMode::Stage(layout) => self.stage_field(layout)?,
        };
        let player = PlayerState::new(self.config.player_spawn);
        let adversaries = self.spawn_adversaries(&field)?;

        Ok(RoundContext::new(
            self.config.clone(),
            self.seed,
            field,
            player,
            adversaries,
        ))
    }

    fn next_seed(&mut self, context: u32) -> u64 {
        let seed = compute_seed(self.seed, self.nonce, context);
        self.nonce += 1;
        seed
    }

    fn draw_range(&mut self, context: u32, min: u32, max: u32) -> u32 {
        let seed = self.next_seed(context);
        self.rng.range_u32(seed, min, max)
    }

    fn draw_pct(&mut self, context: u32, pct: u32) -> bool {
        let seed = self.next_seed(context);
        self.rng.roll_d100(seed) <= pct
    }

    fn draw_cell(&mut self) -> Position {
        let x = self.draw_range(CTX_CELL_X, 0, self.config.width - 1) as i32;
        let y = self.draw_range(CTX_CELL_Y, 0, self.config.height - 1) as i32;
        Position::new(x, y)
    }

    fn random_field(&mut self, tuning: &GeneratorTuning) -> Result<Field, GenerationError> {
        let mut field = Field::new(self.config.width, self.config.height);
        let spawn = self.config.player_spawn;

        // Obstacles: a drawn count of distinct cells, keeping the
        // player spawn clear.
        let obstacle_count =
            self.draw_range(CTX_OBSTACLE_COUNT, tuning.obstacle_min, tuning.obstacle_max);
        self.place_cells(obstacle_count, "obstacle", |field, cell| {
            if cell == spawn || field.is_blocked(cell) {
                return false;
            }
            field.set_blocked(cell);
            true
        }, &mut field)?;

        // Items: fixed count, never on obstacles or the spawn.
        self.place_cells(tuning.item_count, "item", |field, cell| {
            if cell == spawn || field.has_item(cell) {
                return false;
            }
            field.place_item(cell)
        }, &mut field)?;

        // Slow terrain: per-cell base seeding plus independent
        // inheritance from the north and west neighbors, which grows
        // loosely connected patches.
        for y in 0..self.config.height as i32 {
            for x in 0..self.config.width as i32 {
                let cell = Position::new(x, y);
                if field.is_passable(cell) && self.draw_pct(CTX_SLOW_BASE, tuning.slow_base_pct) {
                    field.set_slow(cell);
                }
                if field.is_slow(cell.offset(0, -1))
                    && self.draw_pct(CTX_SLOW_NORTH, tuning.slow_spread_pct)
                {
                    field.set_slow(cell);
                }
                if field.is_slow(cell.offset(-1, 0))
                    && self.draw_pct(CTX_SLOW_WEST, tuning.slow_spread_pct)
                {
                    field.set_slow(cell);
                }
            }
        }

        Ok(field)
    }

    /// Bounded rejection sampling: draw cells until `count` placements
    /// succeed or the attempt budget runs out.
    fn place_cells(
        &mut self,
        count: u32,
        target: &'static str,
        mut place: impl FnMut(&mut Field, Position) -> bool,
        field: &mut Field,
    ) -> Result<(), GenerationError> {
        let mut placed = 0;
        let mut attempts = 0;
        while placed < count {
            if attempts >= RoundConfig::MAX_PLACEMENT_ATTEMPTS {
                return Err(GenerationError::GenerationFailed { target, attempts });
            }
            attempts += 1;
            let cell = self.draw_cell();
            if place(field, cell) {
                placed += 1;
            }
        }
        Ok(())
    }

    fn stage_field(&self, layout: &StageLayout) -> Result<Field, GenerationError> {
        let expected = (self.config.width, self.config.height);
        if !layout.is_consistent() || layout.dimensions() != expected {
            return Err(GenerationError::LayoutMismatch {
                expected,
                found: layout.dimensions(),
            });
        }

        let mut field = Field::new(self.config.width, self.config.height);
        for position in field.positions().collect::<Vec<_>>() {
            let (x, y) = (position.x as usize, position.y as usize);
            if layout.rocks[y][x] {
                field.set_blocked(position);
            }
            if layout.bushes[y][x] {
                field.set_slow(position);
            }
            if layout.coins[y][x] {
                field.place_item(position);
            }
        }
        Ok(field)
    }

    /// Adversary spawns: Manhattan distance from the player at least
    /// the configured minimum, no overlap with obstacles, items, or
    /// earlier spawns. Move intervals are sampled per adversary from
    /// the configured range.
    fn spawn_adversaries(&mut self, field: &Field) -> Result<AdversaryRoster, GenerationError> {
        if self.config.adversary_count as usize > RoundConfig::MAX_ADVERSARIES {
            return Err(GenerationError::RosterOverflow(self.config.adversary_count));
        }

        let mut roster: AdversaryRoster = ArrayVec::new();
        for _ in 0..self.config.adversary_count {
            let mut attempts = 0;
            let position = loop {
                if attempts >= RoundConfig::MAX_PLACEMENT_ATTEMPTS {
                    return Err(GenerationError::GenerationFailed {
                        target: "adversary spawn",
                        attempts,
                    });
                }
                attempts += 1;
                let cell = self.draw_cell();
                let clear = field.is_passable(cell)
                    && !field.has_item(cell)
                    && cell.distance(self.config.player_spawn) >= self.config.min_spawn_distance
                    && roster.iter().all(|other| other.position != cell);
                if clear {
                    break cell;
                }
            };

            let (min, max) = self.config.adversary_interval_ms;
            let seed = self.next_seed(CTX_INTERVAL);
            let interval = self.rng.range_u64(seed, min, max);
            roster.push(AdversaryState::new(
                position,
                interval,
                StrategyKind::PathSearch,
            ));
        }
        Ok(roster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;

    fn generate_random(seed: u64) -> RoundContext {
        let config = RoundConfig::default();
        let tuning = GeneratorTuning::default();
        FieldGenerator::new(&config, &PcgRng, seed)
            .generate(FieldMode::Randomized(&tuning))
            .expect("default tuning must be feasible")
    }

    #[test]
    fn same_seed_reproduces_the_round() {
        let a = generate_random(7);
        let b = generate_random(7);
        assert_eq!(a, b);

        let c = generate_random(8);
        assert_ne!(a, c);
    }

    #[test]
    fn randomized_round_respects_placement_constraints() {
        let tuning = GeneratorTuning::default();
        for seed in 0..20 {
            let ctx = generate_random(seed);

            assert!(ctx.field.is_passable(ctx.config.player_spawn));
            assert!(!ctx.field.has_item(ctx.config.player_spawn));
            assert_eq!(ctx.field.item_count(), tuning.item_count);
            assert_eq!(ctx.adversaries.len() as u32, ctx.config.adversary_count);

            let (min, max) = ctx.config.adversary_interval_ms;
            for adversary in &ctx.adversaries {
                assert!(
                    adversary.position.distance(ctx.config.player_spawn)
                        >= ctx.config.min_spawn_distance
                );
                assert!(ctx.field.is_passable(adversary.position));
                assert!(!ctx.field.has_item(adversary.position));
                assert!((min..=max).contains(&adversary.move_interval_ms));
            }
            // Distinct spawn cells.
            for (i, a) in ctx.adversaries.iter().enumerate() {
                for b in ctx.adversaries.iter().skip(i + 1) {
                    assert_ne!(a.position, b.position);
                }
            }
        }
    }

    #[test]
    fn infeasible_spawn_constraints_fail_within_budget() {
        // A 3x3 board keeps every cell within Manhattan distance 2 of
        // the center spawn, so the distance-3 rule can never hold.
        let mut config = RoundConfig::new(3, 3);
        config.player_spawn = Position::new(1, 1);
        config.exit = Position::new(1, 1);
        config.adversary_count = 1;
        let tuning = GeneratorTuning {
            obstacle_min: 0,
            obstacle_max: 0,
            item_count: 0,
            slow_base_pct: 0,
            slow_spread_pct: 0,
        };

        let result = FieldGenerator::new(&config, &PcgRng, 1)
            .generate(FieldMode::Randomized(&tuning));
        assert!(matches!(
            result,
            Err(GenerationError::GenerationFailed {
                target: "adversary spawn",
                ..
            })
        ));
    }

    #[test]
    fn impossible_item_count_fails_rather_than_hangs() {
        let mut config = RoundConfig::new(3, 3);
        config.adversary_count = 0;
        let tuning = GeneratorTuning {
            obstacle_min: 0,
            obstacle_max: 0,
            item_count: 100, // more items than cells
            slow_base_pct: 0,
            slow_spread_pct: 0,
        };

        let result = FieldGenerator::new(&config, &PcgRng, 1)
            .generate(FieldMode::Randomized(&tuning));
        assert!(matches!(
            result,
            Err(GenerationError::GenerationFailed { target: "item", .. })
        ));
    }

    #[test]
    fn stage_layout_is_copied_verbatim() {
        let mut config = RoundConfig::new(3, 2);
        config.adversary_count = 0;
        config.player_spawn = Position::new(0, 0);
        config.exit = Position::new(0, 0);

        let layout = StageLayout {
            rocks: vec![vec![false, true, false], vec![false, false, false]],
            bushes: vec![vec![false, false, true], vec![false, false, false]],
            coins: vec![vec![false, false, false], vec![true, false, true]],
        };
        let ctx = FieldGenerator::new(&config, &PcgRng, 1)
            .generate(FieldMode::Stage(&layout))
            .unwrap();

        assert!(ctx.field.is_blocked(Position::new(1, 0)));
        assert!(ctx.field.is_slow(Position::new(2, 0)));
        assert!(ctx.field.has_item(Position::new(0, 1)));
        assert!(ctx.field.has_item(Position::new(2, 1)));
        assert_eq!(ctx.field.item_count(), 2);
    }

    #[test]
    fn mismatched_stage_dimensions_are_rejected() {
        let config = RoundConfig::default();
        let layout = StageLayout {
            rocks: vec![vec![false; 3]; 3],
            bushes: vec![vec![false; 3]; 3],
            coins: vec![vec![false; 3]; 3],
        };
        let result = FieldGenerator::new(&config, &PcgRng, 1)
            .generate(FieldMode::Stage(&layout));
        assert_eq!(
            result.unwrap_err(),
            GenerationError::LayoutMismatch {
                expected: (10, 10),
                found: (3, 3),
            }
        );
    }
}
