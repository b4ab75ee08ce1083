//! Round session driver.
//!
//! [`RoundSession`] owns the authoritative [`RoundContext`] plus the
//! collaborators the core only knows as traits: the stage catalog, the
//! progress store, the RNG, and an optional pursuit policy. Frontends
//! feed it timestamps and input state; it hands back frame snapshots.

use oni_core::{
    FieldGenerator, FieldMode, GeneratorTuning, InputState, PcgRng, RoundConfig, RoundContext,
    RoundEngine, RoundEnv, RoundEvent, RoundPhase, StageId, StageOracle, StrategyKind, TimeMs,
    DecisionSource,
};

use crate::error::{Result, RuntimeError};
use crate::frame::FrameSnapshot;
use crate::progress::{Progress, ProgressStore};

/// A fresh round seed from the process RNG. Sessions replaying a
/// recorded round pass the recorded seed instead.
pub fn random_seed() -> u64 {
    rand::random()
}

pub struct RoundSession {
    config: RoundConfig,
    tuning: GeneratorTuning,
    stages: Box<dyn StageOracle>,
    progress: Box<dyn ProgressStore>,
    policy: Option<Box<dyn DecisionSource>>,
    rng: PcgRng,
    ctx: Option<RoundContext>,
    /// Which catalog stage is being played, `None` for randomized
    /// rounds (which never touch the unlock frontier).
    stage: Option<StageId>,
}

impl RoundSession {
    pub fn new(
        config: RoundConfig,
        tuning: GeneratorTuning,
        stages: Box<dyn StageOracle>,
        progress: Box<dyn ProgressStore>,
    ) -> Self {
        Self {
            config,
            tuning,
            stages,
            progress,
            policy: None,
            rng: PcgRng,
            ctx: None,
            stage: None,
        }
    }

    /// Adversaries in subsequent rounds follow the given policy
    /// instead of breadth-first pursuit.
    pub fn with_policy(mut self, policy: Box<dyn DecisionSource>) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Highest stage the player may enter, clamped to the catalog.
    pub fn unlocked_stage(&self) -> u32 {
        self.progress
            .load()
            .unlocked_stage
            .clamp(1, self.stages.stage_count())
    }

    pub fn context(&self) -> Option<&RoundContext> {
        self.ctx.as_ref()
    }

    /// Starts a catalog stage. Fails on unknown or locked stages.
    pub fn start_stage(&mut self, stage: StageId, seed: u64, now: TimeMs) -> Result<()> {
        if stage.0 > self.unlocked_stage() {
            return Err(RuntimeError::StageLocked {
                stage,
                unlocked: self.unlocked_stage(),
            });
        }
        let layout = self
            .stages
            .layout(stage)
            .ok_or(RuntimeError::UnknownStage(stage))?;

        let ctx = FieldGenerator::new(&self.config, &self.rng, seed)
            .generate(FieldMode::Stage(&layout))?;
        self.begin(ctx, Some(stage), now);
        Ok(())
    }

    /// Starts a randomized round outside the stage catalog.
    pub fn start_randomized(&mut self, seed: u64, now: TimeMs) -> Result<()> {
        let ctx = FieldGenerator::new(&self.config, &self.rng, seed)
            .generate(FieldMode::Randomized(&self.tuning))?;
        self.begin(ctx, None, now);
        Ok(())
    }

    fn begin(&mut self, mut ctx: RoundContext, stage: Option<StageId>, now: TimeMs) {
        if self.policy.is_some() {
            for adversary in &mut ctx.adversaries {
                adversary.strategy = StrategyKind::Policy;
            }
        }
        ctx.start(now);
        tracing::info!(
            "Round started: seed={}, stage={:?}, adversaries={}",
            ctx.seed,
            stage.map(|s| s.0),
            ctx.adversaries.len()
        );
        self.ctx = Some(ctx);
        self.stage = stage;
    }

    /// Advances the round and captures a frame.
    pub fn tick(&mut self, now: TimeMs, input: InputState) -> Result<FrameSnapshot> {
        let ctx = self.ctx.as_mut().ok_or(RuntimeError::SessionNotStarted)?;

        let mut env = RoundEnv::empty();
        if let Some(policy) = &self.policy {
            env = env.with_decisions(policy.as_ref());
        }

        let report = RoundEngine::new(ctx).tick(now, input, &env);

        for event in &report.events {
            match event {
                RoundEvent::RoundWon => tracing::info!("Round won at {}", now),
                RoundEvent::RoundLost => tracing::info!("Round lost at {}", now),
                RoundEvent::StrategyUnavailable { adversary } => {
                    tracing::warn!("Adversary {} held: no usable decision", adversary);
                }
                _ => {}
            }
        }

        if report.phase == RoundPhase::Won
            && report.events.contains(&RoundEvent::RoundWon)
            && let Some(stage) = self.stage
        {
            self.advance_frontier(stage)?;
        }

        let ctx = self.ctx.as_ref().ok_or(RuntimeError::SessionNotStarted)?;
        Ok(FrameSnapshot::capture(ctx, now, report.events))
    }

    /// Clearing the frontier stage unlocks the next one. Replaying an
    /// earlier stage never moves the frontier backwards.
    fn advance_frontier(&mut self, stage: StageId) -> Result<()> {
        let unlocked = self.progress.load().unlocked_stage;
        if stage.0 >= unlocked && stage.0 < self.stages.stage_count() {
            let next = stage.0 + 1;
            self.progress.save(Progress {
                unlocked_stage: next,
            })?;
            tracing::info!("Cleared {}; unlocked stage {}", stage, next);
        }
        Ok(())
    }

    /// Discards the current round. The next tick fails until a new
    /// round starts.
    pub fn reset(&mut self) {
        self.ctx = None;
        self.stage = None;
    }
}
