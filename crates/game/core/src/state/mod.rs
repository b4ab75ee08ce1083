//! Authoritative round state.
//!
//! This module owns the data structures describing the field, the
//! entities, and the round lifecycle. Everything here is built by the
//! generator at round start, mutated exclusively through
//! [`crate::engine::RoundEngine`], and discarded on reset. There are
//! no module-level globals and no entity outlives its round.
mod common;
mod entity;
mod field;
mod rope;

pub use common::{Position, StageId, TimeMs};
pub use entity::{AdversaryState, PlayerState};
pub use field::{CellFlags, Field};
pub use rope::RopeState;

use arrayvec::ArrayVec;

use crate::config::RoundConfig;

/// Bounded adversary roster. Capacity is a compile-time cap, not the
/// per-round count (that lives in [`RoundConfig`]).
pub type AdversaryRoster = ArrayVec<AdversaryState, { RoundConfig::MAX_ADVERSARIES }>;

/// Round lifecycle phase.
///
/// `Won` and `Lost` are absorbing: movement freezes and only an
/// explicit reset (building a fresh [`RoundContext`]) leaves them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundPhase {
    #[default]
    Idle,
    Playing,
    Won,
    Lost,
}

impl RoundPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, RoundPhase::Won | RoundPhase::Lost)
    }
}

/// Canonical state of one playable round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundContext {
    /// RNG seed set at generation time and never modified; combined
    /// with `nonce` for every random draw so a fixed seed reproduces
    /// the round bit-for-bit.
    pub seed: u64,
    pub config: RoundConfig,
    pub field: Field,
    pub player: PlayerState,
    pub adversaries: AdversaryRoster,
    pub items_collected: u32,
    pub phase: RoundPhase,
    pub rope: RopeState,
    /// Monotonic counter of random events consumed by this round.
    pub(crate) nonce: u64,
}

impl RoundContext {
    pub fn new(
        config: RoundConfig,
        seed: u64,
        field: Field,
        player: PlayerState,
        adversaries: AdversaryRoster,
    ) -> Self {
        Self {
            seed,
            config,
            field,
            player,
            adversaries,
            items_collected: 0,
            phase: RoundPhase::Idle,
            rope: RopeState::Stowed,
            nonce: 0,
        }
    }

    /// Enters `Playing` and aligns every per-entity timer with the
    /// driver clock, so nobody owes a move from before the round began.
    pub fn start(&mut self, now: TimeMs) {
        self.player.last_move_at = now;
        for adversary in &mut self.adversaries {
            adversary.last_decision_at = now;
        }
        self.phase = RoundPhase::Playing;
    }

    /// True once the item threshold has been reached.
    pub fn threshold_reached(&self) -> bool {
        self.items_collected >= self.config.item_threshold
    }
}
