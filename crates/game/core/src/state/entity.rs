use super::common::{Position, TimeMs};
use crate::strategy::StrategyKind;

/// The controllable player character.
///
/// The player has no fixed move interval of its own: the effective
/// interval is chosen per tick from the cell it currently stands on
/// (see [`crate::config::RoundConfig`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub position: Position,
    /// Timestamp of the last step actually taken. Blocked attempts do
    /// not touch it, so a player held against a wall moves the moment
    /// the way is free.
    pub last_move_at: TimeMs,
}

impl PlayerState {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            last_move_at: TimeMs::ZERO,
        }
    }
}

/// One pursuing adversary ("oni").
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdversaryState {
    pub position: Position,
    /// Per-adversary cadence, sampled at spawn time from the
    /// configured range.
    pub move_interval_ms: u64,
    /// Timestamp of the last strategy evaluation. Unlike the player,
    /// evaluating a decision consumes the interval even when the
    /// adversary ends up holding position.
    pub last_decision_at: TimeMs,
    pub strategy: StrategyKind,
}

impl AdversaryState {
    pub fn new(position: Position, move_interval_ms: u64, strategy: StrategyKind) -> Self {
        Self {
            position,
            move_interval_ms,
            last_decision_at: TimeMs::ZERO,
            strategy,
        }
    }
}
