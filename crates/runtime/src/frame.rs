//! Per-tick snapshot handed to renderers.

use oni_core::{Field, Position, RopeState, RoundContext, RoundEvent, RoundPhase, TimeMs};
use serde::{Deserialize, Serialize};

/// Everything a frontend needs to draw one frame.
///
/// A value copy of the render-relevant state: the session keeps the
/// authoritative [`RoundContext`] private and frontends never mutate
/// through a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub now: TimeMs,
    pub phase: RoundPhase,
    pub player: Position,
    pub adversaries: Vec<Position>,
    pub items_collected: u32,
    pub item_threshold: u32,
    pub rope: RopeState,
    pub exit: Position,
    pub field: Field,
    /// Events raised by the tick that produced this frame.
    pub events: Vec<RoundEvent>,
}

impl FrameSnapshot {
    pub(crate) fn capture(ctx: &RoundContext, now: TimeMs, events: Vec<RoundEvent>) -> Self {
        Self {
            now,
            phase: ctx.phase,
            player: ctx.player.position,
            adversaries: ctx.adversaries.iter().map(|a| a.position).collect(),
            items_collected: ctx.items_collected,
            item_threshold: ctx.config.item_threshold,
            rope: ctx.rope,
            exit: ctx.config.exit,
            field: ctx.field.clone(),
            events,
        }
    }
}
