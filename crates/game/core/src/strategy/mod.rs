//! Adversary decision engine.
//!
//! One engine, polymorphic over two strategies selected per adversary
//! at construction time. Both produce at most one validated grid step
//! per evaluation and share the movement-validation and tick-gating
//! code paths; the strategies differ only in how they pick a
//! candidate step.
pub mod path_search;
pub mod policy;

pub use policy::PolicyError;

/// Which decision logic drives an adversary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrategyKind {
    /// Breadth-first shortest path toward the player.
    #[default]
    PathSearch,
    /// Externally supplied decision function (pre-trained policy).
    Policy,
}
