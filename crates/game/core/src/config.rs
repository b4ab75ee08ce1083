use crate::state::Position;

/// Static parameters defining one playable round.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundConfig {
    pub width: u32,
    pub height: u32,
    /// Where the player appears at round start (the foot of the rope).
    pub player_spawn: Position,
    /// The designated exit cell the extended rope hangs over.
    pub exit: Position,
    /// Items required to arm the exit rope.
    pub item_threshold: u32,
    pub adversary_count: u32,
    /// Player move interval on ordinary terrain, in milliseconds.
    pub normal_interval_ms: u64,
    /// Player move interval while standing on slow terrain.
    pub slow_interval_ms: u64,
    /// Inclusive range each adversary's move interval is sampled from
    /// at spawn time.
    pub adversary_interval_ms: (u64, u64),
    /// How long the rope takes to fully extend once armed.
    pub rope_extend_ms: u64,
    /// Minimum Manhattan distance between the player spawn and any
    /// adversary spawn.
    pub min_spawn_distance: u32,
}

impl RoundConfig {
    // ===== compile-time caps used as type parameters =====
    /// Maximum adversaries a round can carry.
    pub const MAX_ADVERSARIES: usize = 8;
    /// Upper bound on rejection-sampling attempts per placement task.
    /// Exhaustion is a deterministic generation failure, never a hang.
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 1_000;

    // ===== observed defaults =====
    pub const DEFAULT_NORMAL_INTERVAL_MS: u64 = 150;
    pub const DEFAULT_SLOW_INTERVAL_MS: u64 = 600;
    pub const DEFAULT_ADVERSARY_INTERVAL_MS: (u64, u64) = (400, 600);
    pub const DEFAULT_ITEM_THRESHOLD: u32 = 15;
    pub const DEFAULT_ROPE_EXTEND_MS: u64 = 1_000;
    pub const DEFAULT_MIN_SPAWN_DISTANCE: u32 = 3;

    /// The shipped 10x10 board: rope at the center-ish cell, player
    /// starting at its foot, two pursuers.
    pub fn new(width: u32, height: u32) -> Self {
        let exit = Position::new(width as i32 / 2 - 1, height as i32 / 2 - 1);
        Self {
            width,
            height,
            player_spawn: exit,
            exit,
            item_threshold: Self::DEFAULT_ITEM_THRESHOLD,
            adversary_count: 2,
            normal_interval_ms: Self::DEFAULT_NORMAL_INTERVAL_MS,
            slow_interval_ms: Self::DEFAULT_SLOW_INTERVAL_MS,
            adversary_interval_ms: Self::DEFAULT_ADVERSARY_INTERVAL_MS,
            rope_extend_ms: Self::DEFAULT_ROPE_EXTEND_MS,
            min_spawn_distance: Self::DEFAULT_MIN_SPAWN_DISTANCE,
        }
    }
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self::new(10, 10)
    }
}

/// Tunables for randomized field generation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratorTuning {
    /// Inclusive range the obstacle count is drawn from.
    pub obstacle_min: u32,
    pub obstacle_max: u32,
    /// Exact number of items to scatter.
    pub item_count: u32,
    /// Percent chance a passable cell seeds a slow-terrain patch.
    pub slow_base_pct: u32,
    /// Percent chance a cell inherits slow terrain from its north or
    /// west neighbor (rolled independently per neighbor).
    pub slow_spread_pct: u32,
}

impl Default for GeneratorTuning {
    fn default() -> Self {
        Self {
            obstacle_min: 5,
            obstacle_max: 10,
            item_count: 20,
            slow_base_pct: 10,
            slow_spread_pct: 40,
        }
    }
}
