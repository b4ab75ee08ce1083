//! Deterministic pursuit-game rules and data types shared across drivers.
//!
//! `oni-core` defines the canonical round logic (field, entities, tick
//! pipeline, adversary strategies, field generation) and exposes pure APIs
//! reusable by the runtime and offline tools. All state mutation flows
//! through [`engine::RoundEngine`], every random draw goes through the
//! [`env::RngOracle`] seam, and supporting crates depend on the types
//! re-exported here.
pub mod config;
pub mod engine;
pub mod env;
pub mod generator;
pub mod input;
pub mod state;
pub mod strategy;

pub use config::{GeneratorTuning, RoundConfig};
pub use engine::{RoundEngine, RoundEvent, TickReport};
pub use env::{
    DecisionSource, OracleError, PcgRng, RngOracle, RoundEnv, StageLayout, StageOracle,
    compute_seed,
};
pub use generator::{FieldGenerator, FieldMode, GenerationError};
pub use input::{Direction, InputState};
pub use state::{
    AdversaryRoster, AdversaryState, CellFlags, Field, PlayerState, Position, RopeState,
    RoundContext, RoundPhase, StageId, TimeMs,
};
pub use strategy::{PolicyError, StrategyKind};
