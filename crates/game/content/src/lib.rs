//! Data-driven content definitions and loaders.
//!
//! This crate houses static game content and provides loaders for
//! RON/TOML data files:
//! - The built-in stage catalog (five boards as constant tables)
//! - Stage layout overrides (data-driven via RON)
//! - Round configuration and generator tuning (data-driven via TOML)
//!
//! Content is consumed through the oracle traits in `oni-core` and
//! never appears in round state.

pub mod stages;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use stages::BuiltinStages;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, StageDirOracle, StageLoader};
