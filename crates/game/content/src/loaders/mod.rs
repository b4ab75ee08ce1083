//! Content loaders for reading game data from files.
//!
//! Loaders convert RON/TOML files into the types the core consumes:
//! stage layouts become [`oni_core::StageLayout`] matrices, config
//! files become [`oni_core::RoundConfig`] and
//! [`oni_core::GeneratorTuning`].

pub mod config;
pub mod stage;

pub use config::ConfigLoader;
pub use stage::{StageDirOracle, StageLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
