//! Traits describing read-only collaborators.
//!
//! Oracles expose the random source, the external decision function,
//! and the stage catalog. The [`RoundEnv`] aggregate bundles what the
//! engine touches per tick, so nothing couples to concrete
//! implementations; the generator takes its [`RngOracle`] directly at
//! round start.
mod decision;
mod rng;
mod stage;

pub use decision::DecisionSource;
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use stage::{StageLayout, StageOracle};

/// Errors raised when a required oracle is missing from the
/// environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    #[error("decision source not available")]
    DecisionsNotAvailable,
}

/// Read-only oracles handed to the engine for one tick.
#[derive(Clone, Copy, Default)]
pub struct RoundEnv<'a> {
    decisions: Option<&'a dyn DecisionSource>,
}

impl<'a> RoundEnv<'a> {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_decisions(mut self, decisions: &'a dyn DecisionSource) -> Self {
        self.decisions = Some(decisions);
        self
    }

    pub fn decisions(&self) -> Result<&'a dyn DecisionSource, OracleError> {
        self.decisions.ok_or(OracleError::DecisionsNotAvailable)
    }
}
