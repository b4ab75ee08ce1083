//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from round generation, progress persistence, and
//! policy loading so drivers can bubble them up with consistent
//! context.
use oni_core::{GenerationError, StageId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{0} is not in the catalog")]
    UnknownStage(StageId),

    #[error("stage {stage} is locked (unlocked up to {unlocked})")]
    StageLocked { stage: StageId, unlocked: u32 },

    #[error("no round in progress; start a stage first")]
    SessionNotStarted,

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("failed to persist progress")]
    ProgressSave(#[source] std::io::Error),

    #[error("failed to encode progress")]
    ProgressEncode(#[source] serde_json::Error),

    #[error("failed to read policy table")]
    PolicyLoad(#[source] std::io::Error),

    #[error("failed to parse policy table")]
    PolicyParse(#[source] serde_json::Error),
}
