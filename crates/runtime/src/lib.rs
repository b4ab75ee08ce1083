//! Runtime orchestration for the deterministic pursuit rounds.
//!
//! This crate wires the pure core to its collaborators: stage
//! catalogs, persisted progress, exported pursuit policies, and a
//! frame snapshot type for frontends. Consumers embed
//! [`RoundSession`], feed it timestamps and input, and render the
//! snapshots it returns.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the round driver
//! - [`frame`] exposes the render snapshot
//! - [`progress`] persists the stage-unlock frontier
//! - [`policy`] adapts exported policy tables to the core's decision
//!   seam
pub mod error;
pub mod frame;
pub mod policy;
pub mod progress;
pub mod session;

pub use error::{Result, RuntimeError};
pub use frame::FrameSnapshot;
pub use policy::TablePolicy;
pub use progress::{FileProgressStore, InMemoryProgressStore, Progress, ProgressStore};
pub use session::{RoundSession, random_seed};
