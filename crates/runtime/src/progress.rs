//! Persistent stage-unlock progress.
//!
//! One small JSON document holding the unlock frontier. A missing or
//! corrupt file never fails a session: it decodes to the default
//! frontier (stage 1) with a warning, matching how the save slot
//! behaves on first launch.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RuntimeError};

/// Persisted player progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Highest stage the player may enter. Stage numbering starts at
    /// 1, so this is also the number of playable stages.
    pub unlocked_stage: u32,
}

impl Default for Progress {
    fn default() -> Self {
        Self { unlocked_stage: 1 }
    }
}

/// Storage seam for progress, so sessions can run against a file, a
/// test double, or nothing at all.
pub trait ProgressStore: Send + Sync {
    /// Current progress. Never fails: unreadable storage degrades to
    /// the default frontier.
    fn load(&self) -> Progress;

    fn save(&self, progress: Progress) -> Result<()>;
}

/// File-backed progress store (JSON).
pub struct FileProgressStore {
    path: PathBuf,
}

impl FileProgressStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Platform data directory location for the save file.
    pub fn default_path() -> Option<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "oni-pursuit")?;
        Some(dirs.data_dir().join("save_data.json"))
    }
}

impl ProgressStore for FileProgressStore {
    fn load(&self) -> Progress {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("No progress file at {}: {}", self.path.display(), e);
                return Progress::default();
            }
        };
        match serde_json::from_str::<Progress>(&content) {
            Ok(progress) if progress.unlocked_stage >= 1 => progress,
            Ok(_) => {
                tracing::warn!(
                    "Progress file {} holds an invalid frontier; starting over",
                    self.path.display()
                );
                Progress::default()
            }
            Err(e) => {
                tracing::warn!(
                    "Progress file {} is corrupt ({}); starting over",
                    self.path.display(),
                    e
                );
                Progress::default()
            }
        }
    }

    fn save(&self, progress: Progress) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(RuntimeError::ProgressSave)?;
        }

        let json = serde_json::to_string_pretty(&progress).map_err(RuntimeError::ProgressEncode)?;

        // Write to temp file, then atomic rename.
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, json).map_err(RuntimeError::ProgressSave)?;
        fs::rename(&temp_path, &self.path).map_err(RuntimeError::ProgressSave)?;

        tracing::debug!(
            "Saved progress (unlocked_stage={}) to {}",
            progress.unlocked_stage,
            self.path.display()
        );
        Ok(())
    }
}

/// In-memory progress store for tests and throwaway sessions.
#[derive(Default)]
pub struct InMemoryProgressStore {
    progress: Mutex<Progress>,
}

impl InMemoryProgressStore {
    pub fn new(progress: Progress) -> Self {
        Self {
            progress: Mutex::new(progress),
        }
    }
}

impl ProgressStore for InMemoryProgressStore {
    fn load(&self) -> Progress {
        *self.progress.lock().unwrap()
    }

    fn save(&self, progress: Progress) -> Result<()> {
        *self.progress.lock().unwrap() = progress;
        Ok(())
    }
}
