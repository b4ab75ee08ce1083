//! Stage layout loader.
//!
//! Stage files are RON with explicit dimensions and sparse cell
//! lists, expanded here into the dense matrices the core consumes:
//!
//! ```ron
//! (
//!     dimensions: (10, 10),
//!     rocks: [(2, 2), (7, 2)],
//!     bushes: [(4, 1)],
//!     coins: [(0, 0), (9, 9)],
//! )
//! ```

use std::path::{Path, PathBuf};

use oni_core::{StageId, StageLayout, StageOracle};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};
use crate::stages::BuiltinStages;

/// Stage data structure for RON files (sparse cell lists).
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StageDataRon {
    dimensions: (u32, u32),
    rocks: Vec<(i32, i32)>,
    bushes: Vec<(i32, i32)>,
    coins: Vec<(i32, i32)>,
}

/// Loader for stage layouts from RON files.
pub struct StageLoader;

impl StageLoader {
    /// Load a stage layout from a RON file.
    pub fn load(path: &Path) -> LoadResult<StageLayout> {
        let content = read_file(path)?;
        let data: StageDataRon = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse stage RON: {}", e))?;

        let (width, height) = data.dimensions;
        let expand = |cells: &[(i32, i32)]| -> LoadResult<Vec<Vec<bool>>> {
            let mut rows = vec![vec![false; width as usize]; height as usize];
            for &(x, y) in cells {
                if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
                    anyhow::bail!(
                        "Stage cell ({}, {}) outside {}x{} board in {}",
                        x,
                        y,
                        width,
                        height,
                        path.display()
                    );
                }
                rows[y as usize][x as usize] = true;
            }
            Ok(rows)
        };

        Ok(StageLayout {
            rocks: expand(&data.rocks)?,
            bushes: expand(&data.bushes)?,
            coins: expand(&data.coins)?,
        })
    }
}

/// Stage oracle backed by a directory of `stage_<n>.ron` files, with
/// the built-in catalog filling any gaps.
///
/// A malformed or missing file falls through to the built-in layout
/// for that id, so shipping a partial override directory is fine.
pub struct StageDirOracle {
    dir: PathBuf,
    builtin: BuiltinStages,
}

impl StageDirOracle {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            builtin: BuiltinStages,
        }
    }

    fn stage_path(&self, stage: StageId) -> PathBuf {
        self.dir.join(format!("stage_{}.ron", stage.0))
    }
}

impl StageOracle for StageDirOracle {
    fn layout(&self, stage: StageId) -> Option<StageLayout> {
        let path = self.stage_path(stage);
        if path.is_file()
            && let Ok(layout) = StageLoader::load(&path)
        {
            return Some(layout);
        }
        self.builtin.layout(stage)
    }

    fn stage_count(&self) -> u32 {
        self.builtin.stage_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STAGE_RON: &str = r#"(
        dimensions: (3, 2),
        rocks: [(1, 0)],
        bushes: [(2, 0)],
        coins: [(0, 1), (2, 1)],
    )"#;

    #[test]
    fn sparse_cells_expand_to_dense_matrices() {
        let dir = std::env::temp_dir().join("oni-stage-loader-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("stage.ron");
        std::fs::write(&path, STAGE_RON).unwrap();

        let layout = StageLoader::load(&path).unwrap();
        assert_eq!(layout.dimensions(), (3, 2));
        assert!(layout.is_consistent());
        assert!(layout.rocks[0][1]);
        assert!(layout.bushes[0][2]);
        assert!(layout.coins[1][0] && layout.coins[1][2]);
        assert!(!layout.rocks[0][0]);
    }

    #[test]
    fn out_of_board_cells_are_rejected() {
        let dir = std::env::temp_dir().join("oni-stage-loader-oob");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("stage.ron");
        std::fs::write(
            &path,
            "(dimensions: (2, 2), rocks: [(5, 0)], bushes: [], coins: [])",
        )
        .unwrap();

        assert!(StageLoader::load(&path).is_err());
    }

    #[test]
    fn dir_oracle_falls_back_to_builtins() {
        let dir = std::env::temp_dir().join("oni-stage-dir-empty");
        std::fs::create_dir_all(&dir).unwrap();

        let oracle = StageDirOracle::new(&dir);
        let from_dir = oracle.layout(StageId(1)).unwrap();
        let builtin = BuiltinStages.layout(StageId(1)).unwrap();
        assert_eq!(from_dir, builtin);
        assert_eq!(oracle.stage_count(), BuiltinStages.stage_count());
    }
}
