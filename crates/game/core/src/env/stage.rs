use crate::state::StageId;

/// Fixed stage layout: three boolean matrices of grid dimensions,
/// indexed `[y][x]`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StageLayout {
    /// Obstacle cells.
    pub rocks: Vec<Vec<bool>>,
    /// Slow-terrain cells.
    pub bushes: Vec<Vec<bool>>,
    /// Item cells.
    pub coins: Vec<Vec<bool>>,
}

impl StageLayout {
    /// `(width, height)` taken from the rock matrix.
    pub fn dimensions(&self) -> (u32, u32) {
        let height = self.rocks.len() as u32;
        let width = self.rocks.first().map(|row| row.len()).unwrap_or(0) as u32;
        (width, height)
    }

    /// True when all three matrices are rectangular and share one
    /// shape.
    pub fn is_consistent(&self) -> bool {
        let (width, height) = self.dimensions();
        [&self.rocks, &self.bushes, &self.coins].iter().all(|m| {
            m.len() as u32 == height && m.iter().all(|row| row.len() as u32 == width)
        })
    }
}

/// Static stage catalog oracle.
///
/// Stage data is collaborator input; the core only consumes the
/// boolean matrices and never cares where they came from (built-in
/// constants, RON files, ...).
pub trait StageOracle: Send + Sync {
    /// Layout for a stage, or `None` for an unknown id.
    fn layout(&self, stage: StageId) -> Option<StageLayout>;

    /// Number of stages in the catalog.
    fn stage_count(&self) -> u32;
}
