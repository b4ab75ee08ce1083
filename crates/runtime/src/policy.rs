//! Decision sources backed by exported pursuit policies.
//!
//! A trained policy ships as a JSON lookup table keyed by the sign of
//! the player's offset from the adversary. That compresses the learned
//! behavior into nine rows per table while keeping the runtime free of
//! any inference machinery; offsets missing from the table fall back
//! to a greedy axis chase.

use std::collections::HashMap;
use std::path::Path;

use oni_core::DecisionSource;
use serde::Deserialize;

use crate::error::{Result, RuntimeError};

/// One table row: for this relative offset sign, step this way.
#[derive(Debug, Clone, Deserialize)]
struct TableRow {
    dx: i8,
    dy: i8,
    code: u8,
}

/// Lookup-table policy. An empty table is the pure greedy chaser.
pub struct TablePolicy {
    table: HashMap<(i8, i8), u8>,
}

impl TablePolicy {
    /// Greedy chaser with no learned overrides.
    pub fn greedy() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Load a policy table from a JSON file (an array of
    /// `{"dx": -1, "dy": 0, "code": 3}` rows).
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(RuntimeError::PolicyLoad)?;
        let rows: Vec<TableRow> =
            serde_json::from_str(&content).map_err(RuntimeError::PolicyParse)?;

        let mut table = HashMap::new();
        for row in rows {
            table.insert((row.dx.signum(), row.dy.signum()), row.code);
        }
        tracing::debug!("Loaded policy table ({} rows) from {}", table.len(), path.display());
        Ok(Self { table })
    }

    fn code_for(&self, dx: i32, dy: i32) -> u8 {
        self.table
            .get(&(dx.signum() as i8, dy.signum() as i8))
            .copied()
            .unwrap_or_else(|| greedy_code(dx, dy))
    }
}

/// Step along the axis with the larger gap, horizontal on ties.
/// Codes: 0 up, 1 down, 2 left, 3 right.
fn greedy_code(dx: i32, dy: i32) -> u8 {
    if dx.abs() >= dy.abs() && dx != 0 {
        if dx > 0 { 3 } else { 2 }
    } else if dy > 0 {
        1
    } else {
        0
    }
}

impl DecisionSource for TablePolicy {
    fn direction_codes(&self, observation: &[i32]) -> Option<Vec<u8>> {
        // Layout: adversary (x, y) pairs, then the player pair.
        if observation.len() < 4 || observation.len() % 2 != 0 {
            return None;
        }
        let player_x = observation[observation.len() - 2];
        let player_y = observation[observation.len() - 1];
        let codes = observation[..observation.len() - 2]
            .chunks_exact(2)
            .map(|pair| self.code_for(player_x - pair[0], player_y - pair[1]))
            .collect();
        Some(codes)
    }
}
