//! Breadth-first pursuit.
//!
//! Shortest path over the four-neighborhood with uniform cost and
//! blocked cells impassable. Expansion order is fixed to up, down,
//! left, right so tie-breaking (and therefore the whole trace) is
//! deterministic.

use std::collections::VecDeque;

use strum::IntoEnumIterator;

use crate::engine::movement::step_target;
use crate::input::Direction;
use crate::state::{Field, Position};

/// Next cell on a shortest path from `start` to `target`.
///
/// Returns `None` when the target is unreachable or already reached;
/// the adversary holds position for the tick, never an error. On a
/// disconnected map the search simply exhausts its frontier.
pub fn next_step(field: &Field, start: Position, target: Position) -> Option<Position> {
    if start == target || !field.contains(start) || !field.contains(target) {
        return None;
    }

    let width = field.width() as usize;
    let index = |p: Position| p.y as usize * width + p.x as usize;

    // Parent links for path reconstruction; usize::MAX = unvisited.
    let mut parent = vec![usize::MAX; width * field.height() as usize];
    parent[index(start)] = index(start);

    let mut frontier = VecDeque::new();
    frontier.push_back(start);

    while let Some(current) = frontier.pop_front() {
        for direction in Direction::iter() {
            let Some(next) = step_target(field, current, direction) else {
                continue;
            };
            if parent[index(next)] != usize::MAX {
                continue;
            }
            parent[index(next)] = index(current);

            if next == target {
                return Some(first_step(&parent, index(start), index(target), width));
            }
            frontier.push_back(next);
        }
    }

    None
}

/// Walks the parent chain back from the target and returns the node
/// right after `start` (the second node of the path).
fn first_step(parent: &[usize], start: usize, target: usize, width: usize) -> Position {
    let mut node = target;
    while parent[node] != start {
        node = parent[node];
    }
    Position::new((node % width) as i32, (node / width) as i32)
}
