use crate::input::Direction;
use crate::state::{Field, Position};

/// Validates one grid step and returns the destination, or `None`
/// when the step leaves the board or runs into a blocked cell.
///
/// This is the single movement-validation path: the player step, the
/// path-search step, and the externally chosen policy step all go
/// through here, so no mover can bypass bounds or passability.
pub fn step_target(field: &Field, from: Position, direction: Direction) -> Option<Position> {
    let (dx, dy) = direction.delta();
    let destination = from.offset(dx, dy);
    (field.contains(destination) && field.is_passable(destination)).then_some(destination)
}
