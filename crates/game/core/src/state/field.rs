use bitflags::bitflags;

use super::common::Position;

bitflags! {
    /// Per-cell terrain and content flags.
    ///
    /// A fixed-field record instead of the free-form string tags the
    /// data originally shipped with: invalid cell kinds are simply
    /// unrepresentable here.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CellFlags: u8 {
        /// Impassable obstacle (rock).
        const BLOCKED = 1 << 0;
        /// Slow terrain (bush); raises the occupant's move interval.
        const SLOW = 1 << 1;
        /// Collectible item (coin).
        const ITEM = 1 << 2;
    }
}

/// The grid of cells for one round.
///
/// Canonical truth for passability and item state. Invariant: a cell
/// never carries `BLOCKED` and `ITEM` at the same time; `place_item`
/// enforces it at the only mutation site that could break it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    width: u32,
    height: u32,
    cells: Vec<CellFlags>,
}

impl Field {
    /// Creates an open field of the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![CellFlags::empty(); (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| (position.y as u32 * self.width + position.x as u32) as usize)
    }

    fn flags(&self, position: Position) -> CellFlags {
        self.index(position)
            .map(|i| self.cells[i])
            .unwrap_or(CellFlags::BLOCKED)
    }

    /// An out-of-bounds position is reported impassable.
    pub fn is_passable(&self, position: Position) -> bool {
        self.index(position)
            .map(|i| !self.cells[i].contains(CellFlags::BLOCKED))
            .unwrap_or(false)
    }

    pub fn is_blocked(&self, position: Position) -> bool {
        self.flags(position).contains(CellFlags::BLOCKED)
    }

    pub fn is_slow(&self, position: Position) -> bool {
        self.flags(position).contains(CellFlags::SLOW)
    }

    pub fn has_item(&self, position: Position) -> bool {
        self.flags(position).contains(CellFlags::ITEM)
    }

    /// Clears the item flag and reports whether an item was present.
    /// Idempotent: a second call on the same cell returns `false`.
    pub fn consume_item(&mut self, position: Position) -> bool {
        let Some(i) = self.index(position) else {
            return false;
        };
        let had_item = self.cells[i].contains(CellFlags::ITEM);
        self.cells[i].remove(CellFlags::ITEM);
        had_item
    }

    /// Marks a cell blocked. Any item on the cell is removed to keep
    /// the blocked/item exclusion intact.
    pub fn set_blocked(&mut self, position: Position) {
        if let Some(i) = self.index(position) {
            self.cells[i].insert(CellFlags::BLOCKED);
            self.cells[i].remove(CellFlags::ITEM);
        }
    }

    pub fn set_slow(&mut self, position: Position) {
        if let Some(i) = self.index(position) {
            self.cells[i].insert(CellFlags::SLOW);
        }
    }

    /// Places an item, refusing blocked or out-of-bounds cells.
    /// Returns whether the item was placed.
    pub fn place_item(&mut self, position: Position) -> bool {
        let Some(i) = self.index(position) else {
            return false;
        };
        if self.cells[i].contains(CellFlags::BLOCKED) {
            return false;
        }
        self.cells[i].insert(CellFlags::ITEM);
        true
    }

    /// Number of cells currently carrying an item.
    pub fn item_count(&self) -> u32 {
        self.cells
            .iter()
            .filter(|c| c.contains(CellFlags::ITEM))
            .count() as u32
    }

    /// Iterates all positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let width = self.width;
        (0..self.height)
            .flat_map(move |y| (0..width).map(move |x| Position::new(x as i32, y as i32)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consume_item_is_idempotent() {
        let mut field = Field::new(4, 4);
        let pos = Position::new(2, 1);
        assert!(field.place_item(pos));

        assert!(field.consume_item(pos));
        assert!(!field.consume_item(pos));
        assert!(!field.has_item(pos));
    }

    #[test]
    fn item_never_lands_on_blocked_cell() {
        let mut field = Field::new(4, 4);
        let pos = Position::new(1, 1);
        field.set_blocked(pos);

        assert!(!field.place_item(pos));
        assert!(!field.has_item(pos));

        // Blocking an item cell clears the item.
        let other = Position::new(2, 2);
        assert!(field.place_item(other));
        field.set_blocked(other);
        assert!(!field.has_item(other));
    }

    #[test]
    fn out_of_bounds_is_impassable() {
        let field = Field::new(3, 3);
        assert!(!field.is_passable(Position::new(-1, 0)));
        assert!(!field.is_passable(Position::new(3, 0)));
        assert!(!field.is_passable(Position::new(0, 3)));
        assert!(field.is_passable(Position::new(2, 2)));
    }
}
