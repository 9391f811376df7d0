use crate::snake::Direction;

/// A position on the play area, in the same units as the grid dimensions.
/// Every reachable position is a multiple of the cell size.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    /// The neighbouring cell one `cell_size` step away.
    pub fn step(self, direction: Direction, cell_size: i32) -> Self {
        let (dx, dy) = direction.delta();
        Point::new(self.x + dx * cell_size, self.y + dy * cell_size)
    }

    /// Column and row of the cell this point falls in.
    pub fn cell(self, cell_size: i32) -> (i32, i32) {
        (self.x.div_euclid(cell_size), self.y.div_euclid(cell_size))
    }
}
