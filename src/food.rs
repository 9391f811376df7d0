use rand::{seq::SliceRandom, Rng};

use crate::grid::Point;

/// Picks a uniformly random cell-aligned point in `[0, width) x [0, height)`.
/// The snake body is not consulted.
pub fn spawn<R: Rng + ?Sized>(rng: &mut R, width: i32, height: i32, cell_size: i32) -> Point {
    let cols = (width + cell_size - 1) / cell_size;
    let rows = (height + cell_size - 1) / cell_size;

    Point::new(
        rng.gen_range(0..cols) * cell_size,
        rng.gen_range(0..rows) * cell_size,
    )
}

/// Like [`spawn`] but only among cells no segment of `body` covers.
/// Returns `None` once the snake fills the grid.
pub fn spawn_clear_of<R: Rng + ?Sized>(
    rng: &mut R,
    width: i32,
    height: i32,
    cell_size: i32,
    body: &[Point],
) -> Option<Point> {
    let free: Vec<Point> = (0..height).step_by(cell_size as usize)
        .flat_map(|y| (0..width).step_by(cell_size as usize).map(move |x| Point::new(x, y)))
        .filter(|p| !body.contains(p))
        .collect();

    free.choose(rng).copied()
}
