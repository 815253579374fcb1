use crate::{Board, Card};

/// Number of same-owner cards in a row that win the round.
pub const LINE_LENGTH: usize = 4;

/// The four line orientations as `(dx, dy)`:
/// top to bottom, top left to bottom right, left to right, top right to bottom left.
pub const DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 1), (1, 0), (-1, 1)];

/// One cell of a [`Line`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineCell {
    pub x: i8,
    pub y: i8,
    pub card: Option<Card>,
}

/// Four consecutive cells along one of the [`DIRECTIONS`].
pub type Line = [LineCell; LINE_LENGTH];

/// All windows of four cells that pass through `(x, y)`.
///
/// For every direction, the windows start 3, 2, 1 and 0 cells before `(x, y)`,
/// in that order:
/// ```text
/// x x x X . . .    . x x X x . .    . . x X x x .    . . . X x x x
/// ```
/// A window is only returned if all four cells lie in the outer bounds of the
/// board. The inner bounds are deliberately not used here, so that lines
/// reaching towards the edge of the playing area are still considered.
pub fn lines_through(board: &Board, x: i8, y: i8) -> Vec<Line> {
    let outer = board.outer_bounds();
    let mut lines = Vec::with_capacity(DIRECTIONS.len() * LINE_LENGTH);
    for (dx, dy) in DIRECTIONS {
        for start in -(LINE_LENGTH as i8 - 1)..=0 {
            let positions: [(i8, i8); LINE_LENGTH] = std::array::from_fn(|k| {
                let step = start + k as i8;
                (x + step * dx, y + step * dy)
            });
            if positions.iter().all(|&(xi, yi)| outer.contains(xi, yi)) {
                lines.push(positions.map(|(xi, yi)| LineCell {
                    x: xi,
                    y: yi,
                    card: board.card(xi, yi),
                }));
            }
        }
    }
    lines
}
