//! Ranks every cell of the board for placing a given card.
//!
//! Each playable cell is scored by temporarily placing the card there and
//! looking at all four-cell lines through it: lines holding many of the
//! player's own cards, or valuable cards of opponents, score high, and a line
//! that is complete wins outright.

use tracing::trace;

use crate::{
    lines_through, Board, Bounds, Card, Speculation, GRID_HEIGHT, GRID_WIDTH, LINE_LENGTH,
};

/// Score of a line that completes four in a row.
pub const WIN: i32 = 1000;
/// Weight of the squared number of own cards in the best line.
pub const IN_ROW: i32 = 10;
/// Per value point of an opponent's card that gets covered.
pub const OVERLAY_OPPONENT: i32 = 3;
/// Per value point of an own card that gets covered.
pub const OVERLAY_OWN: i32 = -1;
/// Weight of the accumulated line scores in the final score.
pub const TOTAL_SUM: i32 = 2;
/// Per value point of own cards in a line.
pub const OWN_SUM: i32 = 1;
/// Weight with which the lines already scored feed into the next one.
pub const CROSS_LINE_SUM: i32 = 1;
/// Per value point of opponent cards in a line.
pub const OPPONENT_SUM: i32 = 2;
/// Added for a line with a cell outside of the inner bounds on both axes.
pub const OUT_OF_SOFT_BOUNDS: i32 = -1;
/// Line score assigned to cells where the card can't be played.
pub const INVALID: i32 = -1000;

/// A cell and its heuristic score for one card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RankedSpot {
    pub x: i8,
    pub y: i8,
    pub score: i32,
    /// Whether the card may legally be placed here.
    pub playable: bool,
}

/// Scores all cells of the grid for `card`, best first.
///
/// Equal scores keep row-major order. Unplayable cells are included with a
/// score of `TOTAL_SUM * INVALID`.
///
/// The board is modified while scoring, but restored before returning.
pub fn rank_spots(board: &mut Board, card: Card) -> Vec<RankedSpot> {
    rank_speculative(&mut board.speculate(), card)
}

/// The `n` best playable spots for `card`.
pub fn best_spots(board: &mut Board, card: Card, n: usize) -> Vec<RankedSpot> {
    best_speculative(&mut board.speculate(), card, n)
}

/// [`best_spots()`] on top of the writes of an ongoing speculation.
pub(crate) fn best_speculative(
    board: &mut Speculation<'_>,
    card: Card,
    n: usize,
) -> Vec<RankedSpot> {
    let mut spots = rank_speculative(board, card);
    spots.retain(|spot| spot.playable);
    spots.truncate(n);
    trace!(%card, ?spots, "Best spots");
    spots
}

fn rank_speculative(board: &mut Speculation<'_>, card: Card) -> Vec<RankedSpot> {
    let soft = board.inner_bounds();
    let mut spots = Vec::with_capacity(GRID_WIDTH as usize * GRID_HEIGHT as usize);
    for y in 0..GRID_HEIGHT {
        for x in 0..GRID_WIDTH {
            let spot = if board.is_valid_play(card, x, y) {
                let (in_row, total) = score_spot(board, card, x, y, soft);
                RankedSpot {
                    x,
                    y,
                    score: IN_ROW * in_row * in_row + TOTAL_SUM * total,
                    playable: true,
                }
            } else {
                RankedSpot {
                    x,
                    y,
                    score: TOTAL_SUM * INVALID,
                    playable: false,
                }
            };
            spots.push(spot);
        }
    }
    // Stable, so ties stay in row-major order
    spots.sort_by(|a, b| b.score.cmp(&a.score));
    spots
}

// Returns the highest number of own cards in any line through (x, y),
// and the accumulated line score.
fn score_spot(
    board: &mut Speculation<'_>,
    card: Card,
    x: i8,
    y: i8,
    soft: Bounds,
) -> (i32, i32) {
    let mut speculation = board.nested();
    let covered = speculation.push(card, x, y);

    // The higher the covered card, the better, unless it's our own
    let overlay_bonus = match covered {
        Some(c) if c.owner == card.owner => OVERLAY_OWN * i32::from(c.value),
        Some(c) => OVERLAY_OPPONENT * i32::from(c.value),
        None => 0,
    };

    let mut in_row = 0;
    let mut total = 0;
    for line in lines_through(&speculation, x, y) {
        let mut own_count = 0;
        let mut own_sum = 0;
        let mut opponent_sum = 0;
        for cell in &line {
            match cell.card {
                Some(c) if c.owner == card.owner => {
                    own_count += 1;
                    own_sum += i32::from(c.value);
                }
                Some(c) => opponent_sum += i32::from(c.value),
                None => {}
            }
        }
        let mut score = OWN_SUM * own_sum + OPPONENT_SUM * opponent_sum;
        if line
            .iter()
            .any(|cell| !soft.contains_x(cell.x) && !soft.contains_y(cell.y))
        {
            score += OUT_OF_SOFT_BOUNDS;
        }

        in_row = in_row.max(own_count);
        total = if in_row == LINE_LENGTH as i32 {
            WIN
        } else {
            score + CROSS_LINE_SUM * total + overlay_bonus
        };
    }
    (in_row, total)
}
