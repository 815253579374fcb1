mod bounds;
mod error;
mod lines;
mod speculation;

pub use bounds::*;
pub use error::*;
pub use lines::*;
pub use speculation::*;

use crate::{Card, PlayerId};

/// Number of columns of the grid.
pub const GRID_WIDTH: i8 = 11;
/// Number of rows of the grid.
pub const GRID_HEIGHT: i8 = 11;
/// The playing area can never be wider or taller than this.
pub const MAX_AREA: i8 = 6;
/// Column of the seed card.
pub const CENTER_X: i8 = (GRID_WIDTH - 1) / 2;
/// Row of the seed card.
pub const CENTER_Y: i8 = (GRID_HEIGHT - 1) / 2;
/// Number of cells on the grid, and length of an observation.
pub const NUM_CELLS: usize = GRID_WIDTH as usize * GRID_HEIGHT as usize;

/// The shared grid the cards are placed on.
///
/// Besides the cells, the board tracks two rectangles:
/// - the outer bounds, the largest area the cards may still spread over. It
///   shrinks towards every played card so that a `MAX_AREA x MAX_AREA` window
///   always remains.
/// - the inner bounds, the area where a card could possibly have a neighbour.
///   It grows by one whenever a card is played on its edge, but never past
///   the outer bounds.
///
/// Both are inclusive, i.e. it's valid to play a card "on" the border.
//
// Invariant: outer.encloses(inner), and the outer bounds are at least
// MAX_AREA wide and tall.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    // Indexed by [y][x].
    cells: [[Option<Card>; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
    outer: Bounds,
    inner: Bounds,
    /// Every card that was committed, in play order, starting with the seed card.
    played: Vec<Card>,
}

impl Board {
    /// A board with `first_card` in the center.
    pub fn new(first_card: Card) -> Self {
        let mut board = Self {
            cells: [[None; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
            outer: Self::grid(),
            inner: Bounds::around(CENTER_X, CENTER_Y, 1),
            played: Vec::new(),
        };
        board.reset(first_card);
        board
    }

    /// Clears the board and places `first_card` in the center.
    pub fn reset(&mut self, first_card: Card) {
        self.cells = [[None; GRID_WIDTH as usize]; GRID_HEIGHT as usize];
        self.outer = Self::grid();
        self.inner = Bounds::around(CENTER_X, CENTER_Y, 1);
        self.cells[CENTER_Y as usize][CENTER_X as usize] = Some(first_card);
        self.played = vec![first_card];
    }

    /// The whole grid as a [`Bounds`].
    pub fn grid() -> Bounds {
        Bounds {
            x_min: 0,
            y_min: 0,
            x_max: GRID_WIDTH - 1,
            y_max: GRID_HEIGHT - 1,
        }
    }

    /// The largest area the cards may still spread over.
    pub fn outer_bounds(&self) -> Bounds {
        self.outer
    }

    /// The area in which a card may currently be placed.
    pub fn inner_bounds(&self) -> Bounds {
        self.inner
    }

    /// Every committed card in play order, starting with the seed card.
    pub fn played_cards(&self) -> &[Card] {
        &self.played
    }

    /// The card at `(x, y)`, or `None` if the cell is empty or not on the grid.
    pub fn card(&self, x: i8, y: i8) -> Option<Card> {
        Self::grid()
            .contains(x, y)
            .then(|| self.cells[y as usize][x as usize])
            .flatten()
    }

    /// Checks whether `card` may be placed at `(x, y)`.
    ///
    /// The card must be bigger than any card it covers, lie in the inner
    /// bounds, and touch an existing card (diagonally counts).
    pub fn check_play(&self, card: Card, x: i8, y: i8) -> Result<(), IllegalPlacement> {
        if !Self::grid().contains(x, y) {
            return Err(IllegalPlacement::OffGrid { x, y });
        }
        match self.cells[y as usize][x as usize] {
            Some(existing) if !card.can_be_placed_on(Some(existing)) => {
                return Err(IllegalPlacement::NotStronger { existing });
            }
            _ => {}
        }
        if !self.inner.contains(x, y) {
            return Err(IllegalPlacement::OutOfBounds { x, y });
        }
        if !self.has_neighbour(x, y) {
            return Err(IllegalPlacement::NoNeighbour);
        }
        Ok(())
    }

    pub fn is_valid_play(&self, card: Card, x: i8, y: i8) -> bool {
        self.check_play(card, x, y).is_ok()
    }

    /// All positions where `card` may be placed, in row-major order.
    pub fn valid_plays(&self, card: Card) -> Vec<(i8, i8)> {
        let mut plays = Vec::new();
        for y in 0..GRID_HEIGHT {
            for x in 0..GRID_WIDTH {
                if self.is_valid_play(card, x, y) {
                    plays.push((x, y));
                }
            }
        }
        plays
    }

    /// Validates and commits a card. On error, the board is left untouched.
    pub fn play(&mut self, card: Card, x: i8, y: i8) -> Result<(), IllegalPlacement> {
        self.check_play(card, x, y)?;
        self.commit(card, x, y);
        Ok(())
    }

    /// Commits a card without checking the rules, for callers that already
    /// validated the position. Only fails if the position is not on the grid.
    pub fn play_unchecked(&mut self, card: Card, x: i8, y: i8) -> Result<(), IllegalPlacement> {
        if !Self::grid().contains(x, y) {
            return Err(IllegalPlacement::OffGrid { x, y });
        }
        self.commit(card, x, y);
        Ok(())
    }

    /// Overwrites a cell without any checks or bookkeeping and returns the
    /// previous content.
    ///
    /// Prefer [`Self::speculate()`] for temporary changes, so they are
    /// guaranteed to be reverted.
    ///
    /// Panics if the position is not on the grid.
    pub fn set(&mut self, cell: Option<Card>, x: i8, y: i8) -> Option<Card> {
        assert!(
            Self::grid().contains(x, y),
            "Position ({}, {}) is not on the grid",
            x,
            y
        );
        std::mem::replace(&mut self.cells[y as usize][x as usize], cell)
    }

    /// Starts a set of temporary writes that are reverted when the returned
    /// guard is dropped.
    pub fn speculate(&mut self) -> Speculation<'_> {
        Speculation::new(self)
    }

    /// Does `player` have four cards in a row through `(x, y)`?
    ///
    /// Looks at the vertical, horizontal and both diagonal lines through
    /// `(x, y)`, up to three cells in each direction.
    pub fn check_winner(&self, player: PlayerId, x: i8, y: i8) -> bool {
        let reach = LINE_LENGTH as i8 - 1;
        DIRECTIONS.iter().any(|&(dx, dy)| {
            let mut streak = 0;
            for step in -reach..=reach {
                let (xi, yi) = (x + step * dx, y + step * dy);
                if !Self::grid().contains(xi, yi) {
                    continue;
                }
                match self.card(xi, yi) {
                    Some(card) if card.owner == player => {
                        streak += 1;
                        if streak == LINE_LENGTH {
                            return true;
                        }
                    }
                    _ => streak = 0,
                }
            }
            false
        })
    }

    /// Row-major `owner * value` per cell, 0 for empty cells.
    ///
    /// Different cards can map to the same number (e.g. `B3` and `C2`); use
    /// [`Self::observation_packed()`] when the cards must be recoverable.
    pub fn observation(&self) -> Vec<u32> {
        self.cells
            .iter()
            .flatten()
            .map(|&cell| Self::observe(cell))
            .collect()
    }

    /// Row-major `owner * 10 + value` per cell, 0 for empty cells.
    pub fn observation_packed(&self) -> Vec<u32> {
        self.cells
            .iter()
            .flatten()
            .map(|cell| cell.map_or(0, |c| u32::from(c.owner) * 10 + u32::from(c.value)))
            .collect()
    }

    /// Updates an [`Self::observation()`] after `card` was played at `(x, y)`.
    ///
    /// Panics if the position is not on the grid or `obs` is too short.
    pub fn update_observation(obs: &mut [u32], card: Card, x: i8, y: i8) {
        assert!(Self::grid().contains(x, y));
        obs[Self::cell_index(x, y)] = Self::observe(Some(card));
    }

    /// Index of `(x, y)` in an observation.
    pub fn cell_index(x: i8, y: i8) -> usize {
        y as usize * GRID_WIDTH as usize + x as usize
    }

    fn observe(cell: Option<Card>) -> u32 {
        cell.map_or(0, |c| u32::from(c.owner) * u32::from(c.value))
    }

    fn has_neighbour(&self, x: i8, y: i8) -> bool {
        (-1..=1).any(|dy| (-1..=1).any(|dx| self.card(x + dx, y + dy).is_some()))
    }

    fn commit(&mut self, card: Card, x: i8, y: i8) {
        self.cells[y as usize][x as usize] = Some(card);
        self.played.push(card);
        self.update_bounds(x, y);
    }

    fn update_bounds(&mut self, x: i8, y: i8) {
        // Shrink the outer bounds on the opposite side of the played card
        self.outer.x_min = self.outer.x_min.max(x + 1 - MAX_AREA);
        self.outer.y_min = self.outer.y_min.max(y + 1 - MAX_AREA);
        self.outer.x_max = self.outer.x_max.min(x - 1 + MAX_AREA);
        self.outer.y_max = self.outer.y_max.min(y - 1 + MAX_AREA);

        // Grow the inner bounds if the card was placed on their edge
        if x == self.inner.x_min && self.inner.x_min > self.outer.x_min {
            self.inner.x_min = x - 1;
        }
        if y == self.inner.y_min && self.inner.y_min > self.outer.y_min {
            self.inner.y_min = y - 1;
        }
        if x == self.inner.x_max && self.inner.x_max < self.outer.x_max {
            self.inner.x_max = x + 1;
        }
        if y == self.inner.y_max && self.inner.y_max < self.outer.y_max {
            self.inner.y_max = y + 1;
        }
        // The outer bounds may have moved past an earlier expansion
        self.inner.clamp_to(&self.outer);
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::visualize_board(self))
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::PlaySequence;
    use crate::{card, MIN_VALUE};

    fn bounds_hold(board: &Board) -> bool {
        let outer = board.outer_bounds();
        outer.width() >= MAX_AREA
            && outer.height() >= MAX_AREA
            && Board::grid().encloses(&outer)
            && outer.encloses(&board.inner_bounds())
    }

    quickcheck! {
        fn bounds_invariant(seq: PlaySequence) -> bool {
            let mut board = Board::new(seq.first_card);
            if !bounds_hold(&board) {
                return false;
            }
            for &(card, x, y) in &seq.plays {
                if board.play(card, x, y).is_err() || !bounds_hold(&board) {
                    return false;
                }
            }
            true
        }

        fn play_count(seq: PlaySequence) -> bool {
            let mut board = Board::new(seq.first_card);
            for &(card, x, y) in &seq.plays {
                board.play(card, x, y).unwrap();
            }
            board.played_cards().len() == 1 + seq.plays.len()
        }

        fn overlay_monotonicity(seq: PlaySequence) -> bool {
            let mut board = Board::new(seq.first_card);
            for &(card, x, y) in &seq.plays {
                board.play(card, x, y).unwrap();
                for value in MIN_VALUE..=card.value {
                    let weaker = Card::new(card.owner % 4 + 1, value);
                    if board.is_valid_play(weaker, x, y) {
                        return false;
                    }
                }
            }
            true
        }

        fn valid_plays_match_check(seq: PlaySequence) -> bool {
            let mut board = Board::new(seq.first_card);
            for &(card, x, y) in &seq.plays {
                board.play(card, x, y).unwrap();
            }
            let probe = card!("D6");
            let plays = board.valid_plays(probe);
            let mut expected = Vec::new();
            for y in 0..GRID_HEIGHT {
                for x in 0..GRID_WIDTH {
                    if board.check_play(probe, x, y).is_ok() {
                        expected.push((x, y));
                    }
                }
            }
            plays == expected
        }

        fn rejected_play_leaves_board_untouched(seq: PlaySequence, x: i8, y: i8, value: u8) -> bool {
            let mut board = Board::new(seq.first_card);
            for &(card, px, py) in &seq.plays {
                board.play(card, px, py).unwrap();
            }
            let card = Card::new(2, value % 9 + 1);
            let before = board.clone();
            match board.play(card, x, y) {
                Ok(()) => board.card(x, y) == Some(card),
                Err(_) => board == before,
            }
        }
    }

    #[test]
    fn scenario_overlay_next_to_seed() {
        let mut board = Board::new(card!("A5"));
        assert!(board.is_valid_play(card!("B6"), CENTER_X + 1, CENTER_Y));
        board.play(card!("B6"), CENTER_X + 1, CENTER_Y).unwrap();
        assert_eq!(board.card(CENTER_X + 1, CENTER_Y), Some(card!("B6")));
        assert_eq!(board.played_cards(), &[card!("A5"), card!("B6")]);
    }

    #[test]
    fn scenario_weaker_card_is_rejected() {
        let mut board = Board::new(card!("A5"));
        let before = board.clone();
        assert!(!board.is_valid_play(card!("C4"), CENTER_X, CENTER_Y));
        assert_eq!(
            board.play(card!("C4"), CENTER_X, CENTER_Y),
            Err(IllegalPlacement::NotStronger {
                existing: card!("A5")
            })
        );
        assert_eq!(board.card(CENTER_X, CENTER_Y), Some(card!("A5")));
        assert_eq!(board, before);
    }

    #[test]
    fn scenario_four_in_a_row_wins() {
        let mut board = Board::new(card!("A1"));
        for (offset, value) in [(1, 2), (2, 3)] {
            board
                .play(Card::new(1, value), CENTER_X + offset, CENTER_Y)
                .unwrap();
            assert!(!board.check_winner(1, CENTER_X + offset, CENTER_Y));
        }
        board.play(card!("A4"), CENTER_X + 3, CENTER_Y).unwrap();
        assert!(board.check_winner(1, CENTER_X + 3, CENTER_Y));
        assert!(board.check_winner(1, CENTER_X, CENTER_Y));
        assert!(!board.check_winner(2, CENTER_X + 3, CENTER_Y));
    }

    #[test]
    fn interrupted_line_does_not_win() {
        let mut board = Board::new(card!("A1"));
        board.play(card!("A2"), 6, 6).unwrap();
        board.play(card!("B3"), 7, 7).unwrap();
        board.play(card!("A4"), 8, 8).unwrap();
        board.play(card!("A4"), 4, 4).unwrap();
        assert!(!board.check_winner(1, 8, 8));
        // Covering the opponent's card completes the diagonal 4..=8
        board.play(card!("A5"), 7, 7).unwrap();
        assert!(board.check_winner(1, 7, 7));
    }

    #[test]
    fn anti_diagonal_win_near_the_edge() {
        let mut board = Board::new(card!("B1"));
        board.set(Some(card!("B2")), 1, 3);
        board.set(Some(card!("B2")), 2, 2);
        board.set(Some(card!("B2")), 3, 1);
        board.set(Some(card!("B2")), 4, 0);
        assert!(board.check_winner(2, 1, 3));
        assert!(board.check_winner(2, 4, 0));
        assert!(!board.check_winner(2, 0, 4));
    }

    #[test]
    fn placement_rules() {
        let mut board = Board::new(card!("A5"));
        assert_eq!(
            board.check_play(card!("B2"), CENTER_X + 2, CENTER_Y),
            Err(IllegalPlacement::OutOfBounds {
                x: CENTER_X + 2,
                y: CENTER_Y
            })
        );
        assert_eq!(
            board.check_play(card!("B2"), -1, 3),
            Err(IllegalPlacement::OffGrid { x: -1, y: 3 })
        );
        board.play(card!("B2"), CENTER_X + 1, CENTER_Y + 1).unwrap();
        // The inner bounds grew, and (7, 5) touches (6, 6) diagonally
        assert!(board.is_valid_play(card!("B2"), CENTER_X + 2, CENTER_Y));
        assert_eq!(
            board.check_play(card!("B2"), CENTER_X - 2, CENTER_Y),
            Err(IllegalPlacement::OutOfBounds {
                x: CENTER_X - 2,
                y: CENTER_Y
            })
        );
        assert_eq!(
            board.check_play(card!("B2"), CENTER_X - 1, CENTER_Y + 2),
            Err(IllegalPlacement::NoNeighbour)
        );
        assert!(board.is_valid_play(card!("A9"), CENTER_X, CENTER_Y));
        assert_eq!(board.valid_plays(card!("C1")).len(), 12);
    }

    #[test]
    fn outer_bounds_shrink_and_inner_bounds_stay_inside() {
        let mut board = Board::new(card!("A5"));
        // Walk left, then far right
        board.play(card!("B1"), 4, 5).unwrap();
        board.play(card!("B1"), 3, 5).unwrap();
        assert_eq!(board.inner_bounds().x_min, 2);
        assert_eq!(board.outer_bounds().x_max, 8);
        board.play(card!("B1"), 6, 5).unwrap();
        board.play(card!("B1"), 7, 5).unwrap();
        board.play(card!("B1"), 8, 5).unwrap();
        let outer = board.outer_bounds();
        let inner = board.inner_bounds();
        assert_eq!((outer.x_min, outer.x_max), (3, 8));
        assert_eq!((inner.x_min, inner.x_max), (3, 8));
        assert_eq!(
            board.check_play(card!("B2"), 2, 5),
            Err(IllegalPlacement::OutOfBounds { x: 2, y: 5 })
        );
    }

    #[test]
    fn observations() {
        let mut board = Board::new(card!("B3"));
        let mut obs = board.observation();
        assert_eq!(obs.len(), NUM_CELLS);
        assert_eq!(obs[Board::cell_index(CENTER_X, CENTER_Y)], 6);
        assert_eq!(obs.iter().filter(|&&v| v != 0).count(), 1);

        board.play(card!("C2"), 4, 4).unwrap();
        Board::update_observation(&mut obs, card!("C2"), 4, 4);
        assert_eq!(obs, board.observation());
        // B3 and C2 collide in the legacy encoding, but not in the packed one
        assert_eq!(obs[Board::cell_index(4, 4)], 6);
        let packed = board.observation_packed();
        assert_eq!(packed[Board::cell_index(CENTER_X, CENTER_Y)], 23);
        assert_eq!(packed[Board::cell_index(4, 4)], 32);
    }

    #[test]
    fn reset_clears_history() {
        let mut board = Board::new(card!("A5"));
        board.play(card!("B6"), 4, 5).unwrap();
        board.reset(card!("C2"));
        assert_eq!(board, Board::new(card!("C2")));
        assert_eq!(board.played_cards(), &[card!("C2")]);
    }
}
