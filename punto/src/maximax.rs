//! Multi-player lookahead search.
//!
//! In games with more than two players, minimax degenerates into "one versus
//! all". Maximax instead lets every simulated player greedily maximize their
//! own heuristic score, and only adds up the scores of the player the search
//! is run for.
//!
//! The search is bounded: a fixed number of candidate moves for the real card
//! (the root candidates), then a fixed number of plies, each with its own
//! breadth and discount. Since the other players' next cards are unknown, the
//! card in the middle of each player's remaining deck stands in for it.
//!
//! ```
//! use punto::{card, Board, Maximax};
//!
//! let mut board = Board::new(card!("B5"));
//! // Player A holds a 7; the next cards are guessed as B3 and A6
//! let (x, y) = Maximax::new()
//!     .best_move(&mut board, card!("A7"), &[card!("B3"), card!("A6")])
//!     .unwrap();
//! assert!(board.is_valid_play(card!("A7"), x, y));
//! ```

use tracing::debug;

use crate::heuristic::best_speculative;
use crate::{best_spots, Board, Card, PlayerId, RankedSpot, Speculation};

/// Breadth and discount of one simulated ply.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlyConfig {
    /// How many of the best spots are tried for each player.
    pub breadth: usize,
    /// Factor applied to the searching player's score in this ply.
    pub discount: f64,
}

/// Configurable knobs for [`Maximax`]. Defaults are the tuned values.
#[derive(Clone, Debug, PartialEq)]
pub struct MaximaxConfig {
    /// How many candidate moves for the real card are evaluated.
    pub root_breadth: usize,
    /// The simulated plies, in order. The search depth is their number.
    pub plies: Vec<PlyConfig>,
}

impl Default for MaximaxConfig {
    fn default() -> Self {
        Self {
            root_breadth: 8,
            plies: vec![
                PlyConfig {
                    breadth: 3,
                    discount: 0.8,
                },
                PlyConfig {
                    breadth: 3,
                    discount: 0.6,
                },
                PlyConfig {
                    breadth: 1,
                    discount: 0.5,
                },
            ],
        }
    }
}

/// Picks moves by simulating the next plies of all players.
#[derive(Clone, Debug, Default)]
pub struct Maximax {
    config: MaximaxConfig,
}

// One simulated placement.
#[derive(Clone, Copy, Debug)]
struct Branch {
    x: i8,
    y: i8,
    card: Card,
    // What this placement adds to the searching player's total
    gain: f64,
}

// The placements tried at one ply below the current path.
struct Frame {
    ply: usize,
    total: f64,
    branches: Vec<Branch>,
    next: usize,
}

impl Maximax {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MaximaxConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MaximaxConfig {
        &self.config
    }

    /// The best position for `card`, or `None` if it can't be played anywhere.
    ///
    /// `lookahead` holds the stand-in cards of the players in the order they
    /// move in every simulated ply: the opponents in seat order, then the
    /// searching player, who is identified as the owner of `card`. Players
    /// without a stand-in card (e.g. with an empty deck) are simply left out.
    ///
    /// The board is modified during the search, but restored before returning.
    pub fn best_move(
        &self,
        board: &mut Board,
        card: Card,
        lookahead: &[Card],
    ) -> Option<(i8, i8)> {
        let mut best: Option<(RankedSpot, f64)> = None;
        for root in best_spots(board, card, self.config.root_breadth) {
            let value = self.evaluate_root(board, card, root, lookahead);
            debug!(
                x = root.x,
                y = root.y,
                heuristic = root.score,
                value,
                "Evaluated root candidate"
            );
            if best.map_or(true, |(_, best_value)| value > best_value) {
                best = Some((root, value));
            }
        }
        let (spot, value) = best?;
        debug!(%card, x = spot.x, y = spot.y, value, "Maximax picked a move");
        Some((spot.x, spot.y))
    }

    // Depth-first search below one root candidate, using an explicit stack.
    // Returns the best total reached at the end of any simulated path.
    fn evaluate_root(
        &self,
        board: &mut Board,
        card: Card,
        root: RankedSpot,
        lookahead: &[Card],
    ) -> f64 {
        let me = card.owner;
        let depth = self.config.plies.len();
        let mut speculation = board.speculate();
        speculation.push(card, root.x, root.y);

        let root_total = f64::from(root.score);
        if depth == 0 {
            return root_total;
        }
        let first = self.expand(&mut speculation, me, lookahead, 0, root_total);
        if first.branches.is_empty() {
            return root_total;
        }

        let mut best = f64::NEG_INFINITY;
        let mut stack = vec![first];
        while let Some(frame) = stack.last_mut() {
            let Some(branch) = frame.branches.get(frame.next).copied() else {
                stack.pop();
                // Undo the placement that led into the finished frame
                if !stack.is_empty() {
                    speculation.pop();
                }
                continue;
            };
            frame.next += 1;
            let (ply, total) = (frame.ply, frame.total + branch.gain);
            if ply + 1 == depth {
                best = best.max(total);
                continue;
            }

            speculation.push(branch.card, branch.x, branch.y);
            let child = self.expand(&mut speculation, me, lookahead, ply + 1, total);
            if child.branches.is_empty() {
                // Nobody can move anymore, so the path ends early
                best = best.max(total);
                speculation.pop();
            } else {
                stack.push(child);
            }
        }
        debug_assert_eq!(speculation.depth(), 1);
        best
    }

    fn expand(
        &self,
        board: &mut Speculation<'_>,
        me: PlayerId,
        lookahead: &[Card],
        ply: usize,
        total: f64,
    ) -> Frame {
        let PlyConfig { breadth, discount } = self.config.plies[ply];
        let mut branches = Vec::new();
        for &stand_in in lookahead {
            let weight = if stand_in.owner == me { discount } else { 0.0 };
            branches.extend(
                best_speculative(board, stand_in, breadth)
                    .into_iter()
                    .map(|spot| Branch {
                        x: spot.x,
                        y: spot.y,
                        card: stand_in,
                        gain: weight * f64::from(spot.score),
                    }),
            );
        }
        Frame {
            ply,
            total,
            branches,
            next: 0,
        }
    }
}
