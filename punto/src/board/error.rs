use crate::Card;

/// The error type for [`Board::play()`](crate::Board::play), i.e. for placing a single card.
///
/// A rejected placement never changes the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalPlacement {
    OffGrid { x: i8, y: i8 },
    OutOfBounds { x: i8, y: i8 },
    NotStronger { existing: Card },
    NoNeighbour,
}

impl std::error::Error for IllegalPlacement {}

impl std::fmt::Display for IllegalPlacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalPlacement::OffGrid { x, y } => {
                write!(f, "Position ({}, {}) is not on the board", x, y)
            }
            IllegalPlacement::OutOfBounds { x, y } => {
                write!(f, "Position ({}, {}) is outside of the playing area", x, y)
            }
            IllegalPlacement::NotStronger { existing } => write!(
                f,
                "Card must be bigger than the card underneath, which is {}",
                existing
            ),
            IllegalPlacement::NoNeighbour => write!(f, "Card must be adjacent to an existing card"),
        }
    }
}
