mod error;
mod game;
mod input;
mod seat;
pub use error::*;
pub use game::*;
pub use input::*;
pub use seat::*;

use punto::MaximaxConfig;
use rand::rngs::StdRng;

/// Everything needed to set up a [`Game`] besides the player names.
pub struct Config {
    /// Source of all randomness in the game: shuffles, seat order, opening moves.
    pub rng: StdRng,
    /// Search knobs for the controlled player's recommendations.
    pub search: MaximaxConfig,
}
