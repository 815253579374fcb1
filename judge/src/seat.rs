use punto::{Card, Deck, PlayerId};
use rand::rngs::StdRng;

/// A player taking part in a game, together with their deck.
#[derive(Clone, Debug)]
pub struct Seat {
    pub name: String,
    pub deck: Deck,
}

impl Seat {
    pub fn new(name: &str, id: PlayerId, rng: &mut StdRng) -> Self {
        Self {
            name: String::from(name),
            deck: Deck::new(id, rng),
        }
    }

    pub fn id(&self) -> PlayerId {
        self.deck.owner()
    }

    /// The card the search assumes this player will play next.
    pub fn stand_in_card(&self) -> Option<Card> {
        self.deck.median()
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} cards", self.name, self.deck.len())
    }
}
