use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::{Card, PlayerId, MAX_VALUE, MIN_VALUE};

/// How many cards of each value a fresh deck contains.
pub const COPIES_PER_VALUE: usize = 2;
/// The size of a fresh deck.
pub const DECK_SIZE: usize = COPIES_PER_VALUE * (MAX_VALUE - MIN_VALUE + 1) as usize;

/// The cards a single player has not drawn yet, in shuffled order.
///
/// A deck only ever shrinks.
#[derive(Clone, Debug)]
pub struct Deck {
    owner: PlayerId,
    cards: Vec<Card>,
}

impl Deck {
    /// Two cards of every value, shuffled once.
    pub fn new(owner: PlayerId, rng: &mut StdRng) -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for _ in 0..COPIES_PER_VALUE {
            cards.extend((MIN_VALUE..=MAX_VALUE).map(|value| Card::new(owner, value)));
        }
        cards.shuffle(rng);
        Self { owner, cards }
    }

    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Removes the next card. Returns `None` once the deck is used up.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// The card the next [`Self::draw()`] will return.
    pub fn peek(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    /// The card in the middle of the current deck order.
    ///
    /// The search uses this as a stand-in for the player's next card. It is
    /// picked by position, not by value, so it depends on the shuffle.
    pub fn median(&self) -> Option<Card> {
        self.cards.get(self.cards.len() / 2).copied()
    }

    /// Remaining cards, the next draw being the last element.
    pub fn remaining(&self) -> &[Card] {
        &self.cards
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn fresh_deck_has_two_of_each_value() {
        let mut rng = StdRng::seed_from_u64(7);
        let deck = Deck::new(3, &mut rng);
        assert_eq!(deck.len(), 18);
        for value in MIN_VALUE..=MAX_VALUE {
            let count = deck.remaining().iter().filter(|c| c.value == value).count();
            assert_eq!(count, 2, "value {}", value);
        }
        assert!(deck.remaining().iter().all(|c| c.owner == 3));
    }

    #[test]
    fn drawing_exhausts_the_deck() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut deck = Deck::new(1, &mut rng);
        let mut previous_len = deck.len();
        for _ in 0..DECK_SIZE {
            let peeked = deck.peek();
            assert_eq!(deck.draw(), peeked);
            assert_eq!(deck.len(), previous_len - 1);
            previous_len = deck.len();
        }
        assert!(deck.is_empty());
        assert_eq!(deck.draw(), None);
        assert_eq!(deck.peek(), None);
        assert_eq!(deck.median(), None);
    }

    #[test]
    fn median_is_picked_by_position() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut deck = Deck::new(2, &mut rng);
        assert_eq!(deck.median(), Some(deck.remaining()[9]));
        deck.draw();
        assert_eq!(deck.median(), Some(deck.remaining()[8]));
    }
}
