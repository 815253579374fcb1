use quickcheck::Arbitrary;

use crate::{Board, Card, MAX_VALUE, MIN_VALUE};

/// Highest owner id generated for tests.
const MAX_TEST_OWNER: u8 = 4;

/// A seed card followed by plays that are all valid when applied in order.
#[derive(Clone, Debug)]
pub struct PlaySequence {
    pub first_card: Card,
    pub plays: Vec<(Card, i8, i8)>,
}

impl PlaySequence {
    /// The board after applying all plays.
    pub fn board(&self) -> Board {
        let mut board = Board::new(self.first_card);
        for &(card, x, y) in &self.plays {
            board
                .play(card, x, y)
                .expect("PlaySequence only contains valid plays");
        }
        board
    }
}

impl Arbitrary for PlaySequence {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let first_card = Card::arbitrary(g);
        let mut board = Board::new(first_card);
        let num_plays = usize::arbitrary(g) % 40;

        let mut plays = Vec::with_capacity(num_plays);
        for _ in 0..num_plays {
            let card = Card::arbitrary(g);
            // Cards without any valid position are skipped, as in a real game
            if let Some(&(x, y)) = g.choose(&board.valid_plays(card)) {
                board
                    .play(card, x, y)
                    .expect("valid_plays() returned an invalid play");
                plays.push((card, x, y));
            }
        }

        PlaySequence { first_card, plays }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        // Dropping plays from the end keeps the remaining plays valid
        let first_card = self.first_card;
        let plays = self.plays.clone();
        Box::new((0..plays.len()).rev().map(move |len| PlaySequence {
            first_card,
            plays: plays[..len].to_vec(),
        }))
    }
}

impl Arbitrary for Card {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        Self {
            owner: u8::arbitrary(g) % MAX_TEST_OWNER + 1,
            value: u8::arbitrary(g) % (MAX_VALUE - MIN_VALUE + 1) + MIN_VALUE,
        }
    }
}
