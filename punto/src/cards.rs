use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifies the player owning a card. Players are numbered from 1.
pub type PlayerId = u8;

/// The smallest value a card can have.
pub const MIN_VALUE: u8 = 1;
/// The largest value a card can have. Cards of this value can never be covered.
pub const MAX_VALUE: u8 = 9;

/// A numbered card, belonging to one player.
///
/// Empty cells are not cards: the board stores `Option<Card>`, with `None`
/// marking an empty cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub owner: PlayerId,
    pub value: u8,
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", owner_letter(self.owner), self.value)
    }
}

impl Card {
    /// Panics if the owner is 0 or the value is outside of `MIN_VALUE..=MAX_VALUE`.
    pub fn new(owner: PlayerId, value: u8) -> Self {
        assert!(owner > 0, "Player ids start at 1");
        assert!(
            (MIN_VALUE..=MAX_VALUE).contains(&value),
            "Card value {} out of range",
            value
        );
        Self { owner, value }
    }

    /// A card may only be placed on an empty cell or on a strictly weaker card.
    pub fn can_be_placed_on(&self, existing: Option<Card>) -> bool {
        existing.map_or(true, |other| self.value > other.value)
    }
}

/// Letter used to render an owner: 1 is `A`, 2 is `B` and so on.
pub fn owner_letter(owner: PlayerId) -> char {
    char::from(b'A' + (owner.saturating_sub(1) % 26))
}

/// The error type for the [`FromStr`] instance of [`Card`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardFromStrErr {
    LessThanTwoChars,
    MoreThanTwoChars,
    InvalidOwner,
    InvalidValue,
}

impl FromStr for Card {
    type Err = CardFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let owner_char = chars.next().ok_or(CardFromStrErr::LessThanTwoChars)?;
        let value_char = chars.next().ok_or(CardFromStrErr::LessThanTwoChars)?;
        if chars.next().is_some() {
            return Err(CardFromStrErr::MoreThanTwoChars);
        }
        if !owner_char.is_ascii_uppercase() {
            return Err(CardFromStrErr::InvalidOwner);
        }
        let owner = owner_char as u8 - b'A' + 1;
        let value = value_char
            .to_digit(10)
            .map(|v| v as u8)
            .filter(|v| (MIN_VALUE..=MAX_VALUE).contains(v))
            .ok_or(CardFromStrErr::InvalidValue)?;
        Ok(Card { owner, value })
    }
}

/// Shorthand for creating cards from a two-character string.
///
/// The first character is the owner as an uppercase letter (`A` is player 1),
/// the second is the value.
///
/// This macro is just calling the [`FromStr`] instance of [`Card`].
/// ```
/// # use punto::{card, Card};
/// assert_eq!(card!("B7"), Card { owner: 2, value: 7 });
/// ```
#[macro_export]
macro_rules! card {
    ($ov:literal) => {
        <$crate::Card as std::str::FromStr>::from_str($ov)
            .expect("Invalid card code given to card! macro")
    };
}
// The import is for using the macro in other modules, see https://stackoverflow.com/a/31749071/1726797
#[allow(unused_imports)]
pub(crate) use card;
