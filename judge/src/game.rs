use std::collections::VecDeque;

use anyhow::bail;
use punto::{best_spots, Board, Card, Maximax, PlayerId};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::GameError;
use crate::input::MoveInput;
use crate::seat::Seat;
use crate::Config;

/// What happened in a single turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    Played {
        player: PlayerId,
        card: Card,
        x: i8,
        y: i8,
    },
    /// The drawn card could not be placed anywhere, so the player left the round.
    Eliminated { player: PlayerId, card: Card },
    /// The player had no cards left and was skipped.
    Exhausted { player: PlayerId },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum RoundResult {
    Won { player: PlayerId, name: String },
    Draw,
}

/// A round of the card game with one controlled player and any number of
/// computer players.
///
/// Seats take turns in a fixed rotation. The first name passed to
/// [`Game::new()`] is the controlled player, whose moves come from a
/// [`MoveInput`]; everyone else plays randomly during the opening and greedily
/// afterwards.
pub struct Game {
    names: Vec<String>,
    // The front seat moves next.
    seats: VecDeque<Seat>,
    board: Board,
    controlled: PlayerId,
    winner: Option<PlayerId>,
    rng: StdRng,
    search: Maximax,
}

impl Game {
    pub fn new(names: &[String], config: Config) -> Result<Self, GameError> {
        if names.is_empty() {
            return Err(GameError::NoPlayers);
        }
        if names.len() > usize::from(PlayerId::MAX) {
            return Err(GameError::TooManyPlayers { count: names.len() });
        }
        let Config { mut rng, search } = config;
        let (seats, board) = deal(names, &mut rng);
        Ok(Self {
            names: names.to_vec(),
            seats,
            board,
            controlled: 1,
            winner: None,
            rng,
            search: Maximax::with_config(search),
        })
    }

    /// Starts a new round with fresh decks and a new seat order.
    pub fn reset(&mut self) {
        let (seats, board) = deal(&self.names, &mut self.rng);
        self.seats = seats;
        self.board = board;
        self.winner = None;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The seats still in the round, the one to move next first.
    pub fn seats(&self) -> &VecDeque<Seat> {
        &self.seats
    }

    pub fn controlled(&self) -> PlayerId {
        self.controlled
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub fn name(&self, player: PlayerId) -> &str {
        &self.names[usize::from(player) - 1]
    }

    /// The round is over once somebody won or nobody has cards left.
    pub fn is_done(&self) -> bool {
        self.winner.is_some() || self.seats.iter().all(|seat| seat.deck.is_empty())
    }

    /// Plays turns until the round is over.
    pub fn play_round(&mut self, input: &mut dyn MoveInput) -> anyhow::Result<RoundResult> {
        while !self.is_done() {
            self.do_turn(input)?;
        }
        let result = match self.winner {
            Some(player) => RoundResult::Won {
                player,
                name: self.name(player).to_owned(),
            },
            None => RoundResult::Draw,
        };
        info!(?result, played = self.board.played_cards().len(), "Round over");
        Ok(result)
    }

    /// Lets the front seat draw and place a card.
    ///
    /// Returns an error only if `input` fails, not when it proposes an
    /// illegal position.
    pub fn do_turn(&mut self, input: &mut dyn MoveInput) -> anyhow::Result<TurnOutcome> {
        let Some(seat) = self.seats.front_mut() else {
            bail!("No players left in the round");
        };
        let player = seat.id();
        let drawn = seat.deck.draw();
        self.seats.rotate_left(1);

        let Some(card) = drawn else {
            debug!(player = self.name(player), "No cards left, skipping");
            return Ok(TurnOutcome::Exhausted { player });
        };

        let valid = self.board.valid_plays(card);
        if valid.is_empty() {
            // The mover is at the back of the queue now
            self.seats.pop_back();
            info!(
                player = self.name(player),
                %card,
                "Card can't be placed, player is eliminated"
            );
            return Ok(TurnOutcome::Eliminated { player, card });
        }

        let (x, y) = if player == self.controlled {
            self.controlled_move(card, input)?
        } else {
            let (x, y) = self.computer_move(card, &valid);
            self.board.play_unchecked(card, x, y)?;
            (x, y)
        };
        debug!(player = self.name(player), %card, x, y, "Played");

        if self.board.check_winner(player, x, y) {
            self.winner = Some(player);
        }
        Ok(TurnOutcome::Played { player, card, x, y })
    }

    /// The search's choice for the controlled player placing `card`.
    ///
    /// The other players' next cards are guessed from the middle of their
    /// decks. They move in seat order, and the controlled player last.
    pub fn recommend(&mut self, card: Card) -> Option<(i8, i8)> {
        let controlled = self.controlled;
        let mut lookahead: Vec<Card> = self
            .seats
            .iter()
            .filter(|seat| seat.id() != controlled)
            .filter_map(Seat::stand_in_card)
            .collect();
        lookahead.extend(
            self.seats
                .iter()
                .filter(|seat| seat.id() == controlled)
                .filter_map(Seat::stand_in_card),
        );
        self.search.best_move(&mut self.board, card, &lookahead)
    }

    fn controlled_move(
        &mut self,
        card: Card,
        input: &mut dyn MoveInput,
    ) -> anyhow::Result<(i8, i8)> {
        let recommendation = self.recommend(card);
        debug!(%card, ?recommendation, "Asking for a position");
        loop {
            let (x, y) = input.choose_move(&self.board, card, recommendation)?;
            match self.board.play(card, x, y) {
                Ok(()) => return Ok((x, y)),
                Err(err) => {
                    debug!(x, y, %err, "Rejected position");
                    input.reject(x, y, &err)?;
                }
            }
        }
    }

    // During the opening, i.e. until there are as many cards on the board as
    // players, computer players pick a random position.
    fn computer_move(&mut self, card: Card, valid: &[(i8, i8)]) -> (i8, i8) {
        if self.board.played_cards().len() < self.seats.len() {
            return valid[self.rng.gen_range(0..valid.len())];
        }
        best_spots(&mut self.board, card, 1)
            .first()
            .map_or(valid[0], |spot| (spot.x, spot.y))
    }
}

// Fresh decks in a random seat order. The first seat plays the card in the
// center and moves to the back.
fn deal(names: &[String], rng: &mut StdRng) -> (VecDeque<Seat>, Board) {
    let mut seats: Vec<Seat> = names
        .iter()
        .zip(1..=PlayerId::MAX)
        .map(|(name, id)| Seat::new(name, id, rng))
        .collect();
    seats.shuffle(rng);
    let mut seats = VecDeque::from(seats);
    let first_card = seats[0].deck.draw().expect("A fresh deck is never empty");
    seats.rotate_left(1);
    (seats, Board::new(first_card))
}
