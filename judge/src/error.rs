#[derive(Debug, PartialEq, Eq)]
/// Error type for setting up a game.
pub enum GameError {
    NoPlayers,
    TooManyPlayers { count: usize },
}

impl std::error::Error for GameError {}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::NoPlayers => write!(f, "Cannot create a game for 0 players"),
            GameError::TooManyPlayers { count } => write!(
                f,
                "Cannot create a game for {} players, at most {} are supported",
                count,
                u8::MAX
            ),
        }
    }
}
