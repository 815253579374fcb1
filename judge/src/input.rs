use std::io::{BufRead, Stderr, StdinLock, Write};
use std::num::ParseIntError;

use anyhow::bail;
use punto::{Board, Card, IllegalPlacement};
use tracing::debug;

/// Decides where the controlled player puts their card.
pub trait MoveInput {
    /// Picks a position for `card`. `recommendation` is the search's choice,
    /// if there is one.
    fn choose_move(
        &mut self,
        board: &Board,
        card: Card,
        recommendation: Option<(i8, i8)>,
    ) -> anyhow::Result<(i8, i8)>;

    /// Called when the chosen position was rejected by the board. Another
    /// [`Self::choose_move()`] call follows.
    fn reject(&mut self, _x: i8, _y: i8, _err: &IllegalPlacement) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Always plays the recommended move.
#[derive(Clone, Copy, Debug, Default)]
pub struct FollowRecommendation;

impl MoveInput for FollowRecommendation {
    fn choose_move(
        &mut self,
        _board: &Board,
        card: Card,
        recommendation: Option<(i8, i8)>,
    ) -> anyhow::Result<(i8, i8)> {
        match recommendation {
            Some(pos) => Ok(pos),
            None => bail!("No recommended position for {}", card),
        }
    }

    fn reject(&mut self, x: i8, y: i8, err: &IllegalPlacement) -> anyhow::Result<()> {
        bail!("Recommended position ({}, {}) was rejected: {}", x, y, err)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum PositionParseErr {
    WrongNumberOfValues { found: usize },
    InvalidCoordinate(ParseIntError),
}

impl std::error::Error for PositionParseErr {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PositionParseErr::WrongNumberOfValues { .. } => None,
            PositionParseErr::InvalidCoordinate(err) => Some(err),
        }
    }
}

impl std::fmt::Display for PositionParseErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PositionParseErr::WrongNumberOfValues { found } => {
                write!(f, "Expected 2 coordinates, found {}", found)
            }
            PositionParseErr::InvalidCoordinate(err) => write!(f, "Invalid coordinate: {}", err),
        }
    }
}

/// Parses a position given as `"x y"`.
pub fn parse_position(line: &str) -> Result<(i8, i8), PositionParseErr> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let [x, y] = parts[..] else {
        return Err(PositionParseErr::WrongNumberOfValues { found: parts.len() });
    };
    let x = x.parse().map_err(PositionParseErr::InvalidCoordinate)?;
    let y = y.parse().map_err(PositionParseErr::InvalidCoordinate)?;
    Ok((x, y))
}

/// Reads positions line by line, e.g. from a terminal.
pub struct ConsoleInput<R, W> {
    reader: R,
    writer: W,
    // A re-usable buffer for reading lines.
    buf: String,
}

impl ConsoleInput<StdinLock<'static>, Stderr> {
    /// Reads from stdin. The board and prompts go to stderr, which keeps
    /// stdout free for results.
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stderr())
    }
}

impl<R: BufRead, W: Write> ConsoleInput<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            buf: String::new(),
        }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> MoveInput for ConsoleInput<R, W> {
    fn choose_move(
        &mut self,
        board: &Board,
        card: Card,
        recommendation: Option<(i8, i8)>,
    ) -> anyhow::Result<(i8, i8)> {
        writeln!(self.writer, "{}", board)?;
        writeln!(self.writer, "Your card: {}", card)?;
        if let Some((x, y)) = recommendation {
            writeln!(self.writer, "Recommended position: {} {}", x, y)?;
        }
        loop {
            write!(self.writer, "Position (x y): ")?;
            self.writer.flush()?;
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                bail!("Input ended before a position was entered");
            }
            match parse_position(&self.buf) {
                Ok(pos) => return Ok(pos),
                Err(err) => {
                    debug!(input = self.buf.trim_end(), %err, "Malformed position");
                    writeln!(
                        self.writer,
                        "Please enter the position like this: 1 3 (for x=1 and y=3)"
                    )?;
                }
            }
        }
    }

    fn reject(&mut self, x: i8, y: i8, err: &IllegalPlacement) -> anyhow::Result<()> {
        writeln!(self.writer, "Can't play at ({}, {}): {}", x, y, err)?;
        Ok(())
    }
}
