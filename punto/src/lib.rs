pub use board::*;
pub use cards::*;
pub use deck::*;
pub use heuristic::*;
pub use maximax::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod cards;
mod deck;
mod heuristic;
mod maximax;
mod visualization;
