//! Core data models for conference dominance rankings.

mod game;
mod ranking;
mod team;

pub use game::*;
pub use ranking::*;
pub use team::*;
