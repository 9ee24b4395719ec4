//! Repository functions for the domain layer.

pub mod game_players;
pub mod games;
