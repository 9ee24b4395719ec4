//! Domain services. Each operation takes the connection (usually the
//! request transaction) it must run on.

pub mod game_players;
pub mod games;
