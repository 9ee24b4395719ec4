//! SeaORM adapters, generic over `ConnectionTrait`. They return `DbErr`;
//! the repos layer maps to `DomainError`.

pub mod game_players_sea;
pub mod games_sea;
