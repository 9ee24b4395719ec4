//! Domain layer: pure rules for player state and game lifecycle.

pub mod lifecycle;
pub mod money;
pub mod player_policy;
pub mod roles;

pub use player_policy::{PlayerChanges, PlayerField};
pub use roles::CallerRole;
