//! DTOs for games_sea adapter.

use crate::entities::games::GameStatus;

/// Versioned update of a game row.
///
/// With no fields set this only bumps `lock_version` and `updated_at` (a "touch").
#[derive(Debug, Clone)]
pub struct GameUpdate {
    pub id: i64,
    pub status: Option<GameStatus>,
    pub expected_lock_version: i32,
}

impl GameUpdate {
    pub fn new(id: i64, expected_lock_version: i32) -> Self {
        Self {
            id,
            status: None,
            expected_lock_version,
        }
    }

    pub fn with_status(mut self, status: GameStatus) -> Self {
        self.status = Some(status);
        self
    }
}
