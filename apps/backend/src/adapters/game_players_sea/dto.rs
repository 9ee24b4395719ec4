//! DTOs for game_players_sea adapter.

/// New player row; balance starts at "0.00", not jailed.
#[derive(Debug, Clone)]
pub struct GamePlayerCreate {
    pub game_id: i64,
    pub symbol: String,
    pub address: String,
}

impl GamePlayerCreate {
    pub fn new(game_id: i64, symbol: impl Into<String>) -> Self {
        Self {
            game_id,
            symbol: symbol.into(),
            address: String::new(),
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }
}

/// Full-record write of a player, guarded by `lock_version`.
#[derive(Debug, Clone)]
pub struct GamePlayerUpdate {
    pub id: i64,
    pub game_id: i64,
    pub symbol: String,
    pub address: String,
    pub trade_locked_balance: String,
    pub in_jail: bool,
    pub expected_lock_version: i32,
}
