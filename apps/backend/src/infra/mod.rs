//! Infrastructure: database bootstrap, DbErr translation and state building.

pub mod db;
pub mod db_errors;
pub mod state;
