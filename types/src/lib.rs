//! Common types for the crashpoint betting service.
//!
//! All currency amounts are integer cents. Balance arithmetic saturates at
//! zero; a balance can never go negative. Percentages and multipliers are
//! `f64` display/outcome inputs and never participate in balance math except
//! through the single outcome computation in the engine.

pub mod api;
pub mod betting;
pub mod ledger;
pub mod store;

pub use betting::{
    is_slot_game, BetRound, GameRound, ResultType, RoundInvariantError, RoundStatistics,
    RoundStatus, User, UserId, UserStatus, DEFAULT_GAME_ID, MIN_BET_AMOUNT_CENTS, SLOT_GAME_IDS,
};
pub use ledger::{LedgerEntry, LedgerKind, LedgerMetadata, LedgerStatus};
pub use store::{Key, Value};
