//! Settlement engine for crashpoint.
//!
//! The engine owns every balance-affecting rule: bet validation and
//! settlement, the round lifecycle, and the append-only transaction log.
//! All mutations run inside a [`Ledger`] session over a [`State`] store and
//! land atomically; reads go through [`round_query`].

pub mod error;
mod layer;
pub mod ops;
pub mod round_query;
pub mod settlement;
pub mod state;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;


pub use error::LedgerError;
pub use layer::{BetPlaced, Ledger};
pub use settlement::{round_result, slot_multiplier, RoundOutcome};
pub use state::{Memory, State, Status};
