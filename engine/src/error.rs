use crashpoint_types::{RoundInvariantError, RoundStatus};
use thiserror::Error;

/// Errors surfaced by settlement and lifecycle operations.
///
/// Validation and state-machine violations carry the human-readable message
/// callers relay verbatim; `State` wraps storage faults. An error from any
/// step aborts the whole session, so there is never partial state behind one
/// of these.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("User not found")]
    UserNotFound,
    #[error("User account is not active")]
    UserNotActive,
    #[error("Minimum bet amount is {min_cents} cents")]
    BetBelowMinimum { min_cents: u64 },
    #[error("Insufficient balance")]
    InsufficientBalance,
    #[error("percentage must be a finite number")]
    InvalidPercentage,
    #[error("Round not found. Please ensure a round is active.")]
    RoundNotFound,
    #[error("No active round found")]
    NoActiveRound,
    #[error("Round #{round_number} is {status}. Cannot place bets on inactive rounds.")]
    RoundNotAcceptingBets {
        round_number: u64,
        status: RoundStatus,
    },
    #[error("Round #{round_number} is already in progress. Please crash it first.")]
    RoundAlreadyActive { round_number: u64 },
    #[error(transparent)]
    Invariant(#[from] RoundInvariantError),
    #[error(transparent)]
    State(#[from] anyhow::Error),
}

impl LedgerError {
    /// Whether this is a missing-entity error rather than a rejected request.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound | Self::RoundNotFound)
    }

    /// Whether this is an internal fault rather than a client error.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::State(_))
    }
}
