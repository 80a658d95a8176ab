//! Public settlement operations.
//!
//! Each operation opens a [`Ledger`] session over the store, runs to
//! completion against the session's overlay, and lands the whole change set
//! through one `State::apply`. An error at any step means nothing is
//! written.

use crashpoint_types::{GameRound, User, UserId};

use crate::error::LedgerError;
use crate::layer::{handlers, BetPlaced, Ledger};
use crate::state::State;

/// Place and settle a bet.
pub async fn place_bet<S: State>(
    state: &mut S,
    now_ms: u64,
    user: UserId,
    round_reference: Option<u64>,
    bet_amount_cents: u64,
    percentage: f64,
    game_id: Option<&str>,
) -> Result<BetPlaced, LedgerError> {
    let mut session = Ledger::new(state, now_ms);
    let placed = handlers::betting::handle_place_bet(
        &mut session,
        user,
        round_reference,
        bet_amount_cents,
        percentage,
        game_id,
    )
    .await?;
    let changes = session.commit();
    state.apply(changes).await?;
    Ok(placed)
}

/// Start a new admin-driven round.
pub async fn start_round<S: State>(
    state: &mut S,
    now_ms: u64,
    admin: UserId,
) -> Result<GameRound, LedgerError> {
    let mut session = Ledger::new(state, now_ms);
    let round = handlers::rounds::handle_start_round(&mut session, admin).await?;
    let changes = session.commit();
    state.apply(changes).await?;
    Ok(round)
}

/// Crash the active round, reversing every standing win.
pub async fn crash_round<S: State>(
    state: &mut S,
    now_ms: u64,
    admin: UserId,
    multiplier: Option<f64>,
) -> Result<GameRound, LedgerError> {
    let mut session = Ledger::new(state, now_ms);
    let round = handlers::rounds::handle_crash_round(&mut session, admin, multiplier).await?;
    let changes = session.commit();
    state.apply(changes).await?;
    Ok(round)
}

/// Mark a round completed. Idempotent on terminal rounds.
pub async fn complete_round<S: State>(
    state: &mut S,
    now_ms: u64,
    round_number: u64,
) -> Result<GameRound, LedgerError> {
    let mut session = Ledger::new(state, now_ms);
    let round = handlers::rounds::handle_complete_round(&mut session, round_number).await?;
    let changes = session.commit();
    state.apply(changes).await?;
    Ok(round)
}

/// Create a new active user with empty balances.
pub async fn register_user<S: State>(
    state: &mut S,
    now_ms: u64,
    name: String,
) -> Result<User, LedgerError> {
    let mut session = Ledger::new(state, now_ms);
    let user = handlers::rounds::handle_register_user(&mut session, name).await?;
    let changes = session.commit();
    state.apply(changes).await?;
    Ok(user)
}

/// Credit a deposit and return the updated user.
pub async fn deposit<S: State>(
    state: &mut S,
    now_ms: u64,
    user: UserId,
    amount_cents: u64,
) -> Result<User, LedgerError> {
    let mut session = Ledger::new(state, now_ms);
    let updated = handlers::rounds::handle_deposit(&mut session, user, amount_cents).await?;
    let changes = session.commit();
    state.apply(changes).await?;
    Ok(updated)
}
