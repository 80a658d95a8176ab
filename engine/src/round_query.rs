//! Read-only queries over the store.
//!
//! Queries never stage writes; they read the committed state directly.
//! Aggregates are recomputed from the bet records rather than trusted from
//! the round's counters, so a crashed round reports its post-crash truth.

use std::collections::HashSet;

use crashpoint_types::{
    BetRound, GameRound, Key, LedgerEntry, ResultType, RoundStatistics, RoundStatus, UserId, Value,
};

use crate::error::LedgerError;
use crate::state::State;

/// One page of query results, newest first.
#[derive(Clone, Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub total_pages: u64,
    pub current_page: u64,
}

async fn load_round<S: State>(
    state: &S,
    round_number: u64,
) -> Result<Option<GameRound>, LedgerError> {
    Ok(match state.get(&Key::Round(round_number)).await? {
        Some(Value::Round(round)) => Some(round),
        _ => None,
    })
}

async fn load_ids<S: State>(state: &S, key: Key) -> Result<Vec<u64>, LedgerError> {
    Ok(match state.get(&key).await? {
        Some(Value::Ids(ids)) => ids,
        _ => Vec::new(),
    })
}

async fn load_bets<S: State>(state: &S, ids: &[u64]) -> Result<Vec<BetRound>, LedgerError> {
    let mut bets = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(Value::Bet(bet)) = state.get(&Key::Bet(*id)).await? {
            bets.push(bet);
        }
    }
    Ok(bets)
}

fn paginate<T>(mut items: Vec<T>, page: u64, limit: u64) -> Page<T> {
    let limit = limit.max(1);
    let page = page.max(1);
    let total = items.len() as u64;
    let total_pages = total.div_ceil(limit);
    // Client-controlled page/limit; saturate rather than overflow.
    let skip = (page - 1).saturating_mul(limit);
    let items = if skip >= items.len() as u64 {
        Vec::new()
    } else {
        let skip = skip as usize;
        let end = items.len().min(skip.saturating_add(limit as usize));
        items.drain(skip..end).collect()
    };
    Page {
        items,
        total,
        total_pages,
        current_page: page,
    }
}

/// The in-progress round and its live statistics, if one exists.
pub async fn current_round<S: State>(
    state: &S,
) -> Result<Option<(GameRound, RoundStatistics)>, LedgerError> {
    let Some(Value::RoundNumber(round_number)) = state.get(&Key::ActiveRound).await? else {
        return Ok(None);
    };
    let Some(round) = load_round(state, round_number).await? else {
        return Ok(None);
    };
    let statistics = round_statistics(state, round_number).await?;
    Ok(Some((round, statistics)))
}

/// Bets recorded against a round, oldest first.
pub async fn round_bets<S: State>(
    state: &S,
    round_number: u64,
) -> Result<Vec<BetRound>, LedgerError> {
    let ids = load_ids(state, Key::RoundBets(round_number)).await?;
    load_bets(state, &ids).await
}

/// Aggregate statistics for a round, recomputed from its bet records.
pub async fn round_statistics<S: State>(
    state: &S,
    round_number: u64,
) -> Result<RoundStatistics, LedgerError> {
    let round = load_round(state, round_number)
        .await?
        .ok_or(LedgerError::RoundNotFound)?;
    let bets = round_bets(state, round_number).await?;

    let mut players = HashSet::new();
    let mut wins = 0u64;
    let mut losses = 0u64;
    let mut total_bet_amount_cents = 0u64;
    let mut total_win_amount_cents = 0i64;
    let mut total_loss_amount_cents = 0i64;
    for bet in &bets {
        players.insert(bet.user);
        total_bet_amount_cents = total_bet_amount_cents.saturating_add(bet.bet_amount_cents);
        match bet.result_type {
            ResultType::Win => {
                wins += 1;
                total_win_amount_cents += bet.amount_change_cents;
            }
            ResultType::Loss => {
                losses += 1;
                total_loss_amount_cents += bet.amount_change_cents;
            }
            ResultType::Neutral => {}
        }
    }

    Ok(RoundStatistics {
        round_number: round.round_number,
        status: round.status,
        multiplier: round.multiplier,
        total_bets: bets.len() as u64,
        total_bet_amount_cents,
        total_players: players.len() as u64,
        wins,
        losses,
        total_win_amount_cents: total_win_amount_cents.unsigned_abs(),
        total_loss_amount_cents: total_loss_amount_cents.unsigned_abs(),
        started_at_ms: round.started_at_ms,
        ended_at_ms: round.ended_at_ms,
        crashed_at_ms: round.crashed_at_ms,
    })
}

/// A round plus its bets and recomputed statistics.
pub async fn round_details<S: State>(
    state: &S,
    round_number: u64,
) -> Result<(GameRound, Vec<BetRound>, RoundStatistics), LedgerError> {
    let round = load_round(state, round_number)
        .await?
        .ok_or(LedgerError::RoundNotFound)?;
    let bets = round_bets(state, round_number).await?;
    let statistics = round_statistics(state, round_number).await?;
    Ok((round, bets, statistics))
}

/// Rounds newest first, optionally filtered by status.
pub async fn recent_rounds<S: State>(
    state: &S,
    page: u64,
    limit: u64,
    status: Option<RoundStatus>,
) -> Result<Page<GameRound>, LedgerError> {
    let highest = match state.get(&Key::RoundSequence).await? {
        Some(Value::Sequence(value)) => value,
        _ => 0,
    };
    let mut rounds = Vec::new();
    for round_number in (1..=highest).rev() {
        let Some(round) = load_round(state, round_number).await? else {
            continue;
        };
        if status.is_some_and(|wanted| round.status != wanted) {
            continue;
        }
        rounds.push(round);
    }
    Ok(paginate(rounds, page, limit))
}

/// A user's bets, newest first, optionally filtered by result.
pub async fn bet_history<S: State>(
    state: &S,
    user: UserId,
    page: u64,
    limit: u64,
    result_type: Option<ResultType>,
) -> Result<Page<BetRound>, LedgerError> {
    let mut ids = load_ids(state, Key::UserBets(user)).await?;
    ids.reverse();
    let mut bets = load_bets(state, &ids).await?;
    if let Some(wanted) = result_type {
        bets.retain(|bet| bet.result_type == wanted);
    }
    Ok(paginate(bets, page, limit))
}

/// A user's transaction log, newest first.
pub async fn user_ledger<S: State>(
    state: &S,
    user: UserId,
) -> Result<Vec<LedgerEntry>, LedgerError> {
    let mut ids = load_ids(state, Key::UserLedger(user)).await?;
    ids.reverse();
    let mut entries = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(Value::LedgerEntry(entry)) = state.get(&Key::LedgerEntry(id)).await? {
            entries.push(entry);
        }
    }
    Ok(entries)
}

/// A user's current balances.
pub async fn user_balance<S: State>(
    state: &S,
    user: UserId,
) -> Result<crashpoint_types::User, LedgerError> {
    match state.get(&Key::User(user)).await? {
        Some(Value::User(found)) => Ok(found),
        _ => Err(LedgerError::UserNotFound),
    }
}
