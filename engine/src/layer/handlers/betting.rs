//! Bet placement and settlement.
//!
//! A bet settles the moment it is placed: the stake is debited, the signed
//! percentage decides the outcome, and the outcome delta lands in the same
//! session. Both balance movements clamp at zero independently.

use std::collections::HashSet;

use crashpoint_types::{
    is_slot_game, BetRound, GameRound, Key, LedgerKind, LedgerMetadata, ResultType, RoundStatus,
    UserId, UserStatus, Value, MIN_BET_AMOUNT_CENTS,
};
use tracing::debug;

use super::display_percentage;
use crate::error::LedgerError;
use crate::layer::Ledger;
use crate::settlement::{round_result, slot_multiplier};
use crate::state::State;

/// Everything a settled bet produced, for the caller's response.
#[derive(Clone, Debug)]
pub struct BetPlaced {
    pub bet: BetRound,
    pub round: GameRound,
}

pub(crate) async fn handle_place_bet<S: State>(
    session: &mut Ledger<'_, S>,
    user_id: UserId,
    round_reference: Option<u64>,
    bet_amount_cents: u64,
    percentage: f64,
    game_id: Option<&str>,
) -> Result<BetPlaced, LedgerError> {
    // Validation ladder. Any failure aborts before a single write lands.
    let user = session.user_or_error(&user_id).await?;
    if user.status != UserStatus::Active {
        return Err(LedgerError::UserNotActive);
    }
    if bet_amount_cents < MIN_BET_AMOUNT_CENTS {
        return Err(LedgerError::BetBelowMinimum {
            min_cents: MIN_BET_AMOUNT_CENTS,
        });
    }
    if !percentage.is_finite() {
        return Err(LedgerError::InvalidPercentage);
    }
    if user.total_balance_cents() < bet_amount_cents {
        return Err(LedgerError::InsufficientBalance);
    }

    // Resolve the target round. Slot games get a lazily created, already
    // settled round; everything else must hit an in-progress round.
    let mut round = match game_id.filter(|id| is_slot_game(id)) {
        Some(game) => slot_round(session, game, round_reference, percentage).await?,
        None => {
            let round_number = match round_reference {
                Some(number) => number,
                None => session
                    .active_round_number()
                    .await?
                    .ok_or(LedgerError::NoActiveRound)?,
            };
            let round = session.round_or_error(round_number).await?;
            if round.status != RoundStatus::InProgress {
                return Err(LedgerError::RoundNotAcceptingBets {
                    round_number: round.round_number,
                    status: round.status,
                });
            }
            round
        }
    };

    let outcome = round_result(percentage, bet_amount_cents);

    // Stake debit first, outcome second. The snapshots bracket both.
    let stake_delta = i64::try_from(bet_amount_cents).unwrap_or(i64::MAX);
    let (balance_before, _) = session.update_balance(&user_id, -stake_delta).await?;
    let (_, balance_after) = session
        .update_balance(&user_id, outcome.amount_change_cents)
        .await?;

    let bet_id = session.next_sequence(Key::BetSequence).await?;
    let bet = BetRound {
        id: bet_id,
        user: user_id,
        round_number: round.round_number,
        bet_amount_cents,
        percentage,
        result_type: outcome.result_type,
        amount_change_cents: outcome.amount_change_cents,
        balance_before_cents: balance_before,
        balance_after_cents: balance_after,
        placed_at_ms: session.now_ms(),
    };
    session.insert(Key::Bet(bet_id), Value::Bet(bet.clone()));
    session
        .push_id(Key::RoundBets(round.round_number), bet_id)
        .await?;
    session.push_id(Key::UserBets(user_id), bet_id).await?;

    // Round aggregates. Distinct players come from the round's bet records,
    // the one just staged included.
    let mut players = HashSet::new();
    for id in session.ids(&Key::RoundBets(round.round_number)).await? {
        if let Some(Value::Bet(recorded)) = session.get(&Key::Bet(id)).await? {
            players.insert(recorded.user);
        }
    }
    round.total_bets = round.total_bets.saturating_add(1);
    round.total_bet_amount_cents = round.total_bet_amount_cents.saturating_add(bet_amount_cents);
    round.total_players = players.len() as u64;
    session.insert(Key::Round(round.round_number), Value::Round(round.clone()));

    let percentage_display = display_percentage(percentage);
    session
        .append_ledger_entry(
            user_id,
            LedgerKind::BetRound,
            bet_amount_cents,
            format!(
                "Bet placed on round #{} ({percentage_display}%)",
                round.round_number
            ),
            LedgerMetadata {
                bet_id: Some(bet_id),
                round_number: Some(round.round_number),
                percentage: Some(percentage),
                result_type: Some(outcome.result_type),
                crash_reversal: false,
            },
        )
        .await?;
    if outcome.result_type != ResultType::Neutral {
        let kind = match outcome.result_type {
            ResultType::Win => LedgerKind::Win,
            _ => LedgerKind::BetRound,
        };
        session
            .append_ledger_entry(
                user_id,
                kind,
                outcome.amount_change_cents.unsigned_abs(),
                format!(
                    "Round #{} result: {} ({percentage_display}%)",
                    round.round_number,
                    outcome.result_type.as_str()
                ),
                LedgerMetadata {
                    bet_id: Some(bet_id),
                    round_number: Some(round.round_number),
                    percentage: Some(percentage),
                    result_type: Some(outcome.result_type),
                    crash_reversal: false,
                },
            )
            .await?;
    }

    debug!(
        user = %user_id,
        round = round.round_number,
        bet = bet_id,
        result = outcome.result_type.as_str(),
        amount_change_cents = outcome.amount_change_cents,
        "bet settled"
    );

    Ok(BetPlaced { bet, round })
}

/// Find or lazily create the round a slot bet targets. Repeat bets naming
/// the same client round reference land on the same round.
async fn slot_round<S: State>(
    session: &mut Ledger<'_, S>,
    game_id: &str,
    client_round: Option<u64>,
    percentage: f64,
) -> Result<GameRound, LedgerError> {
    if let Some(reference) = client_round {
        if let Some(Value::RoundNumber(number)) = session
            .get(&Key::SlotRound(game_id.to_string(), reference))
            .await?
        {
            return session.round_or_error(number).await;
        }
    }

    let round_number = session.next_sequence(Key::RoundSequence).await?;
    let round = GameRound::completed_slot(
        round_number,
        game_id.to_string(),
        slot_multiplier(percentage),
        session.now_ms(),
    );
    round.validate()?;
    session.insert(Key::Round(round_number), Value::Round(round.clone()));
    if let Some(reference) = client_round {
        session.insert(
            Key::SlotRound(game_id.to_string(), reference),
            Value::RoundNumber(round_number),
        );
    }
    Ok(round)
}
