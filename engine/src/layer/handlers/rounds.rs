//! Round lifecycle and account operations.

use crashpoint_types::{
    GameRound, Key, LedgerKind, LedgerMetadata, ResultType, RoundStatus, User, UserId, Value,
};
use tracing::info;

use crate::error::LedgerError;
use crate::layer::Ledger;
use crate::settlement::can_transition;
use crate::state::State;

/// Start a new round. Fails while another round is still in progress; the
/// active-round marker is what makes "at most one" hold.
pub(crate) async fn handle_start_round<S: State>(
    session: &mut Ledger<'_, S>,
    admin: UserId,
) -> Result<GameRound, LedgerError> {
    if let Some(active) = session.active_round_number().await? {
        return Err(LedgerError::RoundAlreadyActive {
            round_number: active,
        });
    }

    let round_number = session.next_sequence(Key::RoundSequence).await?;
    let round = GameRound::started(round_number, admin, session.now_ms());
    session.insert(Key::Round(round_number), Value::Round(round.clone()));
    session.insert(Key::ActiveRound, Value::RoundNumber(round_number));

    info!(round = round_number, admin = %admin, "round started");
    Ok(round)
}

/// Crash the active round. Every bet that stood as a win or neutral becomes
/// a loss: win credits are clawed back (clamped at zero, like every balance
/// movement) and a reversal entry is appended per reversed win. The bet
/// records are rewritten to their post-crash truth.
pub(crate) async fn handle_crash_round<S: State>(
    session: &mut Ledger<'_, S>,
    admin: UserId,
    multiplier: Option<f64>,
) -> Result<GameRound, LedgerError> {
    let round_number = session
        .active_round_number()
        .await?
        .ok_or(LedgerError::NoActiveRound)?;
    let mut round = session.round_or_error(round_number).await?;

    round.status = RoundStatus::Crashed;
    round.crashed_at_ms = Some(session.now_ms());
    round.ended_at_ms = Some(session.now_ms());
    round.crashed_by = Some(admin);
    if let Some(multiplier) = multiplier {
        round.multiplier = multiplier;
    }
    round.validate()?;

    let mut reversed_wins = 0u64;
    for bet_id in session.ids(&Key::RoundBets(round_number)).await? {
        let Some(Value::Bet(mut bet)) = session.get(&Key::Bet(bet_id)).await? else {
            continue;
        };
        if bet.result_type == ResultType::Loss {
            continue;
        }

        if bet.result_type == ResultType::Win {
            let win_cents = bet.amount_change_cents.unsigned_abs();
            session
                .update_balance(&bet.user, -(win_cents as i64))
                .await?;
            session
                .append_ledger_entry(
                    bet.user,
                    LedgerKind::BetRound,
                    win_cents,
                    format!("Round #{round_number} crashed - win reversed"),
                    LedgerMetadata {
                        bet_id: Some(bet_id),
                        round_number: Some(round_number),
                        percentage: Some(bet.percentage),
                        result_type: Some(ResultType::Loss),
                        crash_reversal: true,
                    },
                )
                .await?;
            reversed_wins += 1;
        }

        bet.result_type = ResultType::Loss;
        bet.amount_change_cents = -(bet.bet_amount_cents as i64);
        bet.balance_after_cents = bet.balance_before_cents.saturating_sub(bet.bet_amount_cents);
        session.insert(Key::Bet(bet_id), Value::Bet(bet));
    }

    session.insert(Key::Round(round_number), Value::Round(round.clone()));
    session.remove(Key::ActiveRound);

    info!(
        round = round_number,
        admin = %admin,
        reversed_wins,
        multiplier = round.multiplier,
        "round crashed"
    );
    Ok(round)
}

/// Complete a round. Terminal rounds come back unchanged, so completing an
/// already crashed or completed round is a no-op rather than an error.
pub(crate) async fn handle_complete_round<S: State>(
    session: &mut Ledger<'_, S>,
    round_number: u64,
) -> Result<GameRound, LedgerError> {
    let mut round = session.round_or_error(round_number).await?;
    if !can_transition(round.status, RoundStatus::Completed) {
        return Ok(round);
    }

    round.status = RoundStatus::Completed;
    round.ended_at_ms = Some(session.now_ms());
    session.insert(Key::Round(round_number), Value::Round(round.clone()));
    if session.active_round_number().await? == Some(round_number) {
        session.remove(Key::ActiveRound);
    }

    info!(round = round_number, "round completed");
    Ok(round)
}

pub(crate) async fn handle_register_user<S: State>(
    session: &mut Ledger<'_, S>,
    name: String,
) -> Result<User, LedgerError> {
    let user = User::new(name);
    session.insert(Key::User(user.id), Value::User(user.clone()));
    info!(user = %user.id, "user registered");
    Ok(user)
}

/// Credit a deposit to the main balance and log it.
pub(crate) async fn handle_deposit<S: State>(
    session: &mut Ledger<'_, S>,
    user_id: UserId,
    amount_cents: u64,
) -> Result<User, LedgerError> {
    let delta = i64::try_from(amount_cents).unwrap_or(i64::MAX);
    session.update_balance(&user_id, delta).await?;
    session
        .append_ledger_entry(
            user_id,
            LedgerKind::Deposit,
            amount_cents,
            "Deposit".to_string(),
            LedgerMetadata::default(),
        )
        .await?;
    session.user_or_error(&user_id).await
}
