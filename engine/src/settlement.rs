//! Pure settlement math and the round lifecycle transition table.
//!
//! Nothing here touches storage; the functions are deterministic over their
//! inputs so the properties can be tested exhaustively. The engine handlers
//! call into this module and stage the resulting writes in a session.

use crashpoint_types::{ResultType, RoundStatus};

/// Outcome of applying a signed percentage to a stake.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundOutcome {
    pub result_type: ResultType,
    /// Signed balance delta in cents: positive for wins, negative for
    /// losses, zero for neutral. Rounded to the nearest cent.
    pub amount_change_cents: i64,
}

/// Compute the outcome of a bet.
///
/// `percentage > 0` wins `stake * percentage / 100`, `percentage < 0` loses
/// the same product, `percentage == 0` is neutral. The product is rounded
/// to the nearest cent.
pub fn round_result(percentage: f64, bet_amount_cents: u64) -> RoundOutcome {
    let product = (bet_amount_cents as f64 * percentage / 100.0).round() as i64;
    if percentage > 0.0 {
        RoundOutcome {
            result_type: ResultType::Win,
            amount_change_cents: product,
        }
    } else if percentage < 0.0 {
        RoundOutcome {
            result_type: ResultType::Loss,
            amount_change_cents: product,
        }
    } else {
        RoundOutcome {
            result_type: ResultType::Neutral,
            amount_change_cents: 0,
        }
    }
}

/// Multiplier recorded on a lazily created slot round: the outcome the
/// client reported, expressed as a payout multiplier, floored at 1.0.
pub fn slot_multiplier(percentage: f64) -> f64 {
    if percentage > 0.0 {
        1.0 + percentage / 100.0
    } else {
        1.0
    }
}

/// Lifecycle transition table: `Waiting -> InProgress -> {Crashed,
/// Completed}`, with `Waiting -> Completed` allowed for lazily settled slot
/// rounds. Terminal states admit nothing.
pub fn can_transition(from: RoundStatus, to: RoundStatus) -> bool {
    use RoundStatus::*;
    matches!(
        (from, to),
        (Waiting, InProgress) | (Waiting, Completed) | (InProgress, Crashed) | (InProgress, Completed)
    )
}
