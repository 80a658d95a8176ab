use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;
use uuid::Uuid;

/// Minimum stake per bet, in cents (1 unit).
pub const MIN_BET_AMOUNT_CENTS: u64 = 100;

/// Game identifiers that place bets against lazily created slot rounds.
pub const SLOT_GAME_IDS: [&str; 5] = [
    "sweet-bonanza",
    "sweet-bonanza-1000",
    "burning-hot",
    "mines",
    "plinko",
];

/// Game identifier for admin-driven rounds.
pub const DEFAULT_GAME_ID: &str = "crash";

/// Whether a game identifier refers to a slot game (substring match, the
/// clients send ids like `sweet-bonanza-1000:spin`).
pub fn is_slot_game(game_id: &str) -> bool {
    SLOT_GAME_IDS.iter().any(|id| game_id.contains(id))
}

#[derive(Debug, ThisError, PartialEq)]
pub enum RoundInvariantError {
    #[error("multiplier must be at least 1.0 (got={got})")]
    MultiplierBelowOne { got: f64 },
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Suspended,
    Banned,
}

/// A user's spendable balances. Mutated only by the settlement engine and
/// only inside an atomic session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub status: UserStatus,
    pub balance_cents: u64,
    pub bonus_balance_cents: u64,
}

impl User {
    pub fn new(name: String) -> Self {
        Self {
            id: UserId::generate(),
            name,
            status: UserStatus::Active,
            balance_cents: 0,
            bonus_balance_cents: 0,
        }
    }

    /// Combined spendable balance used for stake sufficiency checks.
    pub fn total_balance_cents(&self) -> u64 {
        self.balance_cents.saturating_add(self.bonus_balance_cents)
    }

    /// Apply a signed delta to the main balance, clamped at zero. Returns
    /// the (before, after) snapshot pair.
    pub fn apply_delta(&mut self, delta_cents: i64) -> (u64, u64) {
        let before = self.balance_cents;
        self.balance_cents = if delta_cents >= 0 {
            before.saturating_add(delta_cents as u64)
        } else {
            before.saturating_sub(delta_cents.unsigned_abs())
        };
        (before, self.balance_cents)
    }
}

/// Round lifecycle: `Waiting -> InProgress -> {Crashed, Completed}`, the
/// last two terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundStatus {
    Waiting,
    InProgress,
    Crashed,
    Completed,
}

impl RoundStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::InProgress => "in-progress",
            Self::Crashed => "crashed",
            Self::Completed => "completed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Crashed | Self::Completed)
    }
}

impl std::fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RoundStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "waiting" => Ok(Self::Waiting),
            "in-progress" => Ok(Self::InProgress),
            "crashed" => Ok(Self::Crashed),
            "completed" => Ok(Self::Completed),
            _ => Err(()),
        }
    }
}

/// One discrete betting round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameRound {
    pub round_number: u64,
    pub game_id: String,
    pub status: RoundStatus,
    pub multiplier: f64,
    pub started_at_ms: Option<u64>,
    pub crashed_at_ms: Option<u64>,
    pub ended_at_ms: Option<u64>,
    pub total_bets: u64,
    pub total_bet_amount_cents: u64,
    pub total_players: u64,
    pub created_by: Option<UserId>,
    pub crashed_by: Option<UserId>,
}

impl GameRound {
    /// A fresh admin-started round, immediately in progress.
    pub fn started(round_number: u64, admin: UserId, now_ms: u64) -> Self {
        Self {
            round_number,
            game_id: DEFAULT_GAME_ID.to_string(),
            status: RoundStatus::InProgress,
            multiplier: 1.0,
            started_at_ms: Some(now_ms),
            crashed_at_ms: None,
            ended_at_ms: None,
            total_bets: 0,
            total_bet_amount_cents: 0,
            total_players: 0,
            created_by: Some(admin),
            crashed_by: None,
        }
    }

    /// A lazily created slot round, settled the moment it exists.
    pub fn completed_slot(round_number: u64, game_id: String, multiplier: f64, now_ms: u64) -> Self {
        Self {
            round_number,
            game_id,
            status: RoundStatus::Completed,
            multiplier,
            started_at_ms: Some(now_ms),
            crashed_at_ms: None,
            ended_at_ms: Some(now_ms),
            total_bets: 0,
            total_bet_amount_cents: 0,
            total_players: 0,
            created_by: None,
            crashed_by: None,
        }
    }

    pub fn validate(&self) -> Result<(), RoundInvariantError> {
        if self.multiplier < 1.0 {
            return Err(RoundInvariantError::MultiplierBelowOne {
                got: self.multiplier,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    Win,
    Loss,
    Neutral,
}

impl ResultType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Win => "win",
            Self::Loss => "loss",
            Self::Neutral => "neutral",
        }
    }
}

impl std::str::FromStr for ResultType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "win" => Ok(Self::Win),
            "loss" => Ok(Self::Loss),
            "neutral" => Ok(Self::Neutral),
            _ => Err(()),
        }
    }
}

/// One user's wager against a round. Immutable once written, except that a
/// round crash retroactively flips `Win`/`Neutral` bets to `Loss`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BetRound {
    pub id: u64,
    pub user: UserId,
    pub round_number: u64,
    pub bet_amount_cents: u64,
    pub percentage: f64,
    pub result_type: ResultType,
    pub amount_change_cents: i64,
    pub balance_before_cents: u64,
    pub balance_after_cents: u64,
    pub placed_at_ms: u64,
}

/// Aggregate view of a round, recomputed from its bet records.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RoundStatistics {
    pub round_number: u64,
    pub status: RoundStatus,
    pub multiplier: f64,
    pub total_bets: u64,
    pub total_bet_amount_cents: u64,
    pub total_players: u64,
    pub wins: u64,
    pub losses: u64,
    pub total_win_amount_cents: u64,
    pub total_loss_amount_cents: u64,
    pub started_at_ms: Option<u64>,
    pub ended_at_ms: Option<u64>,
    pub crashed_at_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_delta_clamps_at_zero() {
        let mut user = User::new("alice".to_string());
        user.balance_cents = 500;

        let (before, after) = user.apply_delta(-700);
        assert_eq!(before, 500);
        assert_eq!(after, 0);
        assert_eq!(user.balance_cents, 0);

        let (before, after) = user.apply_delta(250);
        assert_eq!(before, 0);
        assert_eq!(after, 250);
    }

    #[test]
    fn test_total_balance_includes_bonus() {
        let mut user = User::new("bob".to_string());
        user.balance_cents = 100;
        user.bonus_balance_cents = 50;
        assert_eq!(user.total_balance_cents(), 150);
    }

    #[test]
    fn test_slot_game_matching() {
        assert!(is_slot_game("sweet-bonanza"));
        assert!(is_slot_game("sweet-bonanza-1000:spin-17"));
        assert!(is_slot_game("plinko"));
        assert!(!is_slot_game("crash"));
        assert!(!is_slot_game("roulette"));
    }

    #[test]
    fn test_round_status_round_trips_as_str() {
        for status in [
            RoundStatus::Waiting,
            RoundStatus::InProgress,
            RoundStatus::Crashed,
            RoundStatus::Completed,
        ] {
            assert_eq!(status.as_str().parse::<RoundStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_round_status_serde_uses_kebab_case() {
        let json = serde_json::to_string(&RoundStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
    }

    #[test]
    fn test_round_validate_rejects_sub_one_multiplier() {
        let mut round = GameRound::started(1, UserId::generate(), 0);
        assert!(round.validate().is_ok());
        round.multiplier = 0.5;
        assert_eq!(
            round.validate(),
            Err(RoundInvariantError::MultiplierBelowOne { got: 0.5 })
        );
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(RoundStatus::Crashed.is_terminal());
        assert!(RoundStatus::Completed.is_terminal());
        assert!(!RoundStatus::InProgress.is_terminal());
        assert!(!RoundStatus::Waiting.is_terminal());
    }
}
