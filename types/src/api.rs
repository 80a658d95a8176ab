//! Wire-format types for the REST surface.
//!
//! Amounts cross the wire as decimal currency (`f64`); everything internal
//! is integer cents. Field names are camelCase to match the clients.

use serde::{Deserialize, Serialize};

use crate::betting::{
    BetRound, GameRound, ResultType, RoundStatistics, RoundStatus, User, UserId, UserStatus,
};
use crate::ledger::{LedgerEntry, LedgerKind, LedgerMetadata, LedgerStatus};

pub fn cents_to_amount(cents: u64) -> f64 {
    cents as f64 / 100.0
}

pub fn cents_to_signed_amount(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Parse a client-submitted decimal amount into cents. Rejects non-finite,
/// negative, and zero values.
pub fn amount_to_cents(amount: f64) -> Option<u64> {
    if !amount.is_finite() || amount <= 0.0 {
        return None;
    }
    let cents = (amount * 100.0).round();
    if cents < 1.0 || cents > u64::MAX as f64 {
        return None;
    }
    Some(cents as u64)
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

// --- Users -------------------------------------------------------------

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: UserId,
    pub name: String,
    pub status: UserStatus,
    pub balance: f64,
    pub bonus_balance: f64,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            status: user.status,
            balance: cents_to_amount(user.balance_cents),
            bonus_balance: cents_to_amount(user.bonus_balance_cents),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegisterUserResponse {
    pub message: String,
    pub user: UserView,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DepositRequest {
    pub amount: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
    pub balance: f64,
    pub bonus_balance: f64,
}

// --- Bets --------------------------------------------------------------

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceBetRequest {
    pub user_id: UserId,
    #[serde(default)]
    pub game_round_number: Option<u64>,
    pub bet_amount: f64,
    pub percentage: f64,
    #[serde(default)]
    pub game_id: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetRoundView {
    pub id: u64,
    pub round_number: u64,
    pub bet_amount: f64,
    pub percentage: f64,
    pub result_type: ResultType,
    pub amount_change: f64,
    pub balance_before: f64,
    pub balance_after: f64,
    pub placed_at_ms: u64,
}

impl From<&BetRound> for BetRoundView {
    fn from(bet: &BetRound) -> Self {
        Self {
            id: bet.id,
            round_number: bet.round_number,
            bet_amount: cents_to_amount(bet.bet_amount_cents),
            percentage: bet.percentage,
            result_type: bet.result_type,
            amount_change: cents_to_signed_amount(bet.amount_change_cents),
            balance_before: cents_to_amount(bet.balance_before_cents),
            balance_after: cents_to_amount(bet.balance_after_cents),
            placed_at_ms: bet.placed_at_ms,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRoundView {
    pub round_number: u64,
    pub game_id: String,
    pub status: RoundStatus,
    pub multiplier: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crashed_at_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at_ms: Option<u64>,
    pub total_bets: u64,
    pub total_bet_amount: f64,
    pub total_players: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crashed_by: Option<UserId>,
}

impl From<&GameRound> for GameRoundView {
    fn from(round: &GameRound) -> Self {
        Self {
            round_number: round.round_number,
            game_id: round.game_id.clone(),
            status: round.status,
            multiplier: round.multiplier,
            started_at_ms: round.started_at_ms,
            crashed_at_ms: round.crashed_at_ms,
            ended_at_ms: round.ended_at_ms,
            total_bets: round.total_bets,
            total_bet_amount: cents_to_amount(round.total_bet_amount_cents),
            total_players: round.total_players,
            created_by: round.created_by,
            crashed_by: round.crashed_by,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceBetResponse {
    pub message: String,
    pub bet_round: BetRoundView,
    pub game_round: GameRoundView,
    pub balance: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetHistoryResponse {
    pub bets: Vec<BetRoundView>,
    pub total_pages: u64,
    pub current_page: u64,
    pub total: u64,
}

// --- Rounds ------------------------------------------------------------

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartRoundRequest {
    pub admin_id: UserId,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrashRoundRequest {
    pub admin_id: UserId,
    #[serde(default)]
    pub multiplier: Option<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoundResponse {
    pub message: String,
    pub round: GameRoundView,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundStatisticsView {
    pub round_number: u64,
    pub status: RoundStatus,
    pub multiplier: f64,
    pub total_bets: u64,
    pub total_bet_amount: f64,
    pub total_players: u64,
    pub wins: u64,
    pub losses: u64,
    pub total_win_amount: f64,
    pub total_loss_amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crashed_at_ms: Option<u64>,
}

impl From<&RoundStatistics> for RoundStatisticsView {
    fn from(stats: &RoundStatistics) -> Self {
        Self {
            round_number: stats.round_number,
            status: stats.status,
            multiplier: stats.multiplier,
            total_bets: stats.total_bets,
            total_bet_amount: cents_to_amount(stats.total_bet_amount_cents),
            total_players: stats.total_players,
            wins: stats.wins,
            losses: stats.losses,
            total_win_amount: cents_to_amount(stats.total_win_amount_cents),
            total_loss_amount: cents_to_amount(stats.total_loss_amount_cents),
            started_at_ms: stats.started_at_ms,
            ended_at_ms: stats.ended_at_ms,
            crashed_at_ms: stats.crashed_at_ms,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CurrentRoundResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub round: Option<GameRoundView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<RoundStatisticsView>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatisticsResponse {
    pub statistics: RoundStatisticsView,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoundDetailsResponse {
    pub round: GameRoundView,
    pub bets: Vec<BetRoundView>,
    pub statistics: RoundStatisticsView,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentRoundsResponse {
    pub rounds: Vec<GameRoundView>,
    pub total_pages: u64,
    pub current_page: u64,
    pub total: u64,
}

// --- Ledger ------------------------------------------------------------

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntryView {
    pub id: u64,
    pub kind: LedgerKind,
    pub amount: f64,
    pub status: LedgerStatus,
    pub description: String,
    pub metadata: LedgerMetadata,
    pub created_at_ms: u64,
}

impl From<&LedgerEntry> for LedgerEntryView {
    fn from(entry: &LedgerEntry) -> Self {
        Self {
            id: entry.id,
            kind: entry.kind,
            amount: cents_to_amount(entry.amount_cents),
            status: entry.status,
            description: entry.description.clone(),
            metadata: entry.metadata.clone(),
            created_at_ms: entry.created_at_ms,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LedgerResponse {
    pub entries: Vec<LedgerEntryView>,
}
