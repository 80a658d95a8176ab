use serde::{Deserialize, Serialize};

use crate::betting::{ResultType, UserId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerKind {
    /// Stake debit or loss/reversal attached to a bet round.
    BetRound,
    /// Win credit.
    Win,
    /// Balance top-up outside of betting.
    Deposit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerStatus {
    Pending,
    Completed,
}

/// Linkage from a ledger entry back to the bet/round that produced it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bet_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_type: Option<ResultType>,
    /// Set when a round crash reversed a previously credited win.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub crash_reversal: bool,
}

/// One append-only record of a balance-affecting event. Entries are never
/// updated or deleted; a crash reversal appends a new entry rather than
/// touching the original.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: u64,
    pub user: UserId,
    pub kind: LedgerKind,
    pub amount_cents: u64,
    pub status: LedgerStatus,
    pub description: String,
    pub metadata: LedgerMetadata,
    pub created_at_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_serializes_camel_case_and_skips_empty() {
        let metadata = LedgerMetadata {
            bet_id: Some(7),
            round_number: Some(3),
            percentage: None,
            result_type: Some(ResultType::Win),
            crash_reversal: false,
        };
        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["betId"], 7);
        assert_eq!(json["roundNumber"], 3);
        assert_eq!(json["resultType"], "win");
        assert!(json.get("percentage").is_none());
        assert!(json.get("crashReversal").is_none());
    }

    #[test]
    fn test_crash_reversal_flag_serialized_when_set() {
        let metadata = LedgerMetadata {
            crash_reversal: true,
            ..LedgerMetadata::default()
        };
        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["crashReversal"], true);
    }
}
