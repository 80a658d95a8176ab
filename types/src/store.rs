use crate::betting::{BetRound, GameRound, User, UserId};
use crate::ledger::LedgerEntry;

/// Store schema keys. Everything the engine persists lives under one of
/// these; sessions buffer writes keyed by `Key` before an atomic apply.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    User(UserId),
    /// Round by its unique, monotonically increasing number.
    Round(u64),
    /// Index from a slot game's client round reference to the allocated
    /// round number, so repeat bets reuse the lazily created round.
    SlotRound(String, u64),
    /// Singleton marker naming the one in-progress round. The "at most one
    /// active round" invariant is this key existing or not.
    ActiveRound,
    /// Bet ids recorded against a round, oldest first.
    RoundBets(u64),
    /// Bet ids recorded for a user, oldest first.
    UserBets(UserId),
    Bet(u64),
    LedgerEntry(u64),
    /// Ledger entry ids for a user, oldest first.
    UserLedger(UserId),
    RoundSequence,
    BetSequence,
    LedgerSequence,
}

#[derive(Clone, Debug, PartialEq)]
#[allow(clippy::large_enum_variant)]
pub enum Value {
    User(User),
    Round(GameRound),
    Bet(BetRound),
    LedgerEntry(LedgerEntry),
    Ids(Vec<u64>),
    RoundNumber(u64),
    Sequence(u64),
}
