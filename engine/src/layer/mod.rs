use anyhow::Result;
use crashpoint_types::{
    GameRound, Key, LedgerEntry, LedgerKind, LedgerMetadata, LedgerStatus, User, UserId, Value,
};
use std::collections::BTreeMap;

use crate::error::LedgerError;
use crate::state::{State, Status};

pub(crate) mod handlers;

pub use handlers::betting::BetPlaced;

/// One atomic settlement session over a backing store.
///
/// Writes are staged in `pending`; reads observe staged writes first, then
/// the backing store. `commit()` surrenders the change set for a single
/// `State::apply`, which is the transaction boundary: dropping a session
/// instead of committing leaves the store untouched.
pub struct Ledger<'a, S: State> {
    state: &'a S,
    pending: BTreeMap<Key, Status>,
    now_ms: u64,
}

impl<'a, S: State> Ledger<'a, S> {
    pub fn new(state: &'a S, now_ms: u64) -> Self {
        Self {
            state,
            pending: BTreeMap::new(),
            now_ms,
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn insert(&mut self, key: Key, value: Value) {
        self.pending.insert(key, Status::Update(value));
    }

    fn remove(&mut self, key: Key) {
        self.pending.insert(key, Status::Delete);
    }

    pub fn commit(self) -> Vec<(Key, Status)> {
        self.pending.into_iter().collect()
    }

    // --- Shared lookups -------------------------------------------------

    pub(crate) async fn load_user(&self, id: &UserId) -> Result<Option<User>> {
        Ok(match self.get(&Key::User(*id)).await? {
            Some(Value::User(user)) => Some(user),
            _ => None,
        })
    }

    pub(crate) async fn user_or_error(&self, id: &UserId) -> Result<User, LedgerError> {
        self.load_user(id).await?.ok_or(LedgerError::UserNotFound)
    }

    pub(crate) async fn load_round(&self, round_number: u64) -> Result<Option<GameRound>> {
        Ok(match self.get(&Key::Round(round_number)).await? {
            Some(Value::Round(round)) => Some(round),
            _ => None,
        })
    }

    pub(crate) async fn round_or_error(
        &self,
        round_number: u64,
    ) -> Result<GameRound, LedgerError> {
        self.load_round(round_number)
            .await?
            .ok_or(LedgerError::RoundNotFound)
    }

    /// Round number named by the singleton active-round marker, if set.
    pub(crate) async fn active_round_number(&self) -> Result<Option<u64>> {
        Ok(match self.get(&Key::ActiveRound).await? {
            Some(Value::RoundNumber(number)) => Some(number),
            _ => None,
        })
    }

    /// Allocate the next value of a store sequence (first allocation is 1).
    pub(crate) async fn next_sequence(&mut self, key: Key) -> Result<u64> {
        let current = match self.get(&key).await? {
            Some(Value::Sequence(value)) => value,
            _ => 0,
        };
        let next = current.saturating_add(1);
        self.insert(key, Value::Sequence(next));
        Ok(next)
    }

    pub(crate) async fn ids(&self, key: &Key) -> Result<Vec<u64>> {
        Ok(match self.get(key).await? {
            Some(Value::Ids(ids)) => ids,
            _ => Vec::new(),
        })
    }

    pub(crate) async fn push_id(&mut self, key: Key, id: u64) -> Result<()> {
        let mut ids = self.ids(&key).await?;
        ids.push(id);
        self.insert(key, Value::Ids(ids));
        Ok(())
    }

    /// Apply a signed delta to a user's main balance, clamped at zero.
    /// Returns the (before, after) snapshot pair.
    pub(crate) async fn update_balance(
        &mut self,
        user_id: &UserId,
        delta_cents: i64,
    ) -> Result<(u64, u64), LedgerError> {
        let mut user = self.user_or_error(user_id).await?;
        let snapshot = user.apply_delta(delta_cents);
        self.insert(Key::User(*user_id), Value::User(user));
        Ok(snapshot)
    }

    /// Append one entry to the transaction log. Entries are never rewritten;
    /// this is the only way balance-affecting events reach the ledger.
    pub(crate) async fn append_ledger_entry(
        &mut self,
        user: UserId,
        kind: LedgerKind,
        amount_cents: u64,
        description: String,
        metadata: LedgerMetadata,
    ) -> Result<u64> {
        let id = self.next_sequence(Key::LedgerSequence).await?;
        let entry = LedgerEntry {
            id,
            user,
            kind,
            amount_cents,
            status: LedgerStatus::Completed,
            description,
            metadata,
            created_at_ms: self.now_ms,
        };
        self.insert(Key::LedgerEntry(id), Value::LedgerEntry(entry));
        self.push_id(Key::UserLedger(user), id).await?;
        Ok(id)
    }
}

impl<'a, S: State> State for Ledger<'a, S> {
    async fn get(&self, key: &Key) -> Result<Option<Value>> {
        Ok(match self.pending.get(key) {
            Some(Status::Update(value)) => Some(value.clone()),
            Some(Status::Delete) => None,
            None => self.state.get(key).await?,
        })
    }

    async fn insert(&mut self, key: Key, value: Value) -> Result<()> {
        self.pending.insert(key, Status::Update(value));
        Ok(())
    }

    async fn delete(&mut self, key: &Key) -> Result<()> {
        self.pending.insert(key.clone(), Status::Delete);
        Ok(())
    }
}
