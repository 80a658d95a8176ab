use anyhow::Result;
use crashpoint_types::{Key, Value};
use std::{collections::HashMap, future::Future};

/// Buffered write against a key.
#[derive(Clone, Debug, PartialEq)]
#[allow(clippy::large_enum_variant)]
pub enum Status {
    Update(Value),
    Delete,
}

/// Backing store for the settlement engine.
///
/// A store only needs point reads and writes; every multi-step mutation is
/// staged in a [`crate::Ledger`] session and lands through one `apply` call,
/// which is the all-or-nothing commit boundary.
pub trait State {
    fn get(&self, key: &Key) -> impl Future<Output = Result<Option<Value>>>;
    fn insert(&mut self, key: Key, value: Value) -> impl Future<Output = Result<()>>;
    fn delete(&mut self, key: &Key) -> impl Future<Output = Result<()>>;

    fn apply(&mut self, changes: Vec<(Key, Status)>) -> impl Future<Output = Result<()>> {
        async {
            for (key, status) in changes {
                match status {
                    Status::Update(value) => self.insert(key, value).await?,
                    Status::Delete => self.delete(&key).await?,
                }
            }
            Ok(())
        }
    }
}

/// In-memory store. The service holds one of these behind a mutex; the
/// `State` seam is what a durable backend would implement instead.
#[derive(Default)]
pub struct Memory {
    state: HashMap<Key, Value>,
}

impl State for Memory {
    async fn get(&self, key: &Key) -> Result<Option<Value>> {
        Ok(self.state.get(key).cloned())
    }

    async fn insert(&mut self, key: Key, value: Value) -> Result<()> {
        self.state.insert(key, value);
        Ok(())
    }

    async fn delete(&mut self, key: &Key) -> Result<()> {
        self.state.remove(key);
        Ok(())
    }
}
