//! Fixtures for tests, available behind the `mocks` feature.

use anyhow::Result;
use crashpoint_types::{Key, User, UserId, Value};

use crate::state::{Memory, State};

/// An active user with the given main balance.
pub fn user_with_balance(name: &str, balance_cents: u64) -> User {
    let mut user = User::new(name.to_string());
    user.balance_cents = balance_cents;
    user
}

/// Write a user straight into the store, bypassing registration.
pub async fn seed_user(memory: &mut Memory, user: &User) -> Result<()> {
    memory
        .insert(Key::User(user.id), Value::User(user.clone()))
        .await
}

/// Seed a fresh funded user and return their id.
pub async fn seed_funded_user(memory: &mut Memory, balance_cents: u64) -> Result<UserId> {
    let user = user_with_balance("player", balance_cents);
    let id = user.id;
    seed_user(memory, &user).await?;
    Ok(id)
}
