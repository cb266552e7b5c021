use serde_json::{Map, Value};

use crate::errors::UserError;
use crate::state::users::{self, parse_id, User, UserStore};

/// Return every record in insertion order.
pub fn list(store: &UserStore) -> Vec<User> {
    users::read(store).records().to_vec()
}

/// Return the first record whose id matches `raw_id`.
pub fn get(store: &UserStore, raw_id: &str) -> Result<User, UserError> {
    let users = users::read(store);

    parse_id(raw_id)
        .and_then(|id| users.position(id))
        .map(|idx| users.records()[idx].clone())
        .ok_or_else(|| UserError::NotFound(raw_id.to_string()))
}

/// Append a new record built from `payload` and return it.
pub fn insert(store: &UserStore, payload: Map<String, Value>) -> User {
    let mut users = users::write(store);

    let id = users.next_id();
    let user = User::from_payload(id, payload);
    users.push(user.clone());

    tracing::debug!(id, total = users.len(), "User created");
    user
}

/// Fully replace the record matching `raw_id`. Fields absent from `payload`
/// are gone afterwards.
pub fn replace(
    store: &UserStore,
    raw_id: &str,
    payload: Map<String, Value>,
) -> Result<User, UserError> {
    let mut users = users::write(store);

    let (id, idx) = parse_id(raw_id)
        .and_then(|id| users.position(id).map(|idx| (id, idx)))
        .ok_or_else(|| UserError::NotFound(raw_id.to_string()))?;

    let user = User::from_payload(id, payload);
    users.replace_at(idx, user.clone());

    tracing::debug!(id, "User replaced");
    Ok(user)
}

/// Remove every record matching `raw_id`. Returns the removed count; zero is
/// not an error.
pub fn delete(store: &UserStore, raw_id: &str) -> usize {
    let Some(id) = parse_id(raw_id) else {
        return 0;
    };

    let mut users = users::write(store);
    let removed = users.remove_all(id);

    if removed > 0 {
        tracing::debug!(id, remaining = users.len(), "User deleted");
    }
    removed
}
