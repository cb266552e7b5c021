use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type UserId = u64;

/// A stored user record.
///
/// Only `id` is typed. Every other key a client sends (`name`, `email`, or
/// anything else) is kept verbatim in `fields` and flattened back out on
/// serialization, so the wire shape is `{ "id": 1, "name": ..., ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl User {
    /// Build a record from a client payload. A payload `id` never wins over
    /// the one assigned by the store.
    pub fn from_payload(id: UserId, payload: Map<String, Value>) -> Self {
        let fields = payload.into_iter().filter(|(k, _)| k != "id").collect();
        Self { id, fields }
    }
}

/// How the store picks the id of an inserted record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdPolicy {
    /// `len + 1` at insertion time. After a delete this can hand out an id
    /// that is still held by a live record.
    #[default]
    Count,
    /// One past the highest id ever issued. Ids are never reused.
    Sequential,
}

/// The ordered record collection guarded by [`UserStore`].
#[derive(Debug, Default)]
pub struct Users {
    records: Vec<User>,
    policy: IdPolicy,
    high_water: UserId,
}

impl Users {
    /// Seed records keep their ids. A duplicated seed id is dropped so the
    /// uniqueness invariant holds from the start.
    pub fn with_seed(policy: IdPolicy, seed: Vec<User>) -> Self {
        let mut users = Self {
            records: Vec::with_capacity(seed.len()),
            policy,
            high_water: 0,
        };

        for user in seed {
            if users.position(user.id).is_some() {
                tracing::warn!(id = user.id, "Duplicate seed id, skipping record");
                continue;
            }
            users.high_water = users.high_water.max(user.id);
            users.records.push(user);
        }

        users
    }

    pub fn policy(&self) -> IdPolicy {
        self.policy
    }

    pub fn records(&self) -> &[User] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn position(&self, id: UserId) -> Option<usize> {
        self.records.iter().position(|u| u.id == id)
    }

    /// Reserve the id for the next insert.
    pub fn next_id(&mut self) -> UserId {
        let id = match self.policy {
            IdPolicy::Count => self.records.len() as UserId + 1,
            IdPolicy::Sequential => self.high_water + 1,
        };
        self.high_water = self.high_water.max(id);
        id
    }

    pub fn push(&mut self, user: User) {
        self.records.push(user);
    }

    /// Overwrite the record at `index` without moving it.
    pub fn replace_at(&mut self, index: usize, user: User) {
        self.records[index] = user;
    }

    /// Drop every record holding `id` and return how many went away.
    pub fn remove_all(&mut self, id: UserId) -> usize {
        let before = self.records.len();
        self.records.retain(|u| u.id != id);
        before - self.records.len()
    }
}

/// Shared store type handed to the router as state.
pub type UserStore = Arc<RwLock<Users>>;

pub fn new_store(policy: IdPolicy, seed: Vec<User>) -> UserStore {
    Arc::new(RwLock::new(Users::with_seed(policy, seed)))
}

// A panic while holding the lock cannot leave `Users` half-updated: every
// mutation is a single Vec call.
pub fn read(store: &UserStore) -> RwLockReadGuard<'_, Users> {
    store.read().unwrap_or_else(PoisonError::into_inner)
}

pub fn write(store: &UserStore) -> RwLockWriteGuard<'_, Users> {
    store.write().unwrap_or_else(PoisonError::into_inner)
}

/// Normalize a path identifier to a [`UserId`].
///
/// Accepts any numeric spelling of a non-negative integer (`"1"`, `" 01"`,
/// `"1.0"`, `"1e0"`). Hex and octal spellings (`"0x1"`, `"0o1"`) are
/// rejected. Anything else yields `None` and can match no record.
pub fn parse_id(raw: &str) -> Option<UserId> {
    let raw = raw.trim();
    if let Ok(id) = raw.parse::<UserId>() {
        return Some(id);
    }

    let n = raw.parse::<f64>().ok()?;
    if n.is_finite() && n >= 0.0 && n.fract() == 0.0 && n <= UserId::MAX as f64 {
        Some(n as UserId)
    } else {
        None
    }
}
