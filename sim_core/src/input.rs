//! Per-frame keyboard state supplied by the host.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Held keys, keyed by lowercase key name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "HashMap<String, bool>", into = "HashMap<String, bool>")]
pub struct KeyState {
    keys: HashMap<String, bool>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A key state with every listed key held.
    pub fn pressed<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = Self::new();
        for key in keys {
            state.set(key.as_ref(), true);
        }
        state
    }

    pub fn set(&mut self, key: &str, down: bool) {
        self.keys.insert(key.to_lowercase(), down);
    }

    pub fn press(&mut self, key: &str) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: &str) {
        self.set(key, false);
    }

    pub fn is_down(&self, key: &str) -> bool {
        self.keys.get(key).copied().unwrap_or(false)
    }
}

impl From<HashMap<String, bool>> for KeyState {
    fn from(keys: HashMap<String, bool>) -> Self {
        Self {
            keys: keys
                .into_iter()
                .map(|(key, down)| (key.to_lowercase(), down))
                .collect(),
        }
    }
}

impl From<KeyState> for HashMap<String, bool> {
    fn from(state: KeyState) -> Self {
        state.keys
    }
}
