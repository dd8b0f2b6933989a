// Author: Dustin Pilgrim
// License: MIT

use std::sync::{Arc, Mutex, MutexGuard};

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use tracing::trace;

use crate::{ConfigError, Value};

static GLOBAL_STORE: Lazy<Arc<VariableStore>> = Lazy::new(|| Arc::new(VariableStore::new()));

/// Named variables written by `!store` and read by `!load`.
///
/// One store is shared by every document resolved against it, includes
/// and later top-level loads alike. Writes are visible to every later read
/// and the last write for a key wins. Nothing clears the store on its own:
/// the process-wide instance lives as long as the process, so tests that
/// need isolation either build their own store or call [`reset`].
///
/// Every access goes through one mutex. Loading independent documents in
/// parallel is memory safe, but store-before-load ordering across those
/// documents is then up to the caller.
///
/// [`reset`]: VariableStore::reset
#[derive(Debug, Default)]
pub struct VariableStore {
    vars: Mutex<IndexMap<String, Value>>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide store used by loaders that are not given one.
    pub fn global() -> Arc<VariableStore> {
        Arc::clone(&GLOBAL_STORE)
    }

    fn vars(&self) -> MutexGuard<'_, IndexMap<String, Value>> {
        // A panic while holding the lock cannot leave the map half-written.
        self.vars.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Overwrite `key` unconditionally.
    pub fn set(&self, key: impl Into<String>, value: Value) {
        let key = key.into();
        trace!("store {} = {}", key, value);
        self.vars().insert(key, value);
    }

    /// Read `key`, failing if it was never set.
    pub fn get(&self, key: &str) -> Result<Value, ConfigError> {
        self.vars()
            .get(key)
            .cloned()
            .ok_or_else(|| ConfigError::UndefinedVariable {
                name: key.to_string(),
            })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.vars().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.vars().len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars().is_empty()
    }

    /// Keys in first-write order.
    pub fn keys(&self) -> Vec<String> {
        self.vars().keys().cloned().collect()
    }

    /// A copy of every variable in first-write order.
    pub fn snapshot(&self) -> IndexMap<String, Value> {
        self.vars().clone()
    }

    /// Forget every variable.
    pub fn reset(&self) {
        self.vars().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_before_set_fails() {
        let store = VariableStore::new();
        match store.get("missing") {
            Err(ConfigError::UndefinedVariable { name }) => assert_eq!(name, "missing"),
            other => panic!("Expected UndefinedVariable, got {:?}", other),
        }
    }

    #[test]
    fn test_last_write_wins() {
        let store = VariableStore::new();
        store.set("lr", Value::Float(0.1));
        store.set("lr", Value::Float(0.01));
        assert_eq!(store.get("lr").unwrap(), Value::Float(0.01));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_same_write_twice_is_stable() {
        let store = VariableStore::new();
        store.set("a", Value::Integer(2));
        let first = store.snapshot();
        store.set("a", Value::Integer(2));
        assert_eq!(store.snapshot(), first);
    }

    #[test]
    fn test_reset_clears() {
        let store = VariableStore::new();
        store.set("a", Value::Integer(1));
        store.set("b", Value::Integer(2));
        assert_eq!(store.keys(), vec!["a", "b"]);
        store.reset();
        assert!(store.is_empty());
        assert!(!store.contains("a"));
    }

    #[test]
    fn test_global_is_shared() {
        let a = VariableStore::global();
        let b = VariableStore::global();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_parallel_writers() {
        let store = Arc::new(VariableStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.set(format!("k{}", i), Value::Integer(i)))
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(store.len(), 8);
        assert_eq!(store.get("k3").unwrap(), Value::Integer(3));
    }
}
