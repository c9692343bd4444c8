//! Shared handle to an insertion-ordered mapping

use indexmap::IndexMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::Value;

/// A shared, insertion-order-preserving map from string keys to values.
///
/// Cloning a `MapRef` clones the handle, not the entries: every clone
/// reads and writes the same underlying map. Nested proxies rely on this
/// aliasing to reflect inner mutations on the mapping the parent stores.
///
/// Insertion order is preserved (via `IndexMap`) so a mapping survives a
/// round trip through the proxy in its original key order.
#[derive(Clone, Default)]
pub struct MapRef(Arc<RwLock<IndexMap<String, Value>>>);

impl MapRef {
    /// Create a new empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a handle around existing entries.
    pub fn from_entries(entries: IndexMap<String, Value>) -> Self {
        Self(Arc::new(RwLock::new(entries)))
    }

    /// Build a handle from key/value pairs, preserving their order.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self::from_entries(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    // A poisoned lock still holds valid map data; recover the guard.
    fn read(&self) -> RwLockReadGuard<'_, IndexMap<String, Value>> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, IndexMap<String, Value>> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up a key, cloning the stored value.
    ///
    /// Compound values clone as handles, so the result still aliases the
    /// stored contents.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.read().get(key).cloned()
    }

    /// Insert or overwrite a key. Returns the previous value, if any.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.write().insert(key.into(), value.into())
    }

    /// Remove a key, keeping the order of the remaining entries.
    ///
    /// Removing an absent key is a no-op returning `None`.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.write().shift_remove(key)
    }

    /// Check whether a key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.read().contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Check whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    /// Snapshot of the entries in insertion order.
    ///
    /// The snapshot's compound values still alias the shared contents;
    /// use [`MapRef::deep_clone`] for a detached copy.
    pub fn entries(&self) -> IndexMap<String, Value> {
        self.read().clone()
    }

    /// Merge key/value pairs into the map, overwriting same-named keys.
    pub fn extend<K, V>(&self, pairs: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let mut guard = self.write();
        for (k, v) in pairs {
            guard.insert(k.into(), v.into());
        }
    }

    /// Check whether two handles refer to the same underlying map.
    pub fn ptr_eq(&self, other: &MapRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Recursively copy the map, detaching it from every shared handle.
    pub fn deep_clone(&self) -> MapRef {
        let entries = self
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.deep_clone()))
            .collect();
        MapRef::from_entries(entries)
    }
}

impl PartialEq for MapRef {
    fn eq(&self, other: &Self) -> bool {
        // Same handle means same entries, and avoids re-entrant locking.
        if self.ptr_eq(other) {
            return true;
        }
        *self.read() == *other.read()
    }
}

impl From<IndexMap<String, Value>> for MapRef {
    fn from(entries: IndexMap<String, Value>) -> Self {
        MapRef::from_entries(entries)
    }
}

impl FromIterator<(String, Value)> for MapRef {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        MapRef::from_entries(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let map = MapRef::new();
        assert!(map.is_empty());

        map.insert("a", Value::Int(1));
        assert_eq!(map.get("a"), Some(Value::Int(1)));
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("a"));
        assert!(!map.contains_key("b"));
    }

    #[test]
    fn test_insert_returns_previous() {
        let map = MapRef::new();
        assert_eq!(map.insert("a", Value::Int(1)), None);
        assert_eq!(map.insert("a", Value::Int(2)), Some(Value::Int(1)));
    }

    #[test]
    fn test_remove_preserves_order() {
        let map = MapRef::from_pairs([("a", 1i64), ("b", 2i64), ("c", 3i64)]);
        assert_eq!(map.remove("a"), Some(Value::Int(1)));
        assert_eq!(map.keys(), vec!["b".to_string(), "c".to_string()]);
        assert_eq!(map.remove("a"), None);
    }

    #[test]
    fn test_clone_aliases_entries() {
        let map = MapRef::new();
        let alias = map.clone();
        alias.insert("x", Value::Bool(true));

        assert!(map.ptr_eq(&alias));
        assert_eq!(map.get("x"), Some(Value::Bool(true)));
    }

    #[test]
    fn test_deep_clone_detaches() {
        let inner = MapRef::from_pairs([("n", 1i64)]);
        let map = MapRef::from_pairs([("inner", Value::Map(inner.clone()))]);

        let copy = map.deep_clone();
        assert!(!copy.ptr_eq(&map));
        assert_eq!(copy, map);

        inner.insert("n", Value::Int(2));
        assert_ne!(copy, map);
    }

    #[test]
    fn test_extend_overwrites() {
        let map = MapRef::from_pairs([("a", 1i64)]);
        map.extend([("a", Value::Int(10)), ("b", Value::Int(2))]);

        assert_eq!(map.get("a"), Some(Value::Int(10)));
        assert_eq!(map.get("b"), Some(Value::Int(2)));
    }

    #[test]
    fn test_equality_by_entries() {
        let a = MapRef::from_pairs([("k", 1i64)]);
        let b = MapRef::from_pairs([("k", 1i64)]);

        assert!(!a.ptr_eq(&b));
        assert_eq!(a, b);

        b.insert("k", Value::Int(2));
        assert_ne!(a, b);
    }
}
