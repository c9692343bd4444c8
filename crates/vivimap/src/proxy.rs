//! Attribute-style access over a shared mapping
//!
//! [`Proxy`] wraps a store mapping and a defaults mapping and resolves
//! attribute reads through them: the store first, the defaults second,
//! and on a full miss the key is materialized in the store with a
//! sentinel value (auto-vivification). Reads of stored mappings come
//! back wrapped as a fresh proxy sharing the same defaults, so dotted
//! paths can be walked to arbitrary depth.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

use crate::error::{type_name, Result, VivimapError};
use crate::value::{MapRef, Value};

/// Sentinel stored when a read misses both the store and the defaults.
pub const MISS_SENTINEL: i64 = 100;

// Attribute names that address the proxy's own fields, not store entries.
const RESERVED: [&str; 2] = ["store", "defaults"];

/// The result of an attribute read.
///
/// Mappings stored in a proxy come back as [`Attr::Nested`] so that
/// attribute resolution can keep going; everything else comes back as
/// [`Attr::Value`]. Defaults are never wrapped, even when they are
/// mappings.
#[derive(Clone, Debug, PartialEq)]
pub enum Attr {
    /// A plain value read from the store or the defaults
    Value(Value),

    /// A stored nested mapping, wrapped for further attribute access
    Nested(Proxy),
}

impl Attr {
    /// The plain value, if the read did not hit a stored mapping.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Attr::Value(v) => Some(v),
            Attr::Nested(_) => None,
        }
    }

    /// The nested proxy, if the read hit a stored mapping.
    pub fn nested(&self) -> Option<&Proxy> {
        match self {
            Attr::Nested(p) => Some(p),
            Attr::Value(_) => None,
        }
    }

    /// Consume into the plain value, if any.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Attr::Value(v) => Some(v),
            Attr::Nested(_) => None,
        }
    }

    /// Consume into the nested proxy, if any.
    pub fn into_nested(self) -> Option<Proxy> {
        match self {
            Attr::Nested(p) => Some(p),
            Attr::Value(_) => None,
        }
    }

    /// Check whether the read hit a stored mapping.
    pub fn is_nested(&self) -> bool {
        matches!(self, Attr::Nested(_))
    }

    /// Extract a boolean, if the read produced one.
    pub fn as_bool(&self) -> Option<bool> {
        self.value().and_then(Value::as_bool)
    }

    /// Extract an integer, if the read produced one.
    pub fn as_i64(&self) -> Option<i64> {
        self.value().and_then(Value::as_i64)
    }

    /// Extract a float (integers widen), if the read produced one.
    pub fn as_f64(&self) -> Option<f64> {
        self.value().and_then(Value::as_f64)
    }

    /// Extract a string slice, if the read produced one.
    pub fn as_str(&self) -> Option<&str> {
        self.value().and_then(Value::as_str)
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attr::Value(v) => fmt::Display::fmt(v, f),
            Attr::Nested(p) => fmt::Display::fmt(p, f),
        }
    }
}

/// Attribute-path proxy over a shared mapping with fallback defaults.
///
/// A proxy holds two mappings: the `store` backing its current values
/// and the read-only `defaults` consulted when the store misses a key.
/// The store is a shared handle, so a proxy built with [`Proxy::from_map`]
/// writes straight into the mapping the caller passed in.
///
/// # Example
///
/// ```
/// use vivimap::{MapRef, Proxy, Value};
///
/// let system = MapRef::from_pairs([("size", Value::Float(10.7))]);
/// let map = MapRef::from_pairs([
///     ("id", Value::string("1")),
///     ("metadata", Value::Map(MapRef::from_pairs([("system", Value::Map(system))]))),
/// ]);
///
/// let data = Proxy::from_map(map);
/// let system = data
///     .get("metadata").into_nested().unwrap()
///     .get("system").into_nested().unwrap();
/// assert_eq!(system.get("size").as_f64(), Some(10.7));
/// ```
#[derive(Clone)]
pub struct Proxy {
    /// Live mapping backing the proxy's current values
    store: MapRef,

    /// Fallback mapping consulted when the store misses a key
    defaults: MapRef,
}

impl Default for Proxy {
    fn default() -> Self {
        Self::new()
    }
}

impl Proxy {
    /// Create a proxy over an empty store with empty defaults.
    pub fn new() -> Self {
        Self {
            store: MapRef::new(),
            defaults: MapRef::new(),
        }
    }

    /// Merge a named field into the store (builder pattern).
    ///
    /// Same-named keys already present are overwritten.
    pub fn with_field(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.store.insert(name, value);
        self
    }

    /// Install the defaults mapping consulted when the store misses a
    /// key (builder pattern).
    pub fn with_defaults(mut self, defaults: MapRef) -> Self {
        self.defaults = defaults;
        self
    }

    /// Adapt an existing mapping.
    ///
    /// The proxy's store is the same shared handle, not a defensive
    /// copy: mutations through the proxy mutate the mapping the caller
    /// holds, and vice versa.
    pub fn from_map(map: MapRef) -> Self {
        Self {
            store: map,
            defaults: MapRef::new(),
        }
    }

    /// Adapt an existing mapping with a defaults mapping.
    pub fn from_map_with_defaults(map: MapRef, defaults: MapRef) -> Self {
        Self {
            store: map,
            defaults,
        }
    }

    /// Adapt a parsed JSON document.
    ///
    /// # Errors
    ///
    /// Returns `TypeError` if the document is not an object.
    pub fn from_json(json: serde_json::Value) -> Result<Self> {
        match Value::from(json) {
            Value::Map(map) => Ok(Self::from_map(map)),
            other => Err(VivimapError::TypeError {
                expected: "mapping".to_string(),
                got: type_name(&other).to_string(),
            }),
        }
    }

    /// Parse a JSON document into a proxy.
    ///
    /// # Errors
    ///
    /// Returns `ValueError` if the text is not valid JSON, `TypeError`
    /// if the document is not an object.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let json: serde_json::Value =
            serde_json::from_str(text).map_err(|e| VivimapError::ValueError(e.to_string()))?;
        Self::from_json(json)
    }

    /// The live store handle.
    ///
    /// Reflects all prior and future mutations made through the proxy;
    /// this is a handle to the backing mapping, not a copy of it.
    pub fn to_map(&self) -> MapRef {
        self.store.clone()
    }

    /// The defaults handle. The proxy itself never writes through it.
    pub fn defaults(&self) -> MapRef {
        self.defaults.clone()
    }

    /// Render the store as a JSON document.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::from(&Value::Map(self.store.clone()))
    }

    /// Resolve an attribute: store first, then defaults, then
    /// auto-vivification.
    ///
    /// Stored mappings come back as [`Attr::Nested`], sharing this
    /// proxy's defaults. Defaults come back unwrapped, even when they
    /// are mappings. A full miss inserts [`MISS_SENTINEL`] under `name`
    /// in the store and returns a diagnostic string, so the first read
    /// of a missing key yields a string and every later read yields the
    /// integer. That asymmetry is part of the contract; callers wanting
    /// the mutation visible in the signature use
    /// [`Proxy::get_or_insert`].
    pub fn get(&self, name: &str) -> Attr {
        let (was_present, attr) = self.get_or_insert(name, Value::Int(MISS_SENTINEL));
        if was_present {
            attr
        } else {
            Attr::Value(Value::string(format!(
                "Key not found, new Key added as {name}:{MISS_SENTINEL}"
            )))
        }
    }

    /// Read-or-insert, with the read's side effect visible in the
    /// signature.
    ///
    /// Returns `(true, attr)` when `name` resolves through the store or
    /// the defaults. Otherwise inserts `sentinel` into the store and
    /// returns `(false, sentinel)`.
    pub fn get_or_insert(&self, name: &str, sentinel: Value) -> (bool, Attr) {
        if let Some(value) = self.store.get(name) {
            return (true, self.wrap(value));
        }
        if let Some(value) = self.defaults.get(name) {
            // Defaults are handed back as-is, mappings included.
            return (true, Attr::Value(value));
        }
        self.store.insert(name, sentinel.clone());
        (false, Attr::Value(sentinel))
    }

    // Stored mappings are wrapped afresh, sharing this proxy's defaults.
    fn wrap(&self, value: Value) -> Attr {
        match value {
            Value::Map(map) => Attr::Nested(Proxy {
                store: map,
                defaults: self.defaults.clone(),
            }),
            other => Attr::Value(other),
        }
    }

    /// Write an attribute.
    ///
    /// The reserved names `store` and `defaults`, written with a mapping
    /// value, bypass the store and swap the proxy's corresponding field.
    /// Every other write lands in the store, creating or overwriting the
    /// key. A reserved name written with a non-mapping value is an
    /// ordinary store write.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        let value = value.into();
        if Self::is_reserved(name) {
            if let Value::Map(map) = value {
                match name {
                    "store" => self.store = map,
                    _ => self.defaults = map,
                }
                return;
            }
        }
        self.store.insert(name, value);
    }

    /// Check whether a name addresses the proxy's own fields instead of
    /// store entries.
    pub fn is_reserved(name: &str) -> bool {
        RESERVED.contains(&name)
    }

    /// Delete an attribute from the store.
    ///
    /// Removing an absent key is a silent no-op returning `None`; it
    /// never fails. The order of the remaining keys is preserved.
    pub fn remove(&self, name: &str) -> Option<Value> {
        self.store.remove(name)
    }

    /// Fixed alias for the attribute literally named `metadata`.
    ///
    /// Exactly equivalent to `get("metadata")`, auto-vivification
    /// included. Kept for parity with data shaped around a `metadata`
    /// field.
    pub fn identity(&self) -> Attr {
        self.get("metadata")
    }
}

impl PartialEq for Proxy {
    fn eq(&self, other: &Self) -> bool {
        self.store == other.store && self.defaults == other.defaults
    }
}

/// Renders the store's textual mapping form only: no defaults, no
/// type-name wrapper.
impl fmt::Display for Proxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.store, f)
    }
}

impl fmt::Debug for Proxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Serializes the store only, mirroring the textual representation.
impl Serialize for Proxy {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let entries = self.store.entries();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (k, v) in &entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_insert_miss_inserts_sentinel() {
        let proxy = Proxy::new();

        let (was_present, attr) = proxy.get_or_insert("k", Value::Int(7));
        assert!(!was_present);
        assert_eq!(attr, Attr::Value(Value::Int(7)));

        let (was_present, attr) = proxy.get_or_insert("k", Value::Int(99));
        assert!(was_present);
        assert_eq!(attr, Attr::Value(Value::Int(7)));
    }

    #[test]
    fn test_get_or_insert_default_hit_does_not_insert() {
        let defaults = MapRef::from_pairs([("k", 1i64)]);
        let proxy = Proxy::new().with_defaults(defaults);

        let (was_present, attr) = proxy.get_or_insert("k", Value::Int(7));
        assert!(was_present);
        assert_eq!(attr, Attr::Value(Value::Int(1)));
        assert!(proxy.to_map().is_empty());
    }

    #[test]
    fn test_wrap_shares_defaults() {
        let defaults = MapRef::from_pairs([("fallback", 1i64)]);
        let inner = MapRef::new();
        let proxy = Proxy::from_map_with_defaults(
            MapRef::from_pairs([("inner", Value::Map(inner))]),
            defaults.clone(),
        );

        let nested = proxy.get("inner").into_nested().unwrap();
        assert!(nested.defaults().ptr_eq(&defaults));
    }

    #[test]
    fn test_reserved_names() {
        assert!(Proxy::is_reserved("store"));
        assert!(Proxy::is_reserved("defaults"));
        assert!(!Proxy::is_reserved("metadata"));
    }
}
