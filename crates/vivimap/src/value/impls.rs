//! Value trait implementations: constructors, predicates, extractors, From traits, PartialEq

use std::sync::Arc;

use super::*;

// ═══════════════════════════════════════════════════════════════════
// Convenience Constructors
// ═══════════════════════════════════════════════════════════════════

impl Value {
    /// Create a string value
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(Arc::new(s.into()))
    }

    /// Create a sequence value
    pub fn seq(items: Vec<Value>) -> Self {
        Value::Seq(Arc::new(items))
    }

    /// Create a mapping value around a shared handle
    pub fn map(map: MapRef) -> Self {
        Value::Map(map)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Type Predicates
    // ═══════════════════════════════════════════════════════════════════

    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if value is boolean
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Check if value is an integer
    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    /// Check if value is a float
    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    /// Check if value is numeric (integer or float)
    pub fn is_numeric(&self) -> bool {
        self.is_int() || self.is_float()
    }

    /// Check if value is a string
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Check if value is a sequence
    pub fn is_seq(&self) -> bool {
        matches!(self, Value::Seq(_))
    }

    /// Check if value is a mapping
    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Extractors (return Option for safe access)
    // ═══════════════════════════════════════════════════════════════════

    /// Extract boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract as i64
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract as f64 (integers widen losslessly enough for mapping data)
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Extract sequence as slice
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Extract the shared mapping handle
    pub fn as_map(&self) -> Option<&MapRef> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Recursively copy the value, detaching mappings and sequences from
    /// every shared handle.
    pub fn deep_clone(&self) -> Value {
        match self {
            Value::Seq(items) => Value::seq(items.iter().map(Value::deep_clone).collect()),
            Value::Map(map) => Value::Map(map.deep_clone()),
            other => other.clone(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// PartialEq Implementation
// ═══════════════════════════════════════════════════════════════════

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,

            // Numeric variants do not cross-compare: Int(1) != Float(1.0)
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,

            (Value::String(a), Value::String(b)) => a == b,

            // Collections (element-wise / entry-wise comparison)
            (Value::Seq(a), Value::Seq(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,

            _ => false,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// From Conversions
// ═══════════════════════════════════════════════════════════════════

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(n as f64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::seq(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

impl From<MapRef> for Value {
    fn from(map: MapRef) -> Self {
        Value::Map(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Constructors
    #[test]
    fn test_string_constructor() {
        let v = Value::string("hello");
        assert!(matches!(v, Value::String(_)));
    }

    #[test]
    fn test_seq_constructor() {
        let v = Value::seq(vec![Value::Int(1), Value::Int(2)]);
        assert!(matches!(v, Value::Seq(_)));
    }

    #[test]
    fn test_map_constructor() {
        let v = Value::map(MapRef::new());
        assert!(matches!(v, Value::Map(_)));
    }

    // Predicates
    #[test]
    fn test_is_null() {
        assert!(Value::Null.is_null());
        assert!(!Value::Int(42).is_null());
    }

    #[test]
    fn test_is_numeric() {
        assert!(Value::Int(42).is_numeric());
        assert!(Value::Float(1.5).is_numeric());
        assert!(!Value::string("hi").is_numeric());
    }

    #[test]
    fn test_is_map() {
        assert!(Value::map(MapRef::new()).is_map());
        assert!(!Value::Null.is_map());
    }

    // Extractors
    #[test]
    fn test_as_bool() {
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Int(42).as_bool(), None);
    }

    #[test]
    fn test_as_i64() {
        assert_eq!(Value::Int(42).as_i64(), Some(42));
        assert_eq!(Value::Float(42.0).as_i64(), None);
    }

    #[test]
    fn test_as_f64_widens_integers() {
        assert_eq!(Value::Float(1.5).as_f64(), Some(1.5));
        assert_eq!(Value::Int(2).as_f64(), Some(2.0));
        assert_eq!(Value::string("2").as_f64(), None);
    }

    #[test]
    fn test_as_str() {
        assert_eq!(Value::string("hello").as_str(), Some("hello"));
        assert_eq!(Value::Int(1).as_str(), None);
    }

    // Equality
    #[test]
    fn test_numeric_variants_do_not_cross_compare() {
        assert_ne!(Value::Int(1), Value::Float(1.0));
        assert_eq!(Value::Int(1), Value::Int(1));
        assert_eq!(Value::Float(1.0), Value::Float(1.0));
    }

    #[test]
    fn test_seq_equality() {
        let a = Value::from(vec![1i64, 2, 3]);
        let b = Value::from(vec![1i64, 2, 3]);
        let c = Value::from(vec![1i64, 2]);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    // Conversions
    #[test]
    fn test_from_primitives() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(7i32), Value::Int(7));
        assert_eq!(Value::from(10.7f64), Value::Float(10.7));
        assert_eq!(Value::from("hi"), Value::string("hi"));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(5i64)), Value::Int(5));
    }

    // Deep clone
    #[test]
    fn test_deep_clone_detaches_nested_map() {
        let inner = MapRef::from_pairs([("n", 1i64)]);
        let v = Value::map(inner.clone());

        let copy = v.deep_clone();
        inner.insert("n", Value::Int(2));

        let copied_map = copy.as_map().unwrap();
        assert_eq!(copied_map.get("n"), Some(Value::Int(1)));
    }
}
