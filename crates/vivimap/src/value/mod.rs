//! Value representation for proxied mapping data

mod display;
mod impls;
mod json;
mod map;
mod ser;

pub use map::MapRef;

use std::sync::Arc;

/// A dynamic value stored in a proxied mapping.
///
/// Values come in two tiers:
/// - Inline primitives (`Null`, `Bool`, `Int`, `Float`) are plain copies.
/// - Compound types (`String`, `Seq`, `Map`) are shared by handle:
///   cloning one clones the handle, not the contents. Mappings in
///   particular stay aliased through clones, which is what lets a nested
///   proxy mutate the mapping its parent stores.
#[derive(Clone)]
pub enum Value {
    /// Absent or explicit null
    Null,

    /// Boolean: `true` or `false`
    Bool(bool),

    /// 64-bit signed integer (the only integer shape)
    Int(i64),

    /// 64-bit floating point (the only float shape)
    Float(f64),

    /// Heap-allocated string
    String(Arc<String>),

    /// Ordered sequence of values
    Seq(Arc<Vec<Value>>),

    /// Nested mapping, shared by handle
    Map(MapRef),
}
