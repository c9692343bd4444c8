//! # vivimap
//!
//! Attribute-path access over nested mappings.
//!
//! `vivimap` wraps a string-keyed mapping in a [`Proxy`] so nested data
//! can be walked attribute by attribute (`data`, `metadata`, `system`,
//! `size`) instead of subscript by subscript. Reads fall back to a
//! defaults mapping, and a key missing from both is materialized in the
//! store with a sentinel value (auto-vivification), so attribute access
//! is total: it always returns, never fails.
//!
//! Nested mappings are shared by handle: the proxy a nested read returns
//! writes straight into the mapping its parent stores, which is what
//! lets inner mutations reflect on the main level.
//!
//! ## Example
//!
//! ```
//! use vivimap::{MapRef, Proxy, Value};
//!
//! let system = MapRef::from_pairs([("size", Value::Float(10.7))]);
//! let map = MapRef::from_pairs([
//!     ("id", Value::string("1")),
//!     ("metadata", Value::Map(MapRef::from_pairs([("system", Value::Map(system))]))),
//! ]);
//!
//! let data = Proxy::from_map(map);
//! let system = data
//!     .get("metadata").into_nested().unwrap()
//!     .get("system").into_nested().unwrap();
//! assert_eq!(system.get("size").as_f64(), Some(10.7));
//!
//! // A miss materializes the sentinel in the shared mapping and
//! // reports it; later reads see the sentinel itself.
//! let first = system.get("height");
//! assert_eq!(first.as_str(), Some("Key not found, new Key added as height:100"));
//! assert_eq!(system.get("height").as_i64(), Some(100));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod proxy;
pub mod value;

// Re-export main types
pub use error::{Result, VivimapError};
pub use proxy::{Attr, Proxy, MISS_SENTINEL};
pub use value::{MapRef, Value};

/// vivimap version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
