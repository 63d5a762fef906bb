//! Fluent builders for constructing values programmatically.
//!
//! Decoding is one way to obtain a [`Value`] tree; the other is building one
//! by hand, typically to encode or hash it.
//!
//! # Example
//!
//! ```
//! use bencode::{encode, DictBuilder};
//!
//! let info = DictBuilder::new()
//!     .insert("foo", "bar")
//!     .insert("hello", 52)
//!     .build();
//! assert_eq!(encode(&info), b"d3:foo3:bar5:helloi52ee");
//! ```

use std::collections::BTreeMap;

use bytes::Bytes;

use crate::model::Value;

/// Builder for dictionary values.
///
/// Entries are keyed by raw bytes; insertion order does not matter, and
/// inserting the same key twice keeps the last value.
#[derive(Debug, Clone, Default)]
pub struct DictBuilder {
    entries: BTreeMap<Bytes, Value>,
}

impl DictBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, replacing any previous value for the same key.
    pub fn insert(mut self, key: impl Into<Bytes>, value: impl Into<Value>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> Value {
        Value::Dict(self.entries)
    }
}

/// Builder for list values. Elements keep their push order.
#[derive(Debug, Clone, Default)]
pub struct ListBuilder {
    items: Vec<Value>,
}

impl ListBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, value: impl Into<Value>) -> Self {
        self.items.push(value.into());
        self
    }

    pub fn build(self) -> Value {
        Value::List(self.items)
    }
}
