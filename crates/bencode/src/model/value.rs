//! The bencode value type.
//!
//! A decoded bencode document is a tree of [`Value`]s: integers, byte
//! strings, lists, and dictionaries. Byte strings stay raw bytes throughout
//! the model; nothing here assumes they are valid text.

use std::collections::BTreeMap;
use std::fmt;

use bytes::Bytes;

use crate::error::TypeMismatch;

/// The four bencode value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Integer,
    ByteString,
    List,
    Dictionary,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Integer => "integer",
            Kind::ByteString => "byte string",
            Kind::List => "list",
            Kind::Dictionary => "dictionary",
        };
        f.write_str(name)
    }
}

/// A bencode value.
///
/// Values are immutable once produced: the decoder builds a tree and hands
/// it over, and the encoder only reads it. Two dictionaries holding the same
/// key/value pairs compare equal regardless of the order they were built in,
/// because entries live in a [`BTreeMap`] ordered by raw key bytes — the
/// same order canonical encoding requires.
///
/// # Examples
///
/// ```
/// use bencode::Value;
///
/// let int = Value::Integer(42);
/// assert_eq!(int.as_integer(), Ok(42));
///
/// let string = Value::string("hello");
/// assert_eq!(string.as_str(), Some("hello"));
/// assert!(string.as_integer().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A signed integer.
    Integer(i64),
    /// A byte string; may or may not be valid UTF-8.
    Bytes(Bytes),
    /// An ordered list of values. Insertion order is significant.
    List(Vec<Value>),
    /// A dictionary keyed by byte strings, ordered by raw key bytes.
    Dict(BTreeMap<Bytes, Value>),
}

impl Value {
    /// Creates a byte string value from a UTF-8 string.
    pub fn string(s: &str) -> Self {
        Value::Bytes(Bytes::copy_from_slice(s.as_bytes()))
    }

    /// Returns which of the four kinds this value is.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Integer(_) => Kind::Integer,
            Value::Bytes(_) => Kind::ByteString,
            Value::List(_) => Kind::List,
            Value::Dict(_) => Kind::Dictionary,
        }
    }

    fn mismatch(&self, expected: Kind) -> TypeMismatch {
        TypeMismatch {
            expected,
            found: self.kind(),
        }
    }

    /// Returns the integer payload, or a [`TypeMismatch`] for any other kind.
    pub fn as_integer(&self) -> Result<i64, TypeMismatch> {
        match self {
            Value::Integer(i) => Ok(*i),
            other => Err(other.mismatch(Kind::Integer)),
        }
    }

    /// Returns the raw byte string payload.
    pub fn as_bytes(&self) -> Result<&Bytes, TypeMismatch> {
        match self {
            Value::Bytes(b) => Ok(b),
            other => Err(other.mismatch(Kind::ByteString)),
        }
    }

    /// Returns the list elements in order.
    pub fn as_list(&self) -> Result<&[Value], TypeMismatch> {
        match self {
            Value::List(l) => Ok(l),
            other => Err(other.mismatch(Kind::List)),
        }
    }

    /// Returns the dictionary entries.
    pub fn as_dict(&self) -> Result<&BTreeMap<Bytes, Value>, TypeMismatch> {
        match self {
            Value::Dict(d) => Ok(d),
            other => Err(other.mismatch(Kind::Dictionary)),
        }
    }

    /// Consumes the value and returns the list, avoiding a clone.
    pub fn into_list(self) -> Result<Vec<Value>, TypeMismatch> {
        match self {
            Value::List(l) => Ok(l),
            other => Err(other.mismatch(Kind::List)),
        }
    }

    /// Consumes the value and returns the dictionary, avoiding a clone.
    pub fn into_dict(self) -> Result<BTreeMap<Bytes, Value>, TypeMismatch> {
        match self {
            Value::Dict(d) => Ok(d),
            other => Err(other.mismatch(Kind::Dictionary)),
        }
    }

    /// Returns a UTF-8 view of a byte string.
    ///
    /// `None` if this is not a byte string or if the bytes are not valid
    /// UTF-8. Text interpretation is a caller concern; the codec never
    /// performs it.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Bytes(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }

    /// Looks up a key in this value if it is a dictionary.
    ///
    /// # Examples
    ///
    /// ```
    /// use bencode::decode;
    ///
    /// let value = decode(b"d3:foo3:bare").unwrap();
    /// assert_eq!(value.get(b"foo").and_then(|v| v.as_str()), Some("bar"));
    /// assert_eq!(value.get(b"missing"), None);
    /// ```
    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        self.as_dict().ok()?.get(key)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Value::Bytes(b)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(Bytes::from(b))
    }
}

impl From<Vec<Value>> for Value {
    fn from(l: Vec<Value>) -> Self {
        Value::List(l)
    }
}

impl From<BTreeMap<Bytes, Value>> for Value {
    fn from(d: BTreeMap<Bytes, Value>) -> Self {
        Value::Dict(d)
    }
}
