//! Bencode: the compact binary serialization format of the BitTorrent
//! metadata ecosystem.
//!
//! This crate decodes arbitrary bencoded byte streams into a typed value
//! model, re-encodes values into their unique canonical byte form, and
//! computes the SHA-1 info-hash identifying a torrent's `info` dictionary.
//!
//! # Quick Start
//!
//! ```rust
//! use bencode::{decode, encode, InfoHash};
//!
//! let value = decode(b"d3:foo3:bar5:helloi52ee").unwrap();
//! assert_eq!(value.get(b"hello").and_then(|v| v.as_integer().ok()), Some(52));
//!
//! // Keys were already sorted, so re-encoding reproduces the input.
//! assert_eq!(encode(&value), b"d3:foo3:bar5:helloi52ee");
//!
//! // Hashing re-encodes canonically: equal values hash identically.
//! let digest = InfoHash::of(&value);
//! assert_eq!(digest, InfoHash::of(&decode(&encode(&value)).unwrap()));
//! ```
//!
//! # Modules
//!
//! - [`model`]: the value model (integers, byte strings, lists, dictionaries)
//! - [`codec`]: decoding and canonical encoding
//! - [`hash`]: info-hash computation
//! - [`metainfo`]: typed access to torrent metadata
//! - [`error`]: error types
//!
//! # Security
//!
//! The decoder is written for untrusted input: every read is bounds-checked,
//! a string's declared length is validated against the remaining input
//! before its bytes are taken, and container nesting is capped so
//! adversarial inputs cannot exhaust the stack. Decoding and encoding hold
//! no shared state, so concurrent callers can use them freely on
//! independent buffers.
//!
//! # Wire format
//!
//! Integers are `i<decimal>e`, byte strings `<length>:<raw bytes>`, lists
//! `l...e`, and dictionaries `d...e` with entries sorted by raw key bytes.
//! The encoder always emits exactly this canonical form, which is what
//! makes the info-hash well-defined: a dictionary encodes the same way no
//! matter what order it was built in.

pub mod codec;
pub mod error;
pub mod hash;
pub mod metainfo;
pub mod model;

// Re-export commonly used items at the crate root.
pub use codec::{decode, decode_prefix, encode};
pub use error::{DecodeError, MetainfoError, TypeMismatch};
pub use hash::{INFO_HASH_LEN, InfoHash};
pub use metainfo::{FileEntry, Metainfo};
pub use model::{DictBuilder, Kind, ListBuilder, Value};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
