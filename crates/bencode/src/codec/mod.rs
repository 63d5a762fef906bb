//! Bencode encoding and decoding.
//!
//! The decoder turns a byte buffer into a [`Value`](crate::model::Value)
//! tree; the encoder turns a tree back into the unique canonical byte form.
//! Both operate on complete in-memory buffers, hold no state across calls,
//! and are safe to use concurrently on independent inputs.

pub mod decode;
pub mod encode;
mod primitives;

pub use decode::{decode, decode_prefix};
pub use encode::encode;
