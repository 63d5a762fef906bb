//! Canonical bencode encoding.

use crate::codec::primitives::Writer;
use crate::model::Value;

/// Encodes a value into its canonical bencode byte form.
///
/// Encoding is total: every constructible [`Value`] has exactly one
/// canonical encoding, so this never fails. Dictionary entries are emitted
/// in ascending raw-key-byte order no matter how the dictionary was built,
/// which is what makes the output suitable for hashing — structurally equal
/// values always encode to identical bytes.
///
/// # Examples
///
/// ```
/// use bencode::{encode, Value};
///
/// assert_eq!(encode(&Value::Integer(42)), b"i42e");
/// assert_eq!(encode(&Value::string("hello")), b"5:hello");
///
/// let list = Value::List(vec![Value::Integer(1), Value::string("two")]);
/// assert_eq!(encode(&list), b"li1e3:twoe");
/// ```
pub fn encode(value: &Value) -> Vec<u8> {
    let mut writer = Writer::new();
    encode_value(&mut writer, value);
    writer.into_bytes()
}

fn encode_value(writer: &mut Writer, value: &Value) {
    match value {
        Value::Integer(i) => {
            writer.write_byte(b'i');
            writer.write_decimal(*i);
            writer.write_byte(b'e');
        }
        Value::Bytes(bytes) => encode_byte_string(writer, bytes),
        Value::List(items) => {
            writer.write_byte(b'l');
            for item in items {
                encode_value(writer, item);
            }
            writer.write_byte(b'e');
        }
        Value::Dict(entries) => {
            writer.write_byte(b'd');
            // BTreeMap iterates keys in ascending byte order: canonical form.
            for (key, item) in entries {
                encode_byte_string(writer, key);
                encode_value(writer, item);
            }
            writer.write_byte(b'e');
        }
    }
}

fn encode_byte_string(writer: &mut Writer, bytes: &[u8]) {
    writer.write_unsigned(bytes.len() as u64);
    writer.write_byte(b':');
    writer.write_bytes(bytes);
}
