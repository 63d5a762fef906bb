//! Bencode decoding.
//!
//! Single-pass recursive descent with an explicit cursor. Dispatch is driven
//! entirely by the first unconsumed byte; the cursor never backtracks past a
//! successfully consumed value, and on any error the whole call fails with
//! no partially built value.

use std::collections::BTreeMap;

use bytes::Bytes;

use crate::codec::primitives::Reader;
use crate::error::DecodeError;
use crate::model::{Kind, Value};

/// Ceiling on container nesting. Inputs deeper than this fail with
/// [`DecodeError::NestingTooDeep`] instead of exhausting the stack.
pub const MAX_DEPTH: usize = 64;

/// Decodes a single bencoded value, ignoring any trailing bytes.
///
/// # Examples
///
/// ```
/// use bencode::{decode, Value};
///
/// assert_eq!(decode(b"i52e").unwrap(), Value::Integer(52));
/// assert_eq!(decode(b"4:spam").unwrap(), Value::string("spam"));
/// ```
pub fn decode(input: &[u8]) -> Result<Value, DecodeError> {
    decode_prefix(input).map(|(value, _)| value)
}

/// Decodes a single bencoded value from the front of `input`, returning the
/// value and the unconsumed remainder.
///
/// # Examples
///
/// ```
/// use bencode::{decode_prefix, Value};
///
/// let (value, rest) = decode_prefix(b"4:spami7e").unwrap();
/// assert_eq!(value, Value::string("spam"));
/// assert_eq!(rest, b"i7e");
/// ```
pub fn decode_prefix(input: &[u8]) -> Result<(Value, &[u8]), DecodeError> {
    if input.is_empty() {
        return Err(DecodeError::EmptyInput);
    }
    let mut reader = Reader::new(input);
    let value = decode_value(&mut reader, 0)?;
    Ok((value, reader.remaining()))
}

fn decode_value(reader: &mut Reader<'_>, depth: usize) -> Result<Value, DecodeError> {
    if depth > MAX_DEPTH {
        return Err(DecodeError::NestingTooDeep { max: MAX_DEPTH });
    }
    match reader.peek() {
        Some(b'i') => decode_integer(reader),
        Some(b'l') => decode_list(reader, depth),
        Some(b'd') => decode_dict(reader, depth),
        Some(b'0'..=b'9') => decode_bytes(reader),
        Some(byte) => Err(DecodeError::UnsupportedType {
            byte,
            offset: reader.position(),
        }),
        None => Err(DecodeError::EmptyInput),
    }
}

fn decode_integer(reader: &mut Reader<'_>) -> Result<Value, DecodeError> {
    let offset = reader.position();
    reader.bump();
    let span = reader
        .take_until(b'e')
        .ok_or(DecodeError::MalformedInteger {
            offset,
            reason: "missing 'e' terminator",
        })?;
    let value =
        parse_canonical_int(span).map_err(|reason| DecodeError::MalformedInteger { offset, reason })?;
    Ok(Value::Integer(value))
}

/// Parses the span between `i` and `e` as a canonical base-10 integer:
/// an optional single minus, then digits with no redundant leading zero,
/// and no `-0`.
fn parse_canonical_int(span: &[u8]) -> Result<i64, &'static str> {
    let (negative, digits) = match span.split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, span),
    };
    if digits.is_empty() {
        return Err("no digits");
    }
    if !digits.iter().all(|b| b.is_ascii_digit()) {
        return Err("non-numeric content");
    }
    if digits[0] == b'0' && digits.len() > 1 {
        return Err("leading zero");
    }
    if negative && digits[0] == b'0' {
        return Err("negative zero");
    }
    // Accumulate toward negative so i64::MIN parses without overflow.
    let mut value: i64 = 0;
    for &b in digits {
        let digit = i64::from(b - b'0');
        value = value
            .checked_mul(10)
            .and_then(|v| {
                if negative {
                    v.checked_sub(digit)
                } else {
                    v.checked_add(digit)
                }
            })
            .ok_or("out of range")?;
    }
    Ok(value)
}

fn decode_bytes(reader: &mut Reader<'_>) -> Result<Value, DecodeError> {
    let offset = reader.position();
    let mut len: usize = 0;
    while let Some(b @ b'0'..=b'9') = reader.peek() {
        reader.bump();
        len = len
            .checked_mul(10)
            .and_then(|l| l.checked_add(usize::from(b - b'0')))
            .ok_or(DecodeError::MalformedLength {
                offset,
                reason: "length out of range",
            })?;
    }
    match reader.bump() {
        Some(b':') => {}
        Some(_) => {
            return Err(DecodeError::MalformedLength {
                offset,
                reason: "expected ':' after length",
            });
        }
        None => {
            return Err(DecodeError::MalformedLength {
                offset,
                reason: "missing ':' after length",
            });
        }
    }
    let bytes = reader.take(len).ok_or(DecodeError::MalformedLength {
        offset,
        reason: "length exceeds remaining input",
    })?;
    Ok(Value::Bytes(Bytes::copy_from_slice(bytes)))
}

fn decode_list(reader: &mut Reader<'_>, depth: usize) -> Result<Value, DecodeError> {
    let offset = reader.position();
    reader.bump();
    let mut items = Vec::new();
    loop {
        match reader.peek() {
            Some(b'e') => {
                reader.bump();
                return Ok(Value::List(items));
            }
            Some(_) => items.push(decode_value(reader, depth + 1)?),
            None => {
                return Err(DecodeError::UnterminatedContainer {
                    kind: Kind::List,
                    offset,
                });
            }
        }
    }
}

fn decode_dict(reader: &mut Reader<'_>, depth: usize) -> Result<Value, DecodeError> {
    let offset = reader.position();
    reader.bump();
    let mut entries = BTreeMap::new();
    loop {
        match reader.peek() {
            Some(b'e') => {
                reader.bump();
                return Ok(Value::Dict(entries));
            }
            Some(_) => {
                let key_offset = reader.position();
                let key = match decode_value(reader, depth + 1)? {
                    Value::Bytes(key) => key,
                    other => {
                        return Err(DecodeError::KeyType {
                            offset: key_offset,
                            found: other.kind(),
                        });
                    }
                };
                if reader.peek().is_none() {
                    return Err(DecodeError::UnterminatedContainer {
                        kind: Kind::Dictionary,
                        offset,
                    });
                }
                let value = decode_value(reader, depth + 1)?;
                // Duplicate keys keep the last occurrence.
                entries.insert(key, value);
            }
            None => {
                return Err(DecodeError::UnterminatedContainer {
                    kind: Kind::Dictionary,
                    offset,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_strings() {
        let (value, rest) = decode_prefix(b"4:spam").unwrap();
        assert_eq!(value, Value::string("spam"));
        assert_eq!(rest, b"");

        assert_eq!(decode(b"0:").unwrap(), Value::string(""));
    }

    #[test]
    fn string_may_contain_arbitrary_bytes() {
        let value = decode(b"3:\x00\xff:").unwrap();
        assert_eq!(value.as_bytes().unwrap().as_ref(), &[0x00, 0xff, b':']);
    }

    #[test]
    fn truncated_string_is_malformed_length() {
        assert!(matches!(
            decode(b"4:spa"),
            Err(DecodeError::MalformedLength {
                reason: "length exceeds remaining input",
                ..
            })
        ));
    }

    #[test]
    fn string_length_without_colon_is_rejected() {
        assert!(matches!(
            decode(b"4"),
            Err(DecodeError::MalformedLength {
                reason: "missing ':' after length",
                ..
            })
        ));
        assert!(matches!(
            decode(b"12x3:abc"),
            Err(DecodeError::MalformedLength {
                reason: "expected ':' after length",
                ..
            })
        ));
    }

    #[test]
    fn string_length_accepts_leading_zeros() {
        // Tolerated on decode; the encoder never emits this form.
        assert_eq!(decode(b"04:spam").unwrap(), Value::string("spam"));
    }

    #[test]
    fn decodes_integers() {
        assert_eq!(decode(b"i0e").unwrap(), Value::Integer(0));
        assert_eq!(decode(b"i-3e").unwrap(), Value::Integer(-3));
        assert_eq!(decode(b"i52e").unwrap(), Value::Integer(52));
        assert_eq!(
            decode(b"i9223372036854775807e").unwrap(),
            Value::Integer(i64::MAX)
        );
        assert_eq!(
            decode(b"i-9223372036854775808e").unwrap(),
            Value::Integer(i64::MIN)
        );
    }

    #[test]
    fn non_canonical_integers_are_rejected() {
        let cases: [&[u8]; 7] = [b"i03e", b"i-0e", b"i00e", b"ie", b"i-e", b"i+3e", b"i1.5e"];
        for input in cases {
            assert!(
                matches!(decode(input), Err(DecodeError::MalformedInteger { .. })),
                "accepted {:?}",
                input
            );
        }
    }

    #[test]
    fn integer_overflow_is_rejected() {
        assert!(matches!(
            decode(b"i9223372036854775808e"),
            Err(DecodeError::MalformedInteger {
                reason: "out of range",
                ..
            })
        ));
    }

    #[test]
    fn integer_without_terminator_is_rejected() {
        assert!(matches!(
            decode(b"i42"),
            Err(DecodeError::MalformedInteger {
                reason: "missing 'e' terminator",
                ..
            })
        ));
    }

    #[test]
    fn decodes_mixed_list_in_order() {
        let value = decode(b"l4:spam4:eggsi7ee").unwrap();
        assert_eq!(
            value,
            Value::List(vec![
                Value::string("spam"),
                Value::string("eggs"),
                Value::Integer(7),
            ])
        );
    }

    #[test]
    fn decodes_nested_dict() {
        let value = decode(b"d3:foo3:bar5:helloi52ee").unwrap();
        assert_eq!(value.get(b"foo").and_then(|v| v.as_str()), Some("bar"));
        assert_eq!(
            value.get(b"hello").and_then(|v| v.as_integer().ok()),
            Some(52)
        );
    }

    #[test]
    fn empty_containers() {
        assert_eq!(decode(b"le").unwrap(), Value::List(Vec::new()));
        assert_eq!(decode(b"de").unwrap(), Value::Dict(BTreeMap::new()));
    }

    #[test]
    fn unterminated_containers() {
        assert!(matches!(
            decode(b"l4:spam"),
            Err(DecodeError::UnterminatedContainer {
                kind: Kind::List,
                offset: 0,
            })
        ));
        assert!(matches!(
            decode(b"d3:foo"),
            Err(DecodeError::UnterminatedContainer {
                kind: Kind::Dictionary,
                offset: 0,
            })
        ));
        // Key decoded, value missing.
        assert!(matches!(
            decode(b"d3:fooi1e3:bar"),
            Err(DecodeError::UnterminatedContainer {
                kind: Kind::Dictionary,
                ..
            })
        ));
    }

    #[test]
    fn non_string_dict_key_is_rejected() {
        assert!(matches!(
            decode(b"di1ei2ee"),
            Err(DecodeError::KeyType {
                offset: 1,
                found: Kind::Integer,
            })
        ));
    }

    #[test]
    fn duplicate_keys_keep_last_value() {
        let value = decode(b"d1:ai1e1:ai2ee").unwrap();
        assert_eq!(value.get(b"a"), Some(&Value::Integer(2)));
        assert_eq!(value.as_dict().unwrap().len(), 1);
    }

    #[test]
    fn empty_input_is_its_own_error() {
        assert_eq!(decode(b""), Err(DecodeError::EmptyInput));
    }

    #[test]
    fn unknown_prefix_is_unsupported() {
        assert_eq!(
            decode(b"x"),
            Err(DecodeError::UnsupportedType { byte: b'x', offset: 0 })
        );
    }

    #[test]
    fn trailing_bytes_are_discarded_by_decode() {
        assert_eq!(decode(b"i1egarbage").unwrap(), Value::Integer(1));
        let (_, rest) = decode_prefix(b"i1egarbage").unwrap();
        assert_eq!(rest, b"garbage");
    }

    #[test]
    fn nesting_at_the_ceiling_is_accepted() {
        let mut input = vec![b'l'; MAX_DEPTH];
        input.extend(vec![b'e'; MAX_DEPTH]);
        assert!(decode(&input).is_ok());
    }

    #[test]
    fn nesting_past_the_ceiling_is_rejected() {
        let mut input = vec![b'l'; MAX_DEPTH + 2];
        input.extend(vec![b'e'; MAX_DEPTH + 2]);
        assert_eq!(
            decode(&input),
            Err(DecodeError::NestingTooDeep { max: MAX_DEPTH })
        );
    }

    #[test]
    fn error_offsets_point_at_the_offending_value() {
        // The bad integer starts at offset 7, after "l" and "4:spam".
        match decode(b"l4:spamixe") {
            Err(DecodeError::MalformedInteger { offset, .. }) => assert_eq!(offset, 7),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
