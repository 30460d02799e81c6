//! Decoding canonical maps back into typed records.
//!
//! Decoding is more forgiving than encoding: keys may come in
//! any order and zero values may be spelled out explicitly (or as nil). What
//! it does not forgive is ambiguity. Duplicate keys, keys outside the tag
//! table, wrong wire types and wrong fixed lengths are all errors.

use std::collections::BTreeMap;

use super::wire::{self, Value};
use crate::error::{Result, TxError};

/// An entity that can be rebuilt from a decoded map.
///
/// Implementors take the keys they own out of the reader. Anything left
/// behind is reported as an unknown field once decoding of the enclosing
/// map finishes.
pub trait CanonicalDecode: Sized {
    /// Pulls this value's fields out of `fields`.
    fn decode_fields(fields: &mut FieldReader) -> Result<Self>;
}

/// Decodes a canonical byte string into `T`.
pub fn from_canonical_bytes<T: CanonicalDecode>(bytes: &[u8]) -> Result<T> {
    let value = wire::parse(bytes)?;
    decode_value(value, "<root>")
}

/// Decodes an already-parsed map value into `T`, rejecting leftovers.
pub fn decode_value<T: CanonicalDecode>(value: Value, key: &str) -> Result<T> {
    let mut fields = FieldReader::from_value(value, key)?;
    let decoded = T::decode_fields(&mut fields)?;
    fields.finish()?;
    Ok(decoded)
}

/// Keyed access to the entries of one decoded map.
///
/// Every accessor removes the key it reads. An absent key, or one holding
/// nil, reads as the zero value of the requested type.
#[derive(Debug, Default)]
pub struct FieldReader {
    entries: BTreeMap<String, Value>,
}

impl FieldReader {
    /// Builds a reader over a map value. Nil is accepted as an empty map.
    pub fn from_value(value: Value, key: &str) -> Result<Self> {
        let pairs = match value {
            Value::Map(pairs) => pairs,
            Value::Nil => Vec::new(),
            _ => return Err(unexpected(key, "map")),
        };

        let mut entries = BTreeMap::new();
        for (k, v) in pairs {
            if entries.contains_key(&k) {
                return Err(TxError::DuplicateField { key: k });
            }
            entries.insert(k, v);
        }
        Ok(Self { entries })
    }

    fn take(&mut self, key: &str) -> Option<Value> {
        match self.entries.remove(key) {
            Some(Value::Nil) | None => None,
            Some(value) => Some(value),
        }
    }

    /// Reads an unsigned integer.
    pub fn uint(&mut self, key: &str) -> Result<u64> {
        match self.take(key) {
            None => Ok(0),
            Some(value) => value_to_uint(value, key),
        }
    }

    /// Reads an unsigned integer that must fit in `T`.
    pub fn narrow<T: TryFrom<u64>>(&mut self, key: &str) -> Result<T> {
        let value = self.uint(key)?;
        T::try_from(value).map_err(|_| TxError::IntegerOverflow {
            key: key.to_owned(),
            value,
        })
    }

    /// Reads a boolean.
    pub fn boolean(&mut self, key: &str) -> Result<bool> {
        match self.take(key) {
            None => Ok(false),
            Some(Value::Bool(b)) => Ok(b),
            Some(_) => Err(unexpected(key, "bool")),
        }
    }

    /// Reads a string.
    pub fn string(&mut self, key: &str) -> Result<String> {
        match self.take(key) {
            None => Ok(String::new()),
            Some(Value::Str(s)) => Ok(s),
            Some(_) => Err(unexpected(key, "string")),
        }
    }

    /// Reads a variable-length blob.
    pub fn bytes(&mut self, key: &str) -> Result<Vec<u8>> {
        match self.take(key) {
            None => Ok(Vec::new()),
            Some(value) => value_to_bytes(value, key),
        }
    }

    /// Reads a fixed-size blob. An empty blob reads as all zeros.
    pub fn fixed<const N: usize>(&mut self, key: &str) -> Result<[u8; N]> {
        match self.take(key) {
            None => Ok([0u8; N]),
            Some(value) => value_to_fixed(value, key),
        }
    }

    /// Reads a nested record. An absent sub-map decodes as an empty one, so
    /// records with all-zero defaults come back as their zero value.
    pub fn nested<T: CanonicalDecode>(&mut self, key: &str) -> Result<T> {
        let value = self.take(key).unwrap_or(Value::Map(Vec::new()));
        decode_value(value, key)
    }

    /// Reads a list, converting each element with `read_item`.
    pub fn array<T, F>(&mut self, key: &str, mut read_item: F) -> Result<Vec<T>>
    where
        F: FnMut(Value, &str) -> Result<T>,
    {
        match self.take(key) {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => items.into_iter().map(|v| read_item(v, key)).collect(),
            Some(_) => Err(unexpected(key, "array")),
        }
    }

    /// Removes and returns every entry not consumed yet, in key order.
    pub fn drain(&mut self) -> Vec<(String, Value)> {
        std::mem::take(&mut self.entries).into_iter().collect()
    }

    /// Fails with [`TxError::UnknownField`] if any entry was left unread.
    pub fn finish(self) -> Result<()> {
        match self.entries.into_keys().next() {
            Some(key) => Err(TxError::UnknownField { key }),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Element conversions, shared with array readers
// ---------------------------------------------------------------------------

/// Converts a value to an unsigned integer.
pub fn value_to_uint(value: Value, key: &str) -> Result<u64> {
    match value {
        Value::Uint(n) => Ok(n),
        _ => Err(unexpected(key, "unsigned integer")),
    }
}

/// Converts a value to a blob. Strings are accepted too: some writers emit
/// raw bytes with the str marker.
pub fn value_to_bytes(value: Value, key: &str) -> Result<Vec<u8>> {
    match value {
        Value::Bin(b) => Ok(b),
        Value::Str(s) => Ok(s.into_bytes()),
        Value::Nil => Ok(Vec::new()),
        _ => Err(unexpected(key, "binary")),
    }
}

/// Converts a value to a fixed-size blob.
pub fn value_to_fixed<const N: usize>(value: Value, key: &str) -> Result<[u8; N]> {
    let bytes = value_to_bytes(value, key)?;
    if bytes.is_empty() {
        return Ok([0u8; N]);
    }
    <[u8; N]>::try_from(bytes.as_slice()).map_err(|_| TxError::InvalidLength {
        key: key.to_owned(),
        expected: N,
        actual: bytes.len(),
    })
}

fn unexpected(key: &str, expected: &'static str) -> TxError {
    TxError::UnexpectedType {
        key: key.to_owned(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(pairs: Vec<(&str, Value)>) -> FieldReader {
        let map = Value::Map(pairs.into_iter().map(|(k, v)| (k.to_owned(), v)).collect());
        FieldReader::from_value(map, "test").unwrap()
    }

    #[test]
    fn absent_and_nil_read_as_zero() {
        let mut r = reader(vec![("n", Value::Nil)]);
        assert_eq!(r.uint("n").unwrap(), 0);
        assert_eq!(r.uint("missing").unwrap(), 0);
        assert_eq!(r.string("s").unwrap(), "");
        assert_eq!(r.fixed::<32>("f").unwrap(), [0u8; 32]);
        assert!(r.finish().is_ok());
    }

    #[test]
    fn duplicate_keys_rejected() {
        let map = Value::Map(vec![
            ("a".into(), Value::Uint(1)),
            ("a".into(), Value::Uint(2)),
        ]);
        assert!(matches!(
            FieldReader::from_value(map, "x"),
            Err(TxError::DuplicateField { key }) if key == "a"
        ));
    }

    #[test]
    fn leftovers_are_unknown_fields() {
        let mut r = reader(vec![("a", Value::Uint(1)), ("zz", Value::Uint(2))]);
        assert_eq!(r.uint("a").unwrap(), 1);
        assert!(matches!(r.finish(), Err(TxError::UnknownField { key }) if key == "zz"));
    }

    #[test]
    fn fixed_length_is_checked() {
        let mut r = reader(vec![("f", Value::Bin(vec![1; 31]))]);
        assert!(matches!(
            r.fixed::<32>("f"),
            Err(TxError::InvalidLength { expected: 32, actual: 31, .. })
        ));
    }

    #[test]
    fn wrong_type_is_reported() {
        let mut r = reader(vec![("a", Value::Str("x".into()))]);
        assert!(matches!(r.uint("a"), Err(TxError::UnexpectedType { .. })));
    }

    #[test]
    fn narrow_checks_range() {
        let mut r = reader(vec![("v", Value::Uint(300))]);
        assert!(matches!(
            r.narrow::<u8>("v"),
            Err(TxError::IntegerOverflow { value: 300, .. })
        ));
    }

    #[test]
    fn negative_integer_is_not_unsigned() {
        let mut r = reader(vec![("a", Value::Int(-1))]);
        assert!(r.uint("a").is_err());
    }
}
