//! The canonical encoder.
//!
//! Every encodable entity describes itself by pushing fields into a
//! [`FieldMap`]. The map owns the two rules that make the output canonical,
//! and nothing else in the crate is allowed to reimplement them:
//!
//! 1. A field holding its type's zero value is dropped, not written as zero.
//! 2. The surviving keys are emitted in ascending bytewise order, whatever
//!    order the entity pushed them in.
//!
//! Values are serialized as soon as they are pushed; only the final sort and
//! the map header are deferred to [`FieldMap::into_bytes`].

use super::wire;

/// An entity with a canonical map encoding.
///
/// Implementors push every field they own, zero or not. Omission is the
/// map's job. Flattened records (a transaction's header and its variant
/// fields) simply push into the same map.
pub trait CanonicalEncode {
    /// Pushes this value's fields into `map`.
    fn encode_fields(&self, map: &mut FieldMap);
}

/// Encodes `value` into its canonical byte form.
///
/// Total: there is no input for which this fails.
pub fn to_canonical_bytes<T: CanonicalEncode + ?Sized>(value: &T) -> Vec<u8> {
    let mut map = FieldMap::new();
    value.encode_fields(&mut map);
    map.into_bytes()
}

/// Collects the non-zero fields of one map level.
#[derive(Debug, Default)]
pub struct FieldMap {
    entries: Vec<(&'static str, Vec<u8>)>,
}

impl FieldMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fields that survived zero-omission so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if every pushed field was zero.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys of the surviving fields, in push order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }

    /// Pushes an unsigned integer. Omitted when zero.
    pub fn uint(&mut self, key: &'static str, value: u64) -> &mut Self {
        if value != 0 {
            let mut buf = Vec::with_capacity(9);
            wire::write_uint(&mut buf, value);
            self.push(key, buf);
        }
        self
    }

    /// Pushes a boolean. Omitted when `false`.
    pub fn boolean(&mut self, key: &'static str, value: bool) -> &mut Self {
        if value {
            let mut buf = Vec::with_capacity(1);
            wire::write_bool(&mut buf, value);
            self.push(key, buf);
        }
        self
    }

    /// Pushes a string. Omitted when empty.
    pub fn string(&mut self, key: &'static str, value: &str) -> &mut Self {
        if !value.is_empty() {
            let mut buf = Vec::with_capacity(value.len() + 5);
            wire::write_str(&mut buf, value);
            self.push(key, buf);
        }
        self
    }

    /// Pushes a variable-length blob. Omitted when empty.
    pub fn bytes(&mut self, key: &'static str, value: &[u8]) -> &mut Self {
        if !value.is_empty() {
            self.push_bin(key, value);
        }
        self
    }

    /// Pushes a fixed-size blob (address, digest, key, signature).
    /// Omitted when every byte is zero.
    pub fn fixed(&mut self, key: &'static str, value: &[u8]) -> &mut Self {
        if value.iter().any(|&b| b != 0) {
            self.push_bin(key, value);
        }
        self
    }

    /// Pushes a nested record as a sub-map. Omitted when the record has no
    /// non-zero fields.
    pub fn nested<T: CanonicalEncode + ?Sized>(&mut self, key: &'static str, value: &T) -> &mut Self {
        let mut inner = FieldMap::new();
        value.encode_fields(&mut inner);
        if !inner.is_empty() {
            self.push(key, inner.into_bytes());
        }
        self
    }

    /// Pushes a list, writing each element with `write_item`. Omitted when
    /// the list is empty. Elements themselves are never omitted: position in
    /// a list is meaningful.
    pub fn array<T, F>(&mut self, key: &'static str, items: &[T], mut write_item: F) -> &mut Self
    where
        F: FnMut(&mut Vec<u8>, &T),
    {
        if !items.is_empty() {
            let mut buf = Vec::new();
            wire::write_array_len(&mut buf, items.len());
            for item in items {
                write_item(&mut buf, item);
            }
            self.push(key, buf);
        }
        self
    }

    /// Sorts the surviving fields by key and writes the finished map.
    pub fn into_bytes(mut self) -> Vec<u8> {
        self.entries.sort_unstable_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
        debug_assert!(
            self.entries.windows(2).all(|w| w[0].0 != w[1].0),
            "duplicate key pushed into FieldMap"
        );

        let body: usize = self.entries.iter().map(|(k, v)| k.len() + 1 + v.len()).sum();
        let mut buf = Vec::with_capacity(body + 5);
        wire::write_map_len(&mut buf, self.entries.len());
        for (key, value) in &self.entries {
            wire::write_str(&mut buf, key);
            buf.extend_from_slice(value);
        }
        buf
    }

    fn push_bin(&mut self, key: &'static str, value: &[u8]) {
        let mut buf = Vec::with_capacity(value.len() + 5);
        wire::write_bin(&mut buf, value);
        self.push(key, buf);
    }

    fn push(&mut self, key: &'static str, value: Vec<u8>) {
        self.entries.push((key, value));
    }
}
