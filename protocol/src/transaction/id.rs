//! Transaction identifiers.
//!
//! A transaction ID is a content hash: SHA-512/256 over `"TX"` followed by
//! the canonical encoding. Its text form is RFC 4648 base-32, uppercase, no
//! padding, always 52 characters. That string is what people paste into
//! block explorers, so [`TxId`] round-trips through it losslessly.

use std::fmt;
use std::str::FromStr;

use multibase::Base;
use serde::{Deserialize, Serialize};

use super::builder::Transaction;
use super::types::Digest;
use crate::config::{DIGEST_LENGTH, TXID_TEXT_LENGTH};
use crate::error::TxError;

/// A 32-byte transaction identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TxId([u8; DIGEST_LENGTH]);

impl TxId {
    /// Wraps raw ID bytes.
    pub const fn new(bytes: [u8; DIGEST_LENGTH]) -> Self {
        Self(bytes)
    }

    /// The raw 32 bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LENGTH] {
        &self.0
    }

    /// The ID as a generic digest, the form group member lists hold.
    pub fn to_digest(&self) -> Digest {
        Digest::new(self.0)
    }

    /// Unpadded uppercase base-32.
    pub fn to_base32(&self) -> String {
        Base::Base32Upper.encode(self.0)
    }
}

impl From<Digest> for TxId {
    fn from(digest: Digest) -> Self {
        Self(digest.0)
    }
}

impl From<TxId> for Digest {
    fn from(id: TxId) -> Self {
        id.to_digest()
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base32())
    }
}

impl fmt::Debug for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxId({})", self.to_base32())
    }
}

impl FromStr for TxId {
    type Err = TxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // The decoder folds case, so the alphabet is checked here: one ID,
        // one text form.
        if s.len() != TXID_TEXT_LENGTH || !s.bytes().all(is_base32_upper) {
            return Err(TxError::InvalidTxId(s.to_owned()));
        }
        let bytes = Base::Base32Upper
            .decode(s)
            .map_err(|_| TxError::InvalidTxId(s.to_owned()))?;
        <[u8; DIGEST_LENGTH]>::try_from(bytes.as_slice())
            .map(Self)
            .map_err(|_| TxError::InvalidTxId(s.to_owned()))
    }
}

fn is_base32_upper(b: u8) -> bool {
    b.is_ascii_uppercase() || (b'2'..=b'7').contains(&b)
}

impl Serialize for TxId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base32())
    }
}

impl<'de> Deserialize<'de> for TxId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Derives the raw identifier of `tx`.
pub fn transaction_id(tx: &Transaction) -> TxId {
    tx.id()
}

/// Derives the display identifier of `tx`: the base-32 text of its raw ID.
pub fn display_id(tx: &Transaction) -> String {
    tx.id().to_base32()
}
