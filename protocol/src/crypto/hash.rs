//! # Hashing Utilities
//!
//! One hash function, one way to use it.
//!
//! - **SHA-512/256** — SHA-512 with its own IV, truncated to 256 bits. It is
//!   faster than SHA-256 on 64-bit hardware and, because the output is a
//!   truncation of a wider state, it isn't subject to length extension.
//!
//! Every object hashed by the protocol goes through [`Hashable`]: canonical
//! encoding first, then a short ASCII domain-separation prefix from
//! [`crate::config`], then the hash. Never hash a canonical encoding without
//! its prefix; the prefix is what keeps a transaction ID from ever meaning
//! the same thing as a vote or group digest.

use sha2::{Digest as _, Sha512_256};

use crate::config::HashId;
use crate::encoding::{to_canonical_bytes, CanonicalEncode};
use crate::transaction::types::Digest;

/// Computes SHA-512/256 of `data`.
///
/// # Example
///
/// ```
/// use ledger_txn::crypto::sha512_256;
///
/// let hash = sha512_256(b"ledger");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha512_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha512_256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Computes SHA-512/256 of `prefix || data` without concatenating first.
pub fn hash_with_prefix(prefix: HashId, data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha512_256::new();
    hasher.update(prefix.as_bytes());
    hasher.update(data);
    hasher.finalize().into()
}

/// Returns `prefix || data` as one buffer. These are the bytes a signer
/// signs.
pub fn prefixed_bytes(prefix: HashId, data: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(prefix.len() + data.len());
    buf.extend_from_slice(prefix.as_bytes());
    buf.extend_from_slice(data);
    buf
}

/// An object with a domain-separated content hash.
///
/// The hash input is always `HASH_ID || canonical_encoding(self)`. Both
/// methods are provided so that implementors can't get the recipe wrong;
/// an implementor only picks its prefix.
pub trait Hashable: CanonicalEncode {
    /// Domain-separation prefix for this object type.
    const HASH_ID: HashId;

    /// The exact bytes that get hashed (and, for transactions, signed).
    fn to_be_hashed(&self) -> Vec<u8> {
        prefixed_bytes(Self::HASH_ID, &to_canonical_bytes(self))
    }

    /// SHA-512/256 of [`Hashable::to_be_hashed`].
    fn hash(&self) -> Digest {
        Digest::new(hash_with_prefix(Self::HASH_ID, &to_canonical_bytes(self)))
    }
}
