//! # Cryptographic Primitives
//!
//! The transaction layer needs exactly one primitive: a hash. Signing and
//! signature verification belong to the layers above and are not here.
//!
//! The construction is a boring, well-audited one: SHA-512/256
//! from the `sha2` crate, wrapped so that every caller gets domain
//! separation for free.

pub mod hash;

pub use hash::{hash_with_prefix, prefixed_bytes, sha512_256, Hashable};
