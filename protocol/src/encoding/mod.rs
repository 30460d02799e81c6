//! # Canonical Encoding
//!
//! The byte format every hashable object is reduced to before it is hashed
//! or signed. It is MessagePack with two extra rules enforced in exactly one
//! place ([`canonical::FieldMap`]):
//!
//! - fields at their zero value are omitted, never written as zero;
//! - map keys are emitted in ascending bytewise order.
//!
//! Together these give "equal values encode to equal bytes" for every type
//! in the crate. That property is the whole reason the module exists: if two
//! nodes disagree on a single byte, they disagree on the transaction ID.
//!
//! ```text
//! wire.rs      — MessagePack primitive writers and a small value parser
//! canonical.rs — FieldMap + CanonicalEncode: zero-omission and key ordering
//! decode.rs    — FieldReader + CanonicalDecode: typed access to parsed maps
//! ```

pub mod canonical;
pub mod decode;
pub mod wire;

pub use canonical::{to_canonical_bytes, CanonicalEncode, FieldMap};
pub use decode::{from_canonical_bytes, CanonicalDecode, FieldReader};
