//! Error types for the transaction layer.
//!
//! Building a transaction, encoding it and deriving its ID never fail, so
//! nothing on that path returns [`TxError`]. Errors only come from the
//! surfaces that consume outside input: decoding wire bytes, parsing a text
//! ID, computing a group over a caller-supplied list, and JSON.

use thiserror::Error;

use crate::transaction::types::TxType;

/// Errors produced while decoding or assembling transaction data.
#[derive(Debug, Error)]
pub enum TxError {
    /// The input ended in the middle of a value.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// A MessagePack marker byte that the canonical format never produces
    /// (floats, extension types, the reserved `0xc1`).
    #[error("unsupported marker byte 0x{0:02x}")]
    InvalidMarker(u8),

    /// Bytes were left over after the top-level value.
    #[error("{0} trailing bytes after encoded value")]
    TrailingBytes(usize),

    /// Containers nest deeper than the decoder allows.
    #[error("nesting deeper than {max} levels")]
    NestingTooDeep {
        /// Configured maximum depth.
        max: usize,
    },

    /// A map key was not a string.
    #[error("map key is not a string")]
    NonStringKey,

    /// A string value was not valid UTF-8.
    #[error("invalid UTF-8 in string value")]
    InvalidUtf8,

    /// The same key appeared twice in one map.
    #[error("duplicate field `{key}`")]
    DuplicateField {
        /// The repeated key.
        key: String,
    },

    /// A field held a value of the wrong wire type.
    #[error("field `{key}`: expected {expected}")]
    UnexpectedType {
        /// The field key.
        key: String,
        /// What the field should have held.
        expected: &'static str,
    },

    /// An integer field does not fit its in-memory type.
    #[error("field `{key}`: value {value} out of range")]
    IntegerOverflow {
        /// The field key.
        key: String,
        /// The decoded value.
        value: u64,
    },

    /// A fixed-size binary field had the wrong length.
    #[error("field `{key}`: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// The field key.
        key: String,
        /// Required length.
        expected: usize,
        /// Length found on the wire.
        actual: usize,
    },

    /// A key outside the field tag table.
    #[error("unknown field `{key}`")]
    UnknownField {
        /// The unrecognized key.
        key: String,
    },

    /// The `type` field is absent or empty.
    #[error("transaction type is missing")]
    MissingTxType,

    /// The `type` field holds a tag outside the known set.
    #[error("unknown transaction type `{0}`")]
    UnknownTxType(String),

    /// A non-zero field belonging to a different transaction type.
    #[error("field `{key}` is not carried by {tx_type} transactions")]
    FieldNotAllowed {
        /// The offending key.
        key: String,
        /// The transaction's declared type.
        tx_type: TxType,
    },

    /// A text transaction ID that is not valid base-32 or not 32 bytes.
    #[error("invalid transaction id `{0}`")]
    InvalidTxId(String),

    /// Group computation was asked to link zero transactions.
    #[error("transaction group is empty")]
    EmptyGroup,

    /// Group computation was asked to link too many transactions.
    #[error("transaction group has {size} members (max {max})")]
    GroupTooLarge {
        /// Requested group size.
        size: usize,
        /// Protocol maximum.
        max: usize,
    },

    /// JSON (de)serialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TxError>;
