//! # Transaction Module
//!
//! The transaction model, its canonical wire form, and the identifiers
//! derived from it. Every value transfer, key registration and asset
//! operation on the network is represented as a [`Transaction`].
//!
//! ## Architecture
//!
//! ```text
//! types.rs   — Value types: addresses, digests, keys, TxType
//! fields.rs  — Per-type field sets and their wire tags
//! builder.rs — Header, TxFields, Transaction, TransactionBuilder
//! id.rs      — TxId: "TX" + SHA-512/256, base-32 text form
//! group.rs   — TxGroup and group digest computation/assignment
//! signed.rs  — SignedTxn envelope (sig / msig / lsig / sgnr)
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Build** — Use [`TransactionBuilder`] to assemble the fields.
//! 2. **Group** (optional) — [`assign_group_id`] links several transactions.
//! 3. **Sign** — Off-crate: a signer signs [`Transaction::signable_bytes`].
//! 4. **Wrap** — Put the result in a [`SignedTxn`] and broadcast its
//!    [`SignedTxn::encode`] bytes.
//!
//! ## Design Decisions
//!
//! - In memory the transaction type is an enum carrying only its own
//!   payload. On the wire every field is flattened into one map, exactly as
//!   peers expect. Decoding maps the flat form back and refuses non-zero
//!   fields that the declared type cannot carry.
//! - Zero means unset. A payment of 0 and a payment with no amount are the
//!   same transaction, with the same ID. That is a property of the wire
//!   format and is kept as is.
//! - Nothing here validates a transaction against ledger rules.

pub mod builder;
pub mod fields;
pub mod group;
pub mod id;
pub mod signed;
pub mod types;

pub use builder::{Header, Transaction, TransactionBuilder, TxFields};
pub use fields::{
    AssetConfigFields, AssetFreezeFields, AssetParams, AssetTransferFields, KeyRegFields,
    PaymentFields,
};
pub use group::{assign_group_id, compute_group_id, TxGroup};
pub use id::{display_id, transaction_id, TxId};
pub use signed::{LogicSig, MultisigSig, MultisigSubsig, SignedTxn};
pub use types::TxType;
