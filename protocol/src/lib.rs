// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Ledger Transactions — Core Library
//!
//! This crate turns a transaction into bytes, and bytes into an identifier
//! that every node on the network agrees on. It sounds simple. It is simple,
//! right up until two implementations disagree about one byte and every
//! transaction ID between them stops matching.
//!
//! ## Architecture
//!
//! - **encoding** — Canonical MessagePack: sorted keys, zero fields omitted.
//! - **crypto** — SHA-512/256 with domain-separation prefixes.
//! - **transaction** — The model, IDs, atomic groups, the signed envelope.
//! - **config** — Hash prefixes, sizes, limits.
//! - **error** — The (small) error surface.
//!
//! ## Design Philosophy
//!
//! 1. Equal values encode to equal bytes. No exceptions, no options.
//! 2. Encoding and ID derivation cannot fail. Only decoding outside input can.
//! 3. The wire tags are a contract with the rest of the network. They never
//!    change.
//!
//! ## Quick start
//!
//! ```
//! use ledger_txn::transaction::{PaymentFields, TransactionBuilder};
//! use ledger_txn::transaction::types::Address;
//!
//! let tx = TransactionBuilder::new(PaymentFields {
//!     receiver: Address::new([2; 32]),
//!     amount: 1_000_000,
//!     ..Default::default()
//! })
//! .sender(Address::new([1; 32]))
//! .fee(1_000)
//! .valid_rounds(100, 1_000)
//! .build();
//!
//! let signable = tx.signable_bytes();
//! assert_eq!(&signable[..2], b"TX");
//! println!("{}", tx.id());
//! ```

pub mod config;
pub mod crypto;
pub mod encoding;
pub mod error;
pub mod transaction;

pub use error::{Result, TxError};
pub use transaction::{SignedTxn, Transaction, TransactionBuilder, TxGroup, TxId};
