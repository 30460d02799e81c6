//! Atomic transaction groups.
//!
//! A group links up to [`MAX_TX_GROUP_SIZE`] transactions so that the ledger
//! accepts all of them or none. The link is a [`TxGroup`]: the ordered list
//! of member IDs, each computed with the member's own `group` field cleared
//! (otherwise a member's ID would depend on the group digest, which depends
//! on the member's ID). The group digest is then written back into every
//! member before signing.
//!
//! ```text
//! members ──clear grp──▶ TxId₀ … TxIdₙ ──▶ TxGroup{txlist} ──"TG"+SHA-512/256──▶ grp
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::builder::Transaction;
use super::types::Digest;
use crate::config::{HashId, HASH_ID_TX_GROUP, MAX_TX_GROUP_SIZE};
use crate::crypto::Hashable;
use crate::encoding::decode::value_to_fixed;
use crate::encoding::wire::write_bin;
use crate::encoding::{CanonicalDecode, CanonicalEncode, FieldMap, FieldReader};
use crate::error::{Result, TxError};

/// The ordered member digests of an atomic group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxGroup {
    /// One digest per member, in execution order.
    pub tx_group_hashes: Vec<Digest>,
}

impl TxGroup {
    /// Wraps an ordered list of member digests.
    pub fn new(tx_group_hashes: Vec<Digest>) -> Self {
        Self { tx_group_hashes }
    }

    /// Builds the group for `txns` in the given order. Each member's
    /// digest is its ID with its `group` field cleared, so passing in
    /// already-grouped transactions yields the same group.
    pub fn from_transactions(txns: &[Transaction]) -> Result<Self> {
        if txns.is_empty() {
            return Err(TxError::EmptyGroup);
        }
        if txns.len() > MAX_TX_GROUP_SIZE {
            return Err(TxError::GroupTooLarge {
                size: txns.len(),
                max: MAX_TX_GROUP_SIZE,
            });
        }

        let tx_group_hashes = txns
            .iter()
            .map(|tx| tx.without_group().id().to_digest())
            .collect();
        Ok(Self { tx_group_hashes })
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.tx_group_hashes.len()
    }

    /// `true` if the group has no members.
    pub fn is_empty(&self) -> bool {
        self.tx_group_hashes.is_empty()
    }

    /// The group digest: SHA-512/256 over `"TG"` and the canonical encoding.
    /// This is the value members carry in their `group` field.
    pub fn digest(&self) -> Digest {
        self.hash()
    }
}

impl CanonicalEncode for TxGroup {
    fn encode_fields(&self, map: &mut FieldMap) {
        map.array("txlist", &self.tx_group_hashes, |buf, digest| {
            write_bin(buf, digest.as_bytes())
        });
    }
}

impl CanonicalDecode for TxGroup {
    fn decode_fields(fields: &mut FieldReader) -> Result<Self> {
        let tx_group_hashes = fields.array("txlist", |value, key| {
            value_to_fixed(value, key).map(Digest::new)
        })?;
        Ok(Self { tx_group_hashes })
    }
}

impl Hashable for TxGroup {
    const HASH_ID: HashId = HASH_ID_TX_GROUP;
}

/// Computes the group digest for `txns`, in order.
pub fn compute_group_id(txns: &[Transaction]) -> Result<Digest> {
    let group = TxGroup::from_transactions(txns)?;
    let digest = group.digest();
    debug!(members = group.len(), group = %digest, "computed transaction group id");
    Ok(digest)
}

/// Computes the group digest for `txns` and writes it into every member.
pub fn assign_group_id(txns: Vec<Transaction>) -> Result<Vec<Transaction>> {
    let digest = compute_group_id(&txns)?;
    Ok(txns.into_iter().map(|tx| tx.with_group(digest)).collect())
}
