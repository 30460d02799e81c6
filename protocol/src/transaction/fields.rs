//! Per-type field sets.
//!
//! Each struct here is the payload of one [`super::TxFields`] variant. On
//! the wire they are flattened into the transaction map under their short
//! tags, so each one pushes into (and reads from) the same map as the
//! header. The tag constants are the interoperability contract: do not
//! rename them.

use serde::{Deserialize, Serialize};

use super::types::{Address, AssetId, Digest, Round, VotePk, VrfPk};
use crate::encoding::{CanonicalDecode, CanonicalEncode, FieldMap, FieldReader};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Payment
// ---------------------------------------------------------------------------

/// Fields of a payment transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentFields {
    pub receiver: Address,
    /// Amount in the smallest currency unit. A zero amount is legal and is
    /// indistinguishable on the wire from "no amount".
    pub amount: u64,
    /// When set, the sender account is closed and its remaining balance
    /// goes here.
    pub close_remainder_to: Address,
}

impl PaymentFields {
    pub const KEYS: &'static [&'static str] = &["rcv", "amt", "close"];
}

impl CanonicalEncode for PaymentFields {
    fn encode_fields(&self, map: &mut FieldMap) {
        map.fixed("rcv", self.receiver.as_bytes())
            .uint("amt", self.amount)
            .fixed("close", self.close_remainder_to.as_bytes());
    }
}

impl CanonicalDecode for PaymentFields {
    fn decode_fields(fields: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            receiver: Address(fields.fixed("rcv")?),
            amount: fields.uint("amt")?,
            close_remainder_to: Address(fields.fixed("close")?),
        })
    }
}

// ---------------------------------------------------------------------------
// Key registration
// ---------------------------------------------------------------------------

/// Fields of a key registration transaction. All zero means "go offline".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyRegFields {
    pub vote_pk: VotePk,
    pub selection_pk: VrfPk,
    pub vote_first: Round,
    pub vote_last: Round,
    pub vote_key_dilution: u64,
}

impl KeyRegFields {
    pub const KEYS: &'static [&'static str] = &["votekey", "selkey", "votefst", "votelst", "votekd"];
}

impl CanonicalEncode for KeyRegFields {
    fn encode_fields(&self, map: &mut FieldMap) {
        map.fixed("votekey", self.vote_pk.as_bytes())
            .fixed("selkey", self.selection_pk.as_bytes())
            .uint("votefst", self.vote_first)
            .uint("votelst", self.vote_last)
            .uint("votekd", self.vote_key_dilution);
    }
}

impl CanonicalDecode for KeyRegFields {
    fn decode_fields(fields: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            vote_pk: VotePk(fields.fixed("votekey")?),
            selection_pk: VrfPk(fields.fixed("selkey")?),
            vote_first: fields.uint("votefst")?,
            vote_last: fields.uint("votelst")?,
            vote_key_dilution: fields.uint("votekd")?,
        })
    }
}

// ---------------------------------------------------------------------------
// Asset configuration
// ---------------------------------------------------------------------------

/// Parameters of an asset. Encoded as a nested map under `apar`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetParams {
    /// Total number of base units ever created.
    pub total: u64,
    /// Digits after the decimal point when displaying base units.
    pub decimals: u32,
    /// Whether new holdings start frozen.
    pub default_frozen: bool,
    pub unit_name: String,
    pub asset_name: String,
    pub url: String,
    /// Commitment to off-chain metadata.
    pub metadata_hash: Digest,
    pub manager: Address,
    pub reserve: Address,
    pub freeze: Address,
    pub clawback: Address,
}

impl CanonicalEncode for AssetParams {
    fn encode_fields(&self, map: &mut FieldMap) {
        map.uint("t", self.total)
            .uint("dc", self.decimals as u64)
            .boolean("df", self.default_frozen)
            .string("un", &self.unit_name)
            .string("an", &self.asset_name)
            .string("au", &self.url)
            .fixed("am", self.metadata_hash.as_bytes())
            .fixed("m", self.manager.as_bytes())
            .fixed("r", self.reserve.as_bytes())
            .fixed("f", self.freeze.as_bytes())
            .fixed("c", self.clawback.as_bytes());
    }
}

impl CanonicalDecode for AssetParams {
    fn decode_fields(fields: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            total: fields.uint("t")?,
            decimals: fields.narrow("dc")?,
            default_frozen: fields.boolean("df")?,
            unit_name: fields.string("un")?,
            asset_name: fields.string("an")?,
            url: fields.string("au")?,
            metadata_hash: Digest(fields.fixed("am")?),
            manager: Address(fields.fixed("m")?),
            reserve: Address(fields.fixed("r")?),
            freeze: Address(fields.fixed("f")?),
            clawback: Address(fields.fixed("c")?),
        })
    }
}

/// Fields of an asset configuration transaction.
///
/// `config_asset == 0` creates a new asset from `params`; all-zero `params`
/// on an existing asset destroys it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfigFields {
    pub config_asset: AssetId,
    pub params: AssetParams,
}

impl AssetConfigFields {
    pub const KEYS: &'static [&'static str] = &["caid", "apar"];

    /// `true` when this transaction creates a new asset.
    pub fn is_creation(&self) -> bool {
        self.config_asset == 0
    }

    /// `true` when this transaction destroys an existing asset.
    pub fn is_destruction(&self) -> bool {
        self.config_asset != 0 && self.params == AssetParams::default()
    }
}

impl CanonicalEncode for AssetConfigFields {
    fn encode_fields(&self, map: &mut FieldMap) {
        map.uint("caid", self.config_asset).nested("apar", &self.params);
    }
}

impl CanonicalDecode for AssetConfigFields {
    fn decode_fields(fields: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            config_asset: fields.uint("caid")?,
            params: fields.nested("apar")?,
        })
    }
}

// ---------------------------------------------------------------------------
// Asset transfer
// ---------------------------------------------------------------------------

/// Fields of an asset transfer transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetTransferFields {
    pub xfer_asset: AssetId,
    /// A zero amount sent to oneself opts the account into the asset.
    pub asset_amount: u64,
    /// Non-zero only for clawback: the account the units are taken from.
    pub asset_sender: Address,
    pub asset_receiver: Address,
    pub asset_close_to: Address,
}

impl AssetTransferFields {
    pub const KEYS: &'static [&'static str] = &["xaid", "aamt", "asnd", "arcv", "aclose"];
}

impl CanonicalEncode for AssetTransferFields {
    fn encode_fields(&self, map: &mut FieldMap) {
        map.uint("xaid", self.xfer_asset)
            .uint("aamt", self.asset_amount)
            .fixed("asnd", self.asset_sender.as_bytes())
            .fixed("arcv", self.asset_receiver.as_bytes())
            .fixed("aclose", self.asset_close_to.as_bytes());
    }
}

impl CanonicalDecode for AssetTransferFields {
    fn decode_fields(fields: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            xfer_asset: fields.uint("xaid")?,
            asset_amount: fields.uint("aamt")?,
            asset_sender: Address(fields.fixed("asnd")?),
            asset_receiver: Address(fields.fixed("arcv")?),
            asset_close_to: Address(fields.fixed("aclose")?),
        })
    }
}

// ---------------------------------------------------------------------------
// Asset freeze
// ---------------------------------------------------------------------------

/// Fields of an asset freeze transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetFreezeFields {
    pub freeze_account: Address,
    pub freeze_asset: AssetId,
    pub asset_frozen: bool,
}

impl AssetFreezeFields {
    pub const KEYS: &'static [&'static str] = &["fadd", "faid", "afrz"];
}

impl CanonicalEncode for AssetFreezeFields {
    fn encode_fields(&self, map: &mut FieldMap) {
        map.fixed("fadd", self.freeze_account.as_bytes())
            .uint("faid", self.freeze_asset)
            .boolean("afrz", self.asset_frozen);
    }
}

impl CanonicalDecode for AssetFreezeFields {
    fn decode_fields(fields: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            freeze_account: Address(fields.fixed("fadd")?),
            freeze_asset: fields.uint("faid")?,
            asset_frozen: fields.boolean("afrz")?,
        })
    }
}
