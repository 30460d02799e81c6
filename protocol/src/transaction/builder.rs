//! The transaction model and its builder.
//!
//! A [`Transaction`] is a [`Header`] plus exactly one [`TxFields`] variant.
//! In memory that is an honest tagged union; on the wire it is one flat map
//! in which the header fields, the `type` tag and the variant's fields sit
//! side by side under their short keys. The mapping between the two shapes
//! lives in the `CanonicalEncode` / `CanonicalDecode` impls at the bottom of
//! this file and nowhere else. JSON input goes through the same flat shape
//! (`FlatTransaction`) and is held to the same rules: unknown keys are
//! rejected, and another type's fields are accepted only at zero.
//!
//! Nothing here checks that a transaction makes sense to the ledger
//! (`last_valid >= first_valid`, a receiver on a payment, and so on).
//! Construction never fails.

use serde::{Deserialize, Serialize};

use super::fields::{
    AssetConfigFields, AssetFreezeFields, AssetParams, AssetTransferFields, KeyRegFields,
    PaymentFields,
};
use super::id::TxId;
use super::types::{Address, AssetId, Digest, Lease, Round, TxType, VotePk, VrfPk};
use crate::config::{HashId, HASH_ID_TRANSACTION};
use crate::crypto::Hashable;
use crate::encoding::{
    from_canonical_bytes, to_canonical_bytes, CanonicalDecode, CanonicalEncode, FieldMap,
    FieldReader,
};
use crate::error::{Result, TxError};

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// Fields common to every transaction type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Header {
    pub sender: Address,
    pub fee: u64,
    pub first_valid: Round,
    /// Must be `>= first_valid` for the ledger to accept the transaction.
    pub last_valid: Round,
    /// Arbitrary bytes, hex in JSON.
    #[serde(with = "hex::serde")]
    pub note: Vec<u8>,
    pub genesis_id: String,
    pub genesis_hash: Digest,
    /// Digest of the [`super::TxGroup`] this transaction belongs to, or zero.
    pub group: Digest,
    pub lease: Lease,
    /// When set, the sender's authorized signer becomes this address.
    pub rekey_to: Address,
}

impl Header {
    pub const KEYS: &'static [&'static str] =
        &["snd", "fee", "fv", "lv", "note", "gen", "gh", "grp", "lx", "rekey"];
}

impl CanonicalEncode for Header {
    fn encode_fields(&self, map: &mut FieldMap) {
        map.fixed("snd", self.sender.as_bytes())
            .uint("fee", self.fee)
            .uint("fv", self.first_valid)
            .uint("lv", self.last_valid)
            .bytes("note", &self.note)
            .string("gen", &self.genesis_id)
            .fixed("gh", self.genesis_hash.as_bytes())
            .fixed("grp", self.group.as_bytes())
            .fixed("lx", self.lease.as_bytes())
            .fixed("rekey", self.rekey_to.as_bytes());
    }
}

impl CanonicalDecode for Header {
    fn decode_fields(fields: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            sender: Address(fields.fixed("snd")?),
            fee: fields.uint("fee")?,
            first_valid: fields.uint("fv")?,
            last_valid: fields.uint("lv")?,
            note: fields.bytes("note")?,
            genesis_id: fields.string("gen")?,
            genesis_hash: Digest(fields.fixed("gh")?),
            group: Digest(fields.fixed("grp")?),
            lease: Lease(fields.fixed("lx")?),
            rekey_to: Address(fields.fixed("rekey")?),
        })
    }
}

// ---------------------------------------------------------------------------
// TxFields
// ---------------------------------------------------------------------------

/// The type-specific part of a transaction. The variant *is* the type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TxFields {
    #[serde(rename = "pay")]
    Payment(PaymentFields),
    #[serde(rename = "keyreg")]
    KeyRegistration(KeyRegFields),
    #[serde(rename = "acfg")]
    AssetConfig(AssetConfigFields),
    #[serde(rename = "axfer")]
    AssetTransfer(AssetTransferFields),
    #[serde(rename = "afrz")]
    AssetFreeze(AssetFreezeFields),
}

impl TxFields {
    /// The discriminator for this variant.
    pub fn tx_type(&self) -> TxType {
        match self {
            Self::Payment(_) => TxType::Payment,
            Self::KeyRegistration(_) => TxType::KeyRegistration,
            Self::AssetConfig(_) => TxType::AssetConfig,
            Self::AssetTransfer(_) => TxType::AssetTransfer,
            Self::AssetFreeze(_) => TxType::AssetFreeze,
        }
    }

    /// Returns `true` if `key` is a wire tag of any variant.
    pub fn is_variant_key(key: &str) -> bool {
        [
            PaymentFields::KEYS,
            KeyRegFields::KEYS,
            AssetConfigFields::KEYS,
            AssetTransferFields::KEYS,
            AssetFreezeFields::KEYS,
        ]
        .iter()
        .any(|keys| keys.contains(&key))
    }

    /// The wire tag of the first non-zero field of this variant, if any.
    fn first_set_key(&self) -> Option<&'static str> {
        let mut map = FieldMap::new();
        self.encode_payload(&mut map);
        let key = map.keys().next();
        key
    }

    fn encode_payload(&self, map: &mut FieldMap) {
        match self {
            Self::Payment(f) => f.encode_fields(map),
            Self::KeyRegistration(f) => f.encode_fields(map),
            Self::AssetConfig(f) => f.encode_fields(map),
            Self::AssetTransfer(f) => f.encode_fields(map),
            Self::AssetFreeze(f) => f.encode_fields(map),
        }
    }

    fn decode_for(tx_type: TxType, fields: &mut FieldReader) -> Result<Self> {
        Ok(match tx_type {
            TxType::Payment => Self::Payment(PaymentFields::decode_fields(fields)?),
            TxType::KeyRegistration => Self::KeyRegistration(KeyRegFields::decode_fields(fields)?),
            TxType::AssetConfig => Self::AssetConfig(AssetConfigFields::decode_fields(fields)?),
            TxType::AssetTransfer => Self::AssetTransfer(AssetTransferFields::decode_fields(fields)?),
            TxType::AssetFreeze => Self::AssetFreeze(AssetFreezeFields::decode_fields(fields)?),
        })
    }
}

impl CanonicalEncode for TxFields {
    fn encode_fields(&self, map: &mut FieldMap) {
        map.string("type", self.tx_type().as_str());
        self.encode_payload(map);
    }
}

impl From<PaymentFields> for TxFields {
    fn from(f: PaymentFields) -> Self {
        Self::Payment(f)
    }
}

impl From<KeyRegFields> for TxFields {
    fn from(f: KeyRegFields) -> Self {
        Self::KeyRegistration(f)
    }
}

impl From<AssetConfigFields> for TxFields {
    fn from(f: AssetConfigFields) -> Self {
        Self::AssetConfig(f)
    }
}

impl From<AssetTransferFields> for TxFields {
    fn from(f: AssetTransferFields) -> Self {
        Self::AssetTransfer(f)
    }
}

impl From<AssetFreezeFields> for TxFields {
    fn from(f: AssetFreezeFields) -> Self {
        Self::AssetFreeze(f)
    }
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A ledger transaction.
///
/// An immutable value: two transactions with equal fields are the same
/// transaction, have the same canonical bytes and the same [`TxId`].
///
/// # Example
///
/// ```
/// use ledger_txn::transaction::{PaymentFields, TransactionBuilder};
/// use ledger_txn::transaction::types::Address;
///
/// let tx = TransactionBuilder::new(PaymentFields {
///     receiver: Address::new([2; 32]),
///     amount: 1_000_000,
///     ..Default::default()
/// })
/// .sender(Address::new([1; 32]))
/// .fee(1_000)
/// .valid_rounds(100, 1_000)
/// .build();
///
/// assert_eq!(tx.id().to_string().len(), 52);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FlatTransaction")]
pub struct Transaction {
    #[serde(flatten)]
    pub header: Header,
    #[serde(flatten)]
    pub fields: TxFields,
}

impl Transaction {
    /// Assembles a transaction from its parts.
    pub fn new(header: Header, fields: impl Into<TxFields>) -> Self {
        Self {
            header,
            fields: fields.into(),
        }
    }

    /// The transaction's type discriminator.
    pub fn tx_type(&self) -> TxType {
        self.fields.tx_type()
    }

    /// Payment fields, or their zero value if this is not a payment.
    pub fn payment_fields(&self) -> PaymentFields {
        match &self.fields {
            TxFields::Payment(f) => f.clone(),
            _ => PaymentFields::default(),
        }
    }

    /// Key registration fields, or their zero value.
    pub fn keyreg_fields(&self) -> KeyRegFields {
        match &self.fields {
            TxFields::KeyRegistration(f) => f.clone(),
            _ => KeyRegFields::default(),
        }
    }

    /// Asset configuration fields, or their zero value.
    pub fn asset_config_fields(&self) -> AssetConfigFields {
        match &self.fields {
            TxFields::AssetConfig(f) => f.clone(),
            _ => AssetConfigFields::default(),
        }
    }

    /// Asset transfer fields, or their zero value.
    pub fn asset_transfer_fields(&self) -> AssetTransferFields {
        match &self.fields {
            TxFields::AssetTransfer(f) => f.clone(),
            _ => AssetTransferFields::default(),
        }
    }

    /// Asset freeze fields, or their zero value.
    pub fn asset_freeze_fields(&self) -> AssetFreezeFields {
        match &self.fields {
            TxFields::AssetFreeze(f) => f.clone(),
            _ => AssetFreezeFields::default(),
        }
    }

    /// The canonical encoding of this transaction.
    pub fn encode(&self) -> Vec<u8> {
        to_canonical_bytes(self)
    }

    /// Decodes a transaction from its wire encoding.
    ///
    /// Accepts any key order and explicit zeros. Rejects unknown keys,
    /// unknown types, and non-zero fields belonging to another type.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        from_canonical_bytes(bytes)
    }

    /// `"TX" || encode()`: the bytes a signer signs and the ID hashes.
    pub fn signable_bytes(&self) -> Vec<u8> {
        self.to_be_hashed()
    }

    /// The transaction ID: SHA-512/256 of [`Transaction::signable_bytes`].
    pub fn id(&self) -> TxId {
        TxId::from(self.hash())
    }

    /// Whether this transaction carries a group digest.
    pub fn is_grouped(&self) -> bool {
        !self.header.group.is_zero()
    }

    /// Returns a copy with the group digest replaced.
    pub fn with_group(mut self, group: Digest) -> Self {
        self.header.group = group;
        self
    }

    /// Returns a copy with the group digest cleared. Group member digests
    /// are computed over this form.
    pub fn without_group(&self) -> Self {
        self.clone().with_group(Digest::ZERO)
    }
}

impl CanonicalEncode for Transaction {
    fn encode_fields(&self, map: &mut FieldMap) {
        self.header.encode_fields(map);
        self.fields.encode_fields(map);
    }
}

impl CanonicalDecode for Transaction {
    fn decode_fields(fields: &mut FieldReader) -> Result<Self> {
        let header = Header::decode_fields(fields)?;
        let tx_type: TxType = fields.string("type")?.parse()?;
        let variant = TxFields::decode_for(tx_type, fields)?;

        // Whatever is left is either some other variant's field, which we
        // tolerate only at its zero value, or not a transaction field at all.
        for (key, value) in fields.drain() {
            if !TxFields::is_variant_key(&key) {
                return Err(TxError::UnknownField { key });
            }
            if !value.is_zero() {
                return Err(TxError::FieldNotAllowed { key, tx_type });
            }
        }

        Ok(Self {
            header,
            fields: variant,
        })
    }
}

impl Hashable for Transaction {
    const HASH_ID: HashId = HASH_ID_TRANSACTION;
}

// ---------------------------------------------------------------------------
// JSON input
// ---------------------------------------------------------------------------

/// The JSON form of a transaction as one flat object: header, `type`, and
/// the fields of every variant side by side. Unknown keys are an error.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FlatTransaction {
    #[serde(rename = "type")]
    tx_type: Option<TxType>,

    sender: Address,
    fee: u64,
    first_valid: Round,
    last_valid: Round,
    #[serde(with = "hex::serde")]
    note: Vec<u8>,
    genesis_id: String,
    genesis_hash: Digest,
    group: Digest,
    lease: Lease,
    rekey_to: Address,

    receiver: Address,
    amount: u64,
    close_remainder_to: Address,

    vote_pk: VotePk,
    selection_pk: VrfPk,
    vote_first: Round,
    vote_last: Round,
    vote_key_dilution: u64,

    config_asset: AssetId,
    params: AssetParams,

    xfer_asset: AssetId,
    asset_amount: u64,
    asset_sender: Address,
    asset_receiver: Address,
    asset_close_to: Address,

    freeze_account: Address,
    freeze_asset: AssetId,
    asset_frozen: bool,
}

impl TryFrom<FlatTransaction> for Transaction {
    type Error = TxError;

    fn try_from(flat: FlatTransaction) -> Result<Self> {
        let tx_type = flat.tx_type.ok_or(TxError::MissingTxType)?;
        let header = Header {
            sender: flat.sender,
            fee: flat.fee,
            first_valid: flat.first_valid,
            last_valid: flat.last_valid,
            note: flat.note,
            genesis_id: flat.genesis_id,
            genesis_hash: flat.genesis_hash,
            group: flat.group,
            lease: flat.lease,
            rekey_to: flat.rekey_to,
        };
        let candidates: [TxFields; 5] = [
            PaymentFields {
                receiver: flat.receiver,
                amount: flat.amount,
                close_remainder_to: flat.close_remainder_to,
            }
            .into(),
            KeyRegFields {
                vote_pk: flat.vote_pk,
                selection_pk: flat.selection_pk,
                vote_first: flat.vote_first,
                vote_last: flat.vote_last,
                vote_key_dilution: flat.vote_key_dilution,
            }
            .into(),
            AssetConfigFields {
                config_asset: flat.config_asset,
                params: flat.params,
            }
            .into(),
            AssetTransferFields {
                xfer_asset: flat.xfer_asset,
                asset_amount: flat.asset_amount,
                asset_sender: flat.asset_sender,
                asset_receiver: flat.asset_receiver,
                asset_close_to: flat.asset_close_to,
            }
            .into(),
            AssetFreezeFields {
                freeze_account: flat.freeze_account,
                freeze_asset: flat.freeze_asset,
                asset_frozen: flat.asset_frozen,
            }
            .into(),
        ];

        let mut active = None;
        for fields in candidates {
            if fields.tx_type() == tx_type {
                active = Some(fields);
            } else if let Some(key) = fields.first_set_key() {
                return Err(TxError::FieldNotAllowed {
                    key: key.to_owned(),
                    tx_type,
                });
            }
        }
        let fields = active.ok_or(TxError::MissingTxType)?;

        Ok(Self { header, fields })
    }
}

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Transaction`] values.
///
/// The variant payload is fixed up front; header fields default to zero
/// and can be set in any order.
///
/// ```
/// use ledger_txn::transaction::{AssetFreezeFields, TransactionBuilder, TxType};
/// use ledger_txn::transaction::types::Address;
///
/// let tx = TransactionBuilder::new(AssetFreezeFields {
///     freeze_account: Address::new([9; 32]),
///     freeze_asset: 31566704,
///     asset_frozen: true,
/// })
/// .sender(Address::new([1; 32]))
/// .fee(1_000)
/// .valid_rounds(5_000, 6_000)
/// .note(b"compliance hold".to_vec())
/// .build();
///
/// assert_eq!(tx.tx_type(), TxType::AssetFreeze);
/// ```
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    header: Header,
    fields: TxFields,
}

impl TransactionBuilder {
    /// Starts a builder for the given variant payload.
    pub fn new(fields: impl Into<TxFields>) -> Self {
        Self {
            header: Header::default(),
            fields: fields.into(),
        }
    }

    /// Sets the sender address.
    pub fn sender(mut self, sender: Address) -> Self {
        self.header.sender = sender;
        self
    }

    /// Sets the fee.
    pub fn fee(mut self, fee: u64) -> Self {
        self.header.fee = fee;
        self
    }

    /// Sets the first valid round.
    pub fn first_valid(mut self, round: Round) -> Self {
        self.header.first_valid = round;
        self
    }

    /// Sets the last valid round.
    pub fn last_valid(mut self, round: Round) -> Self {
        self.header.last_valid = round;
        self
    }

    /// Sets both ends of the validity window.
    pub fn valid_rounds(self, first: Round, last: Round) -> Self {
        self.first_valid(first).last_valid(last)
    }

    /// Attaches a note.
    pub fn note(mut self, note: Vec<u8>) -> Self {
        self.header.note = note;
        self
    }

    /// Sets the genesis ID string.
    pub fn genesis_id(mut self, id: impl Into<String>) -> Self {
        self.header.genesis_id = id.into();
        self
    }

    /// Sets the genesis hash.
    pub fn genesis_hash(mut self, hash: Digest) -> Self {
        self.header.genesis_hash = hash;
        self
    }

    /// Sets the group digest. Usually left alone and filled in later by
    /// [`super::group::assign_group_id`].
    pub fn group(mut self, group: Digest) -> Self {
        self.header.group = group;
        self
    }

    /// Sets the lease.
    pub fn lease(mut self, lease: Lease) -> Self {
        self.header.lease = lease;
        self
    }

    /// Sets the rekey target.
    pub fn rekey_to(mut self, address: Address) -> Self {
        self.header.rekey_to = address;
        self
    }

    /// Consumes the builder and produces the transaction.
    pub fn build(self) -> Transaction {
        Transaction {
            header: self.header,
            fields: self.fields,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
