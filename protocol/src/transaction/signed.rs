//! The signed transaction envelope.
//!
//! [`SignedTxn`] is what gets broadcast: the transaction plus whichever
//! authorization it carries (a plain signature, a multisignature, or a logic
//! signature) and, for rekeyed accounts, the address that authorized it.
//! Producing or checking those signatures is not this crate's business; the
//! envelope only has to encode canonically so that every node sees the same
//! bytes.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::builder::Transaction;
use super::id::TxId;
use super::types::{Address, PublicKey, Signature};
use crate::encoding::decode::{decode_value, value_to_bytes};
use crate::encoding::wire::write_bin;
use crate::encoding::{
    from_canonical_bytes, to_canonical_bytes, CanonicalDecode, CanonicalEncode, FieldMap,
    FieldReader,
};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Multisignature
// ---------------------------------------------------------------------------

/// One participant slot of a multisignature. An unsigned slot keeps its
/// public key and leaves the signature zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MultisigSubsig {
    pub key: PublicKey,
    pub sig: Signature,
}

impl CanonicalEncode for MultisigSubsig {
    fn encode_fields(&self, map: &mut FieldMap) {
        map.fixed("pk", self.key.as_bytes())
            .fixed("s", self.sig.as_bytes());
    }
}

impl CanonicalDecode for MultisigSubsig {
    fn decode_fields(fields: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            key: PublicKey(fields.fixed("pk")?),
            sig: Signature(fields.fixed("s")?),
        })
    }
}

/// A k-of-n multisignature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MultisigSig {
    pub version: u8,
    pub threshold: u8,
    /// Participant slots in the order that defines the multisig address.
    pub subsigs: Vec<MultisigSubsig>,
}

impl MultisigSig {
    /// Returns `true` if this is the zero multisig (no multisig attached).
    pub fn is_blank(&self) -> bool {
        self.version == 0 && self.threshold == 0 && self.subsigs.is_empty()
    }
}

impl CanonicalEncode for MultisigSig {
    fn encode_fields(&self, map: &mut FieldMap) {
        map.uint("v", self.version as u64)
            .uint("thr", self.threshold as u64)
            .array("subsig", &self.subsigs, |buf, subsig| {
                buf.extend_from_slice(&to_canonical_bytes(subsig))
            });
    }
}

impl CanonicalDecode for MultisigSig {
    fn decode_fields(fields: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            version: fields.narrow("v")?,
            threshold: fields.narrow("thr")?,
            subsigs: fields.array("subsig", decode_value)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Logic signature
// ---------------------------------------------------------------------------

/// A logic signature: a program that approves the transaction, optionally
/// delegated by a signature or multisignature over the program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogicSig {
    #[serde(with = "hex::serde")]
    pub logic: Vec<u8>,
    pub sig: Signature,
    pub msig: MultisigSig,
    /// Arguments passed to the program. Hex in JSON.
    #[serde(with = "hex_list")]
    pub args: Vec<Vec<u8>>,
}

impl LogicSig {
    /// Returns `true` if no logic signature is attached.
    pub fn is_blank(&self) -> bool {
        self.logic.is_empty() && self.sig.is_zero() && self.msig.is_blank() && self.args.is_empty()
    }
}

impl CanonicalEncode for LogicSig {
    fn encode_fields(&self, map: &mut FieldMap) {
        map.bytes("l", &self.logic)
            .fixed("sig", self.sig.as_bytes())
            .nested("msig", &self.msig)
            .array("arg", &self.args, |buf, arg| write_bin(buf, arg));
    }
}

impl CanonicalDecode for LogicSig {
    fn decode_fields(fields: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            logic: fields.bytes("l")?,
            sig: Signature(fields.fixed("sig")?),
            msig: fields.nested("msig")?,
            args: fields.array("arg", value_to_bytes)?,
        })
    }
}

// ---------------------------------------------------------------------------
// SignedTxn
// ---------------------------------------------------------------------------

/// A transaction together with its authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignedTxn {
    #[serde(default)]
    pub sig: Signature,
    #[serde(default)]
    pub msig: MultisigSig,
    #[serde(default)]
    pub lsig: LogicSig,
    pub txn: Transaction,
    /// The authorizing address when it differs from the sender (rekeyed
    /// accounts). Zero otherwise.
    #[serde(default)]
    pub auth_addr: Address,
}

impl SignedTxn {
    /// Wraps a transaction with no authorization attached yet.
    pub fn unsigned(txn: Transaction) -> Self {
        Self {
            sig: Signature::ZERO,
            msig: MultisigSig::default(),
            lsig: LogicSig::default(),
            txn,
            auth_addr: Address::ZERO,
        }
    }

    /// Attaches a single-key signature produced elsewhere.
    pub fn with_signature(mut self, sig: Signature) -> Self {
        self.sig = sig;
        self
    }

    /// Returns `true` if any form of authorization is attached.
    pub fn is_signed(&self) -> bool {
        !self.sig.is_zero() || !self.msig.is_blank() || !self.lsig.is_blank()
    }

    /// The ID of the enclosed transaction. Signatures don't affect it.
    pub fn id(&self) -> TxId {
        self.txn.id()
    }

    /// The canonical encoding of the envelope.
    pub fn encode(&self) -> Vec<u8> {
        to_canonical_bytes(self)
    }

    /// Decodes an envelope from its wire encoding.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        trace!(len = bytes.len(), "decoding signed transaction");
        from_canonical_bytes(bytes)
    }
}

impl CanonicalEncode for SignedTxn {
    fn encode_fields(&self, map: &mut FieldMap) {
        map.fixed("sig", self.sig.as_bytes())
            .nested("msig", &self.msig)
            .nested("lsig", &self.lsig)
            .nested("txn", &self.txn)
            .fixed("sgnr", self.auth_addr.as_bytes());
    }
}

impl CanonicalDecode for SignedTxn {
    fn decode_fields(fields: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            sig: Signature(fields.fixed("sig")?),
            msig: fields.nested("msig")?,
            lsig: fields.nested("lsig")?,
            txn: fields.nested("txn")?,
            auth_addr: Address(fields.fixed("sgnr")?),
        })
    }
}

/// Serde adapter: `Vec<Vec<u8>>` as a list of hex strings.
mod hex_list {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(items: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(items.iter().map(hex::encode))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Vec<u8>>, D::Error> {
        let texts = Vec::<String>::deserialize(deserializer)?;
        texts
            .iter()
            .map(|t| hex::decode(t).map_err(serde::de::Error::custom))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TxError;
    use crate::transaction::fields::PaymentFields;
    use crate::transaction::TransactionBuilder;

    fn txn() -> Transaction {
        TransactionBuilder::new(PaymentFields {
            receiver: Address::new([2; 32]),
            amount: 10,
            ..Default::default()
        })
        .sender(Address::new([1; 32]))
        .fee(1_000)
        .valid_rounds(10, 20)
        .build()
    }

    #[test]
    fn unsigned_envelope_is_just_txn() {
        let stx = SignedTxn::unsigned(txn());
        assert!(!stx.is_signed());

        let mut expected = vec![0x81, 0xa3, b't', b'x', b'n'];
        expected.extend(txn().encode());
        assert_eq!(stx.encode(), expected);
    }

    #[test]
    fn signature_does_not_change_id() {
        let unsigned = SignedTxn::unsigned(txn());
        let signed = unsigned.clone().with_signature(Signature::new([7; 64]));
        assert!(signed.is_signed());
        assert_eq!(signed.id(), unsigned.id());
        assert_ne!(signed.encode(), unsigned.encode());
    }

    #[test]
    fn envelope_key_order() {
        let stx = SignedTxn {
            auth_addr: Address::new([3; 32]),
            ..SignedTxn::unsigned(txn()).with_signature(Signature::new([7; 64]))
        };
        let bytes = stx.encode();
        // sgnr < sig < txn
        let pos = |k: &[u8]| bytes.windows(k.len()).position(|w| w == k).unwrap();
        assert!(pos(b"sgnr") < pos(b"sig\xc4"));
        assert!(pos(b"sig\xc4") < pos(b"txn"));
        assert_eq!(bytes[0], 0x83);
    }

    #[test]
    fn multisig_roundtrip_keeps_unsigned_slots() {
        let msig = MultisigSig {
            version: 1,
            threshold: 2,
            subsigs: vec![
                MultisigSubsig {
                    key: PublicKey::new([1; 32]),
                    sig: Signature::new([9; 64]),
                },
                MultisigSubsig {
                    key: PublicKey::new([2; 32]),
                    sig: Signature::ZERO,
                },
                MultisigSubsig::default(),
            ],
        };
        let stx = SignedTxn {
            msig: msig.clone(),
            ..SignedTxn::unsigned(txn())
        };
        let decoded = SignedTxn::decode(&stx.encode()).unwrap();
        assert_eq!(decoded.msig, msig);
        assert_eq!(decoded, stx);
    }

    #[test]
    fn logic_sig_roundtrip() {
        let lsig = LogicSig {
            logic: vec![0x01, 0x20, 0x01, 0x01, 0x22],
            args: vec![b"secret".to_vec(), vec![]],
            ..Default::default()
        };
        let stx = SignedTxn {
            lsig: lsig.clone(),
            ..SignedTxn::unsigned(txn())
        };
        assert!(stx.is_signed());
        let decoded = SignedTxn::decode(&stx.encode()).unwrap();
        assert_eq!(decoded.lsig, lsig);
    }

    #[test]
    fn decode_requires_txn() {
        // {"sig": bin(64 x 7)}
        let mut map = FieldMap::new();
        map.fixed("sig", &[7; 64]);
        assert!(matches!(
            SignedTxn::decode(&map.into_bytes()),
            Err(TxError::MissingTxType)
        ));
    }

    #[test]
    fn json_roundtrip() {
        let stx = SignedTxn {
            lsig: LogicSig {
                logic: vec![0xab],
                args: vec![vec![0x01, 0x02]],
                ..Default::default()
            },
            ..SignedTxn::unsigned(txn())
        };
        let json = serde_json::to_value(&stx).unwrap();
        assert_eq!(json["lsig"]["args"][0], "0102");
        let back: SignedTxn = serde_json::from_value(json).unwrap();
        assert_eq!(back, stx);
    }

    #[test]
    fn json_rejects_unknown_envelope_key() {
        let mut json = serde_json::to_value(SignedTxn::unsigned(txn())).unwrap();
        json["signature"] = serde_json::Value::String("00".repeat(64));
        let err = serde_json::from_value::<SignedTxn>(json).unwrap_err();
        assert!(err.to_string().contains("signature"), "{err}");
    }
}
