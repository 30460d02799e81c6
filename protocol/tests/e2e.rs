//! End-to-end tests for the transaction layer.
//!
//! These pin the public behaviour other nodes depend on: the exact canonical
//! bytes and ID of a reference payment, the group digest of a reference
//! group, and the full build → group → wrap → encode → decode flow.
//!
//! The reference vectors were produced independently of this crate (a
//! separate MessagePack writer plus a stock SHA-512/256) and are written out
//! byte for byte. If one of these tests fails, the encoder changed, and
//! every transaction ID on the network changed with it.

use ledger_txn::crypto::sha512_256;
use ledger_txn::transaction::types::{Address, Digest, Lease};
use ledger_txn::transaction::{
    assign_group_id, compute_group_id, display_id, transaction_id, AssetTransferFields,
    PaymentFields, SignedTxn, Transaction, TransactionBuilder, TxGroup, TxId, TxType,
};
use ledger_txn::TxError;

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

const SENDER: Address = Address::new([0x01; 32]);
const RECEIVER: Address = Address::new([0x02; 32]);

/// Mainnet genesis hash.
fn genesis_hash() -> Digest {
    let bytes = hex::decode("c061c4d8fc1dbdded2d7604be4568e3f6d041987ac37bde4b620b5ab39248adf")
        .unwrap();
    Digest::new(bytes.try_into().unwrap())
}

fn reference_payment(amount: u64) -> Transaction {
    TransactionBuilder::new(PaymentFields {
        receiver: RECEIVER,
        amount,
        ..Default::default()
    })
    .sender(SENDER)
    .fee(1_000)
    .valid_rounds(100, 1_000)
    .genesis_hash(genesis_hash())
    .build()
}

// ---------------------------------------------------------------------------
// 1. Golden Vector
// ---------------------------------------------------------------------------

const REFERENCE_ENCODING: &str = concat!(
    "88",
    "a3616d74", "ce000f4240",
    "a3666565", "cd03e8",
    "a26676", "64",
    "a26768", "c420c061c4d8fc1dbdded2d7604be4568e3f6d041987ac37bde4b620b5ab39248adf",
    "a26c76", "cd03e8",
    "a3726376", "c420", "0202020202020202020202020202020202020202020202020202020202020202",
    "a3736e64", "c420", "0101010101010101010101010101010101010101010101010101010101010101",
    "a474797065", "a3706179",
);

const REFERENCE_ID_HEX: &str = "03c1fd514797c7e53467be554fbe9dc00fefec22a93dee133eeb1b74f7af0448";
const REFERENCE_ID: &str = "APA72UKHS7D6KNDHXZKU7PU5YAH673BCVE664EZ65MNXJ55PAREA";

#[test]
fn reference_payment_encoding() {
    let tx = reference_payment(1_000_000);
    assert_eq!(hex::encode(tx.encode()), REFERENCE_ENCODING);
    assert_eq!(tx.encode().len(), 149);
}

#[test]
fn reference_payment_id() {
    let tx = reference_payment(1_000_000);
    assert_eq!(hex::encode(transaction_id(&tx).as_bytes()), REFERENCE_ID_HEX);
    assert_eq!(display_id(&tx), REFERENCE_ID);
    assert_eq!(tx.id().to_string(), REFERENCE_ID);
}

#[test]
fn reference_payment_decodes() {
    let bytes = hex::decode(REFERENCE_ENCODING).unwrap();
    let tx = Transaction::decode(&bytes).unwrap();
    assert_eq!(tx, reference_payment(1_000_000));
    assert_eq!(tx.tx_type(), TxType::Payment);
}

#[test]
fn amount_change_changes_id() {
    assert_eq!(
        reference_payment(100).id().to_string(),
        "O2GMG2FZOD4QYMXIQRTMTIHFQW433NWSJMKQIBPQ3YKUOA2ZISTA"
    );
    assert_eq!(
        reference_payment(101).id().to_string(),
        "D76JAIWHPTVRGGJMKRODDWDIFV7T4BAUDESK3ABOTGCDG7BDCNAA"
    );
}

// ---------------------------------------------------------------------------
// 2. Canonical Properties
// ---------------------------------------------------------------------------

#[test]
fn signable_bytes_are_prefixed() {
    let tx = reference_payment(1_000_000);
    let signable = tx.signable_bytes();
    assert_eq!(&signable[..2], &[0x54, 0x58]);
    assert_eq!(*tx.id().as_bytes(), sha512_256(&signable));
}

#[test]
fn explicit_zero_fields_change_nothing() {
    let base = reference_payment(1_000_000);
    let explicit = TransactionBuilder::new(PaymentFields {
        receiver: RECEIVER,
        amount: 1_000_000,
        close_remainder_to: Address::ZERO,
    })
    .sender(SENDER)
    .fee(1_000)
    .valid_rounds(100, 1_000)
    .genesis_hash(genesis_hash())
    .note(Vec::new())
    .lease(Lease::ZERO)
    .rekey_to(Address::ZERO)
    .genesis_id("")
    .build();

    assert_eq!(explicit.encode(), base.encode());
    assert_eq!(explicit.id(), base.id());
}

#[test]
fn non_canonical_input_decodes_to_canonical_value() {
    // The reference payment with "type" moved first and an explicit zero
    // lease: {"type": "pay", "lx": bin(0 x 32), "amt": ..., "snd": ...}.
    let canonical = hex::decode(REFERENCE_ENCODING).unwrap();
    let mut shuffled = vec![0x89];
    shuffled.extend_from_slice(&[0xa4, b't', b'y', b'p', b'e', 0xa3, b'p', b'a', b'y']);
    shuffled.extend_from_slice(&[0xa2, b'l', b'x', 0xc4, 0x20]);
    shuffled.extend_from_slice(&[0u8; 32]);
    // The other seven entries, without the map header and the trailing "type".
    let type_entry_len = 9;
    shuffled.extend_from_slice(&canonical[1..canonical.len() - type_entry_len]);

    let tx = Transaction::decode(&shuffled).unwrap();
    assert_eq!(tx.encode(), canonical);
    assert_eq!(tx.id().to_string(), REFERENCE_ID);
}

#[test]
fn tx_id_text_roundtrip() {
    let id: TxId = REFERENCE_ID.parse().unwrap();
    assert_eq!(hex::encode(id.as_bytes()), REFERENCE_ID_HEX);
    assert_eq!(id.to_string(), REFERENCE_ID);
}

#[test]
fn lowercase_id_is_rejected() {
    let err = REFERENCE_ID.to_lowercase().parse::<TxId>().unwrap_err();
    assert!(matches!(err, TxError::InvalidTxId(_)));
}

// ---------------------------------------------------------------------------
// 3. Groups
// ---------------------------------------------------------------------------

const GROUP_MEMBER_1: &str = "d6476a8adedb408f226a2e12d197737abf4a9212c19f61e2a4a39758787c9c6e";
const GROUP_MEMBER_2: &str = "20ceb7c5a65e84b440c42180b870d48d652fb7ae202b279e21773f3500f6cccd";
const GROUP_ID: &str = "4261060e26ecf3e5447f4b6136b37a63ed153985b9417b6be21fa658b77bcae4";
const GROUP_ID_SWAPPED: &str = "8df553dbb344f79e39adb670db25051a1fc341202c28b8df7331735e26c53fb0";

#[test]
fn reference_group_digest() {
    let members = [reference_payment(1), reference_payment(2)];
    let group = TxGroup::from_transactions(&members).unwrap();
    assert_eq!(hex::encode(group.tx_group_hashes[0].as_bytes()), GROUP_MEMBER_1);
    assert_eq!(hex::encode(group.tx_group_hashes[1].as_bytes()), GROUP_MEMBER_2);
    assert_eq!(hex::encode(group.digest().as_bytes()), GROUP_ID);
}

#[test]
fn swapping_members_changes_group_digest() {
    let swapped = compute_group_id(&[reference_payment(2), reference_payment(1)]).unwrap();
    assert_eq!(hex::encode(swapped.as_bytes()), GROUP_ID_SWAPPED);
}

#[test]
fn assigned_group_changes_member_ids() {
    let grouped = assign_group_id(vec![reference_payment(1), reference_payment(2)]).unwrap();
    assert_eq!(hex::encode(grouped[0].header.group.as_bytes()), GROUP_ID);
    assert_eq!(
        grouped[0].id().to_string(),
        "KAQB2KVAZ3LFUAQMLHJIQYHSNJTOW3BAZKUYJFEQIOWUQDAJRLLA"
    );
    // The member digest in the group is still the ungrouped ID.
    assert_eq!(
        hex::encode(grouped[0].without_group().id().as_bytes()),
        GROUP_MEMBER_1
    );
}

// ---------------------------------------------------------------------------
// 4. Full Flow
// ---------------------------------------------------------------------------

#[test]
fn build_group_wrap_and_decode() {
    let pay = reference_payment(5_000);
    let opt_in = TransactionBuilder::new(AssetTransferFields {
        xfer_asset: 31_566_704,
        asset_receiver: RECEIVER,
        ..Default::default()
    })
    .sender(RECEIVER)
    .fee(1_000)
    .valid_rounds(100, 1_000)
    .genesis_id("mainnet-v1.0")
    .genesis_hash(genesis_hash())
    .build();

    let grouped = assign_group_id(vec![pay, opt_in]).unwrap();
    let envelopes: Vec<SignedTxn> = grouped.iter().cloned().map(SignedTxn::unsigned).collect();

    for (stx, tx) in envelopes.iter().zip(&grouped) {
        let decoded = SignedTxn::decode(&stx.encode()).unwrap();
        assert_eq!(&decoded.txn, tx);
        assert_eq!(decoded.id(), tx.id());
    }

    // Re-deriving the group from the decoded members reproduces the digest.
    let decoded: Vec<Transaction> = envelopes
        .iter()
        .map(|stx| SignedTxn::decode(&stx.encode()).unwrap().txn)
        .collect();
    assert_eq!(compute_group_id(&decoded).unwrap(), grouped[0].header.group);
}

#[test]
fn json_to_id() {
    let json = serde_json::json!({
        "type": "pay",
        "sender": hex::encode([0x01; 32]),
        "receiver": hex::encode([0x02; 32]),
        "amount": 1_000_000,
        "fee": 1_000,
        "first_valid": 100,
        "last_valid": 1_000,
        "genesis_hash": "c061c4d8fc1dbdded2d7604be4568e3f6d041987ac37bde4b620b5ab39248adf",
    });
    let tx: Transaction = serde_json::from_value(json).unwrap();
    assert_eq!(tx.id().to_string(), REFERENCE_ID);
}
