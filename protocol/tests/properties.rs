//! Property tests for the canonical encoding and identifiers.

use proptest::prelude::*;

use ledger_txn::transaction::types::{Address, Digest, Lease, VotePk, VrfPk};
use ledger_txn::transaction::{
    compute_group_id, AssetConfigFields, AssetFreezeFields, AssetParams, AssetTransferFields,
    Header, KeyRegFields, PaymentFields, Transaction, TxFields, TxId,
};

fn address() -> impl Strategy<Value = Address> {
    prop_oneof![
        Just(Address::ZERO),
        prop::array::uniform32(any::<u8>()).prop_map(Address::new),
    ]
}

fn digest() -> impl Strategy<Value = Digest> {
    prop_oneof![
        Just(Digest::ZERO),
        prop::array::uniform32(any::<u8>()).prop_map(Digest::new),
    ]
}

fn key<T: 'static + Clone + std::fmt::Debug>(
    zero: T,
    wrap: fn([u8; 32]) -> T,
) -> impl Strategy<Value = T> {
    prop_oneof![Just(zero), prop::array::uniform32(any::<u8>()).prop_map(wrap)]
}

fn header() -> impl Strategy<Value = Header> {
    (
        address(),
        any::<u64>(),
        any::<u64>(),
        any::<u64>(),
        prop::collection::vec(any::<u8>(), 0..64),
        "[a-z0-9.-]{0,16}",
        digest(),
        digest(),
        prop::array::uniform32(any::<u8>()).prop_map(Lease::new),
        address(),
    )
        .prop_map(
            |(sender, fee, first_valid, last_valid, note, genesis_id, genesis_hash, group, lease, rekey_to)| {
                Header {
                    sender,
                    fee,
                    first_valid,
                    last_valid,
                    note,
                    genesis_id,
                    genesis_hash,
                    group,
                    lease,
                    rekey_to,
                }
            },
        )
}

fn fields() -> impl Strategy<Value = TxFields> {
    prop_oneof![
        (address(), any::<u64>(), address()).prop_map(|(receiver, amount, close_remainder_to)| {
            TxFields::from(PaymentFields {
                receiver,
                amount,
                close_remainder_to,
            })
        }),
        (
            key(VotePk::ZERO, VotePk::new),
            key(VrfPk::ZERO, VrfPk::new),
            any::<u64>(),
            any::<u64>(),
            any::<u64>(),
        )
            .prop_map(
                |(vote_pk, selection_pk, vote_first, vote_last, vote_key_dilution)| {
                    TxFields::from(KeyRegFields {
                        vote_pk,
                        selection_pk,
                        vote_first,
                        vote_last,
                        vote_key_dilution,
                    })
                }
            ),
        (any::<u64>(), any::<u64>(), address(), address(), address()).prop_map(
            |(xfer_asset, asset_amount, asset_sender, asset_receiver, asset_close_to)| {
                TxFields::from(AssetTransferFields {
                    xfer_asset,
                    asset_amount,
                    asset_sender,
                    asset_receiver,
                    asset_close_to,
                })
            }
        ),
        (any::<u64>(), any::<u64>(), any::<u32>(), any::<bool>(), "\\PC{0,8}", address()).prop_map(
            |(config_asset, total, decimals, default_frozen, unit_name, manager)| {
                TxFields::from(AssetConfigFields {
                    config_asset,
                    params: AssetParams {
                        total,
                        decimals,
                        default_frozen,
                        unit_name,
                        manager,
                        ..Default::default()
                    },
                })
            }
        ),
        (address(), any::<u64>(), any::<bool>()).prop_map(
            |(freeze_account, freeze_asset, asset_frozen)| {
                TxFields::from(AssetFreezeFields {
                    freeze_account,
                    freeze_asset,
                    asset_frozen,
                })
            }
        ),
    ]
}

fn transaction() -> impl Strategy<Value = Transaction> {
    (header(), fields()).prop_map(|(header, fields)| Transaction::new(header, fields))
}

proptest! {
    #[test]
    fn encoding_is_deterministic(tx in transaction()) {
        prop_assert_eq!(tx.encode(), tx.clone().encode());
        prop_assert_eq!(tx.id(), tx.clone().id());
    }

    #[test]
    fn decode_inverts_encode(tx in transaction()) {
        let decoded = Transaction::decode(&tx.encode()).unwrap();
        prop_assert_eq!(&decoded, &tx);
        prop_assert_eq!(decoded.encode(), tx.encode());
    }

    #[test]
    fn fee_change_changes_id(tx in transaction()) {
        let mut bumped = tx.clone();
        bumped.header.fee = tx.header.fee.wrapping_add(1);
        prop_assert_ne!(bumped.id(), tx.id());
    }

    #[test]
    fn id_text_roundtrip(bytes in prop::array::uniform32(any::<u8>())) {
        let id = TxId::new(bytes);
        let text = id.to_string();
        prop_assert_eq!(text.len(), 52);
        prop_assert!(text.chars().all(|c| c.is_ascii_uppercase() || ('2'..='7').contains(&c)));
        prop_assert_eq!(text.parse::<TxId>().unwrap(), id);
    }

    #[test]
    fn group_digest_ignores_existing_group(
        txs in prop::collection::vec(transaction(), 1..=4),
        stale in digest(),
    ) {
        let regrouped: Vec<_> = txs.iter().cloned().map(|tx| tx.with_group(stale)).collect();
        prop_assert_eq!(compute_group_id(&txs).unwrap(), compute_group_id(&regrouped).unwrap());
    }

    #[test]
    fn decoding_garbage_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = Transaction::decode(&bytes);
    }
}
