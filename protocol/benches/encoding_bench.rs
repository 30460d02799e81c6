// Encoding and identifier benchmarks for ledger transactions.
//
// Covers canonical encoding, decoding, ID derivation and group digest
// computation at various group sizes.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use ledger_txn::transaction::types::{Address, Digest};
use ledger_txn::transaction::{
    compute_group_id, AssetTransferFields, PaymentFields, SignedTxn, Transaction,
    TransactionBuilder,
};

fn payment(amount: u64) -> Transaction {
    TransactionBuilder::new(PaymentFields {
        receiver: Address::new([2; 32]),
        amount,
        ..Default::default()
    })
    .sender(Address::new([1; 32]))
    .fee(1_000)
    .valid_rounds(100, 1_000)
    .genesis_id("mainnet-v1.0")
    .genesis_hash(Digest::new([9; 32]))
    .note(b"invoice 2041".to_vec())
    .build()
}

fn bench_encode(c: &mut Criterion) {
    let tx = payment(1_000_000);
    c.bench_function("canonical/encode_payment", |b| {
        b.iter(|| tx.encode());
    });
}

fn bench_decode(c: &mut Criterion) {
    let bytes = SignedTxn::unsigned(payment(1_000_000)).encode();
    c.bench_function("canonical/decode_signed_txn", |b| {
        b.iter(|| SignedTxn::decode(&bytes).unwrap());
    });
}

fn bench_transaction_id(c: &mut Criterion) {
    let tx = TransactionBuilder::new(AssetTransferFields {
        xfer_asset: 31_566_704,
        asset_amount: 250,
        asset_receiver: Address::new([3; 32]),
        ..Default::default()
    })
    .sender(Address::new([1; 32]))
    .fee(1_000)
    .valid_rounds(100, 1_000)
    .build();

    c.bench_function("id/derive", |b| {
        b.iter(|| tx.id());
    });
    c.bench_function("id/display", |b| {
        b.iter(|| tx.id().to_string());
    });
}

fn bench_group_id(c: &mut Criterion) {
    let mut group = c.benchmark_group("group/compute_id");

    for size in [2, 4, 8, 16] {
        let members: Vec<_> = (0..size).map(payment).collect();

        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &members, |b, members| {
            b.iter(|| compute_group_id(members).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_encode,
    bench_decode,
    bench_transaction_id,
    bench_group_id,
);
criterion_main!(benches);
