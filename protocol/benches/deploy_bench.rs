// Deploy assembly benchmarks.
//
// Covers argument encoding, BLAKE2b hashing at various payload sizes, full
// assembly, approval signing and end-to-end verification.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use casperlabs_deploy::crypto::{hash, KeyPair};
use casperlabs_deploy::deploy::{
    encode_args, sign_deploy, verify_deploy, Arg, ArgValue, CodeDescriptor, DeployBuilder,
    RuntimeArgs,
};

const TIMESTAMP: u64 = 1_700_000_000_000;

fn session(wasm_len: usize) -> CodeDescriptor {
    let args = RuntimeArgs::new()
        .with("target", ArgValue::Bytes(vec![0xab; 32]))
        .with("amount", ArgValue::u512(1_000_000_000u64));
    CodeDescriptor::executable(vec![0x61; wasm_len], args).unwrap()
}

fn bench_encode_args(c: &mut Criterion) {
    let args = vec![
        Arg::new("purse_name", ArgValue::string("my_purse")),
        Arg::new("amount", ArgValue::u512(u128::MAX)),
        Arg::new(
            "targets",
            ArgValue::List((0..16).map(|i| ArgValue::U64(i)).collect()),
        ),
    ];

    c.bench_function("args/encode", |b| {
        b.iter(|| encode_args(&args).unwrap());
    });
}

fn bench_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("blake2b_256");

    for size in [64, 1024, 64 * 1024, 512 * 1024] {
        let data = vec![0x5a; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| hash(data));
        });
    }

    group.finish();
}

fn bench_assemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("deploy/assemble");

    for wasm_len in [1024, 128 * 1024] {
        let code = session(wasm_len);
        group.throughput(Throughput::Bytes(wasm_len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(wasm_len), &code, |b, code| {
            b.iter(|| {
                DeployBuilder::new(code.clone(), [0u8; 32], TIMESTAMP)
                    .payment_amount(10_000u64)
                    .build()
                    .unwrap()
            });
        });
    }

    group.finish();
}

fn bench_sign_deploy(c: &mut Criterion) {
    let keypair = KeyPair::from_seed(&[42u8; 32]);
    let deploy = DeployBuilder::new(session(1024), [0u8; 32], TIMESTAMP)
        .payment_amount(10_000u64)
        .build()
        .unwrap();

    c.bench_function("deploy/sign", |b| {
        b.iter(|| sign_deploy(deploy.clone(), &keypair));
    });
}

fn bench_verify_deploy(c: &mut Criterion) {
    let keypair = KeyPair::from_seed(&[42u8; 32]);
    let deploy = DeployBuilder::new(session(1024), [0u8; 32], TIMESTAMP)
        .payment_amount(10_000u64)
        .build()
        .unwrap();
    let signed = sign_deploy(deploy, &keypair);

    c.bench_function("deploy/verify", |b| {
        b.iter(|| verify_deploy(&signed).unwrap());
    });
}

criterion_group!(
    benches,
    bench_encode_args,
    bench_hash,
    bench_assemble,
    bench_sign_deploy,
    bench_verify_deploy,
);
criterion_main!(benches);
