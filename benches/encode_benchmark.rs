//! Encoding throughput for the checksum and the three builders.
//!
//! Run with: cargo bench --bench encode_benchmark

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use tesla_can::{
    Counter4, Message, StalkState, SteeringControl, build_cruise_stalk, build_epb_enable,
    build_steering_control, checksum, cross_check,
};

fn bench_checksum(c: &mut Criterion) {
    let mut group = c.benchmark_group("checksum");
    for len in [0usize, 3, 7] {
        let bytes = vec![0xA5u8; len];
        group.bench_with_input(BenchmarkId::from_parameter(len), &bytes, |b, bytes| {
            b.iter(|| checksum(black_box(0x488), black_box(bytes.as_slice())))
        });
    }
    group.finish();
}

fn bench_builders(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    group.bench_function("steering_control", |b| {
        let mut counter = Counter4::new();
        b.iter(|| build_steering_control(true, black_box(-512), counter.next().unwrap_or(0)))
    });

    group.bench_function("epb_enable", |b| {
        let mut counter = Counter4::new();
        b.iter(|| build_epb_enable(counter.next().unwrap_or(0)))
    });

    group.bench_function("cruise_stalk", |b| {
        let mut counter = Counter4::new();
        b.iter(|| build_cruise_stalk(black_box(StalkState::Dn1st), counter.next().unwrap_or(0)))
    });

    group.finish();
}

fn bench_checks(c: &mut Criterion) {
    let steering = build_steering_control(true, 900, 12);
    let stalk = build_cruise_stalk(StalkState::Up2nd, 3);

    c.bench_function("decode/steering_control", |b| {
        b.iter(|| SteeringControl::decode(black_box(&steering)))
    });
    c.bench_function("cross_check/cruise_stalk", |b| {
        b.iter(|| cross_check(black_box(&stalk)))
    });
}

criterion_group!(benches, bench_checksum, bench_builders, bench_checks);
criterion_main!(benches);
