//! Probe performance benchmarks

use std::sync::Arc;

use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use upkeeper_common::{CallerAddress, ProbeRequest, UpkeepId};
use upkeeper_probe::{
    registry::{CheckUpkeepOutput, InMemoryRegistry},
    GasMeter, GasUsageProbe,
};

fn bench_gas_meter(c: &mut Criterion) {
    c.bench_function("gas_meter_read", |b| {
        b.iter(|| {
            let meter = GasMeter::start();
            black_box(meter.consumed())
        });
    });
}

/// Probe overhead over an instant-return registry
fn bench_measure(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let registry = InMemoryRegistry::new();
    let upkeep = UpkeepId::from(123u64);
    registry.set_response(
        upkeep,
        CallerAddress::ZERO,
        CheckUpkeepOutput {
            perform_data: Bytes::from_static(b"\xab\xcd"),
            max_payment: 1000,
            gas_limit: 2000,
            gas_price: 3000,
        },
    );
    registry.set_revert(UpkeepId::from(124u64), CallerAddress::ZERO, "Error");
    let probe = Arc::new(GasUsageProbe::new(Arc::new(registry)));

    let mut group = c.benchmark_group("measure");

    group.bench_function("scripted_success", |b| {
        let probe = probe.clone();
        b.iter(|| {
            rt.block_on(async {
                black_box(
                    probe
                        .measure(ProbeRequest::new(upkeep, CallerAddress::ZERO))
                        .await,
                )
            })
        });
    });

    group.bench_function("scripted_revert", |b| {
        let probe = probe.clone();
        b.iter(|| {
            rt.block_on(async {
                black_box(
                    probe
                        .measure(ProbeRequest::new(UpkeepId::from(124u64), CallerAddress::ZERO))
                        .await,
                )
            })
        });
    });

    group.finish();
}

fn bench_id_parsing(c: &mut Criterion) {
    let hex_id = format!("0x{}", "ab".repeat(32));
    c.bench_function("upkeep_id_parse_hex", |b| {
        b.iter(|| black_box(hex_id.parse::<UpkeepId>().unwrap()))
    });
    c.bench_function("upkeep_id_parse_decimal", |b| {
        b.iter(|| black_box("123456789".parse::<UpkeepId>().unwrap()))
    });
}

criterion_group!(benches, bench_gas_meter, bench_measure, bench_id_parsing);
criterion_main!(benches);
