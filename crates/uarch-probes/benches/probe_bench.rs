//! Iteration-scaling harness for the probe kernels.
//!
//! Sweeps each probe across two iteration counts so throughput linearity can
//! be checked, and reports per-variant op counts as criterion throughput.
//! Inapplicable variants on the build target are skipped the same way a GPU
//! harness skips a missing device.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use uarch_probes::{launch, Applicability, LaunchConfig, ProbeKind, ALL_PROBES};

const ITERATION_SWEEP: [u32; 2] = [1000, 2000];

fn bench_lds(c: &mut Criterion) {
    let mut group = c.benchmark_group("lds_latency");
    let cfg = LaunchConfig::single_block();
    let mut sink = vec![0.0f32; cfg.thread_count()];

    for iterations in ITERATION_SWEEP {
        group.throughput(Throughput::Elements(
            ProbeKind::LdsLatency.ops_per_iteration() * u64::from(iterations),
        ));
        group.bench_with_input(
            BenchmarkId::from_parameter(iterations),
            &iterations,
            |b, &iterations| {
                b.iter(|| {
                    launch(ProbeKind::LdsLatency, cfg, iterations, &mut sink).unwrap();
                    black_box(sink[0])
                });
            },
        );
    }

    group.finish();
}

fn bench_mfma(c: &mut Criterion) {
    let mut group = c.benchmark_group("mfma");
    let cfg = LaunchConfig::single_block();
    let mut sink = vec![0.0f32; cfg.thread_count()];

    for &kind in ALL_PROBES.iter().filter(|k| **k != ProbeKind::LdsLatency) {
        if kind.applicability() == Applicability::NotApplicable {
            println!("{} not applicable on this build target, skipping", kind.kernel_name());
            continue;
        }

        for iterations in ITERATION_SWEEP {
            group.throughput(Throughput::Elements(
                kind.ops_per_iteration() * u64::from(iterations),
            ));
            group.bench_with_input(
                BenchmarkId::new(kind.kernel_name(), iterations),
                &iterations,
                |b, &iterations| {
                    b.iter(|| {
                        launch(kind, cfg, iterations, &mut sink).unwrap();
                        black_box(sink[0])
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_lds, bench_mfma);
criterion_main!(benches);
