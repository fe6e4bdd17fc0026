//! # Handle Pool Benchmark
//!
//! Handle resolution runs for every entity a script touches, every frame.
//!
//! Run with: `cargo bench --package scm_core`

// Benchmarks don't need docs
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use scm_core::{EntityCategory, HandlePool, PoolBinding, RawMemory, SimulatedMemory};

const ENTITIES: usize = 0x0100_0000;
const STRIDE: u32 = 0x5A8;

fn host(size: u32) -> (SimulatedMemory, PoolBinding) {
    let mem = SimulatedMemory::new();
    let flags = ENTITIES + size as usize * STRIDE as usize;
    mem.map(ENTITIES, size as usize * STRIDE as usize + size as usize)
        .expect("fresh address space");
    // every other slot live
    for i in 0..size as usize {
        mem.write_u8(flags + i, if i % 2 == 0 { 0x01 } else { 0x81 });
    }
    let binding = PoolBinding {
        entities_base: ENTITIES,
        flags_base: flags,
        size,
        entity_size: STRIDE,
    };
    (mem, binding)
}

fn bench_handle_to_slot(c: &mut Criterion) {
    let (mem, binding) = host(140);
    let pool = HandlePool::from_binding(&mem, EntityCategory::Character, binding);
    let handles: Vec<_> = pool.live_handles().collect();

    c.bench_function("handle_to_slot_live", |b| {
        b.iter(|| {
            for handle in &handles {
                black_box(pool.handle_to_slot(black_box(*handle)));
            }
        });
    });
}

fn bench_live_slots(c: &mut Criterion) {
    let mut group = c.benchmark_group("live_slots");
    for size in [110u32, 140, 350] {
        let (mem, binding) = host(size);
        let pool = HandlePool::from_binding(&mem, EntityCategory::Vehicle, binding);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(pool.live_slots().count()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_handle_to_slot, bench_live_slots);
criterion_main!(benches);
