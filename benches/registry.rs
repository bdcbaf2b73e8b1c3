#![allow(unused)]
extern crate hmsbeagle;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use hmsbeagle::prelude::*;
use std::hint::black_box;

struct Unavailable;

impl ImplFactory for Unavailable {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn create_impl(&self, _config: &InstanceConfig) -> Result<Option<Box<dyn BeagleImpl>>> {
        Ok(None)
    }
}

struct Cpu;

impl BeagleImpl for Cpu {
    fn initialize_instance(&mut self, details: &mut InstanceDetails) -> Result<()> {
        details.set_resource_number(0);
        details.set_flags(0x10);
        Ok(())
    }
}

struct CpuFactory;

impl ImplFactory for CpuFactory {
    fn name(&self) -> &str {
        "CPU"
    }

    fn create_impl(&self, _config: &InstanceConfig) -> Result<Option<Box<dyn BeagleImpl>>> {
        Ok(Some(Box::new(Cpu)))
    }
}

/// Benchmark a full create, initialize and finalize cycle
///
/// Four unavailable factories are registered ahead of the CPU factory so the measurement
/// includes walking the trial order. Each batch starts from a fresh registry, because retired
/// slots are never reclaimed and a shared registry would grow by one slot per iteration.
fn bench_instance_lifecycle(c: &mut Criterion) {
    let config = InstanceConfig::default()
        .with_state_count(4)
        .with_pattern_count(1000);

    let mut group = c.benchmark_group("registry");
    group.bench_function("create_initialize_finalize", |b| {
        b.iter_batched(
            || {
                InstanceRegistry::new()
                    .with_factory(Unavailable)
                    .with_factory(Unavailable)
                    .with_factory(Unavailable)
                    .with_factory(Unavailable)
                    .with_factory(CpuFactory)
            },
            |mut registry| {
                let instance = registry.create_instance(black_box(&config)).unwrap();
                let mut details = InstanceDetails::new();
                registry.initialize_instance(instance, &mut details).unwrap();
                registry.finalize(instance).unwrap();
                (registry, details)
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_instance_lifecycle);
criterion_main!(benches);
