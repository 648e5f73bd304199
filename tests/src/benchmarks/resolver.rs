//! # Association Resolver Benchmarks
//!
//! - Merge step: linear in the subtree size, independent of endpoint count
//! - Pipeline: end-to-end run over the in-memory bus, both strategies
//!
//! Conditions:
//! - Subtrees of up to 10,000 objects
//! - Endpoint sets covering half the subtree

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use std::time::Duration;

use mapper_bus::InMemoryBus;
use mapper_client::domain::intersect_paths;
use mapper_client::{AssociationApi, MapperConfig, ResolveStrategy};
use mapper_types::{EndpointSet, InterfaceFilter, ObjectPath, QueryDepth};

use crate::fixtures::{chassis, fan, path, Harness, COOLED_BY, INVENTORY};

/// Merge of a shuffled subtree listing against an endpoint set.
pub fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolver-merge");
    group.measurement_time(Duration::from_secs(5));

    for size in [100usize, 1_000, 10_000] {
        // reversed, so the sort has work to do
        let subtree: Vec<ObjectPath> = (0..size).rev().map(fan).collect();
        let endpoints: EndpointSet = (0..size).step_by(2).map(fan).collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("intersect_paths", size), &size, |b, _| {
            b.iter(|| black_box(intersect_paths(subtree.clone(), &endpoints)))
        });
    }

    group.finish();
}

/// Full association run through client, bus and in-memory mapper.
///
/// # Panics
///
/// When the benchmark runtime cannot be built.
#[allow(clippy::expect_used)]
pub fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolver-pipeline");
    group.measurement_time(Duration::from_secs(5));

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("benchmark runtime");

    for fans in [16usize, 256, 2_048] {
        for strategy in [ResolveStrategy::Sequential, ResolveStrategy::Concurrent] {
            let harness = Harness::new(
                InMemoryBus::new(),
                chassis(fans, 4),
                &MapperConfig::default().with_strategy(strategy),
            );
            let association = path(COOLED_BY);
            let root = path(INVENTORY);
            let filter = InterfaceFilter::any();

            group.throughput(Throughput::Elements(fans as u64));
            group.bench_with_input(
                BenchmarkId::new(format!("associated_paths/{}", strategy), fans),
                &fans,
                |b, _| {
                    b.iter(|| {
                        rt.block_on(async {
                            black_box(
                                harness
                                    .client
                                    .resolver()
                                    .get_associated_subtree_paths(
                                        &association,
                                        &root,
                                        QueryDepth::UNLIMITED,
                                        &filter,
                                    )
                                    .await,
                            )
                        })
                    })
                },
            );
        }
    }

    group.finish();
}
