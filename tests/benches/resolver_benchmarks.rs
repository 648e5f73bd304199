//! # Object Mapper Client Benchmarks
//!
//! | Component | Claim | Target |
//! |-----------|-------|--------|
//! | Merge step | Linear in subtree size | < 1ms at 10,000 paths |
//! | Association pipeline | Two calls per run | Dominated by bus latency |

use criterion::{criterion_group, criterion_main};
use mapper_tests::benchmarks::resolver::{bench_merge, bench_pipeline};

criterion_group!(resolver_benches, bench_merge, bench_pipeline);
criterion_main!(resolver_benches);
