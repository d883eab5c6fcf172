//! Benchmarks for the avl-inventory library.
//!
//! - **tree_bench**: Insert, delete, upsert, lookup and tree building
//! - **query_bench**: Price range, category, combined and traversal queries


use criterion::{criterion_group, criterion_main};

// AvlTree benchmarks
criterion_group!(
    tree_benches,
    tree_bench::tree_operations,
    tree_bench::tree_scaling,
);

// Query benchmarks
criterion_group!(
    query_benches,
    query_bench::query_operations,
    query_bench::query_scaling,
);

criterion_main!(tree_benches, query_benches);
