// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use satmesh::sat::tokenize;
use satmesh::{ParseSession, SatParser, TessellationConfig};

const CUBE: &str = include_str!("../tests/fixtures/cube.sat");
const CYLINDER: &str = include_str!("../tests/fixtures/cylinder.sat");

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");

    group.bench_function("cube", |b| {
        b.iter(|| tokenize(black_box(CUBE)));
    });

    group.bench_function("cylinder", |b| {
        b.iter(|| tokenize(black_box(CYLINDER)));
    });

    group.finish();
}

fn bench_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("session");

    group.bench_function("cube", |b| {
        b.iter(|| ParseSession::new(black_box(CUBE)));
    });

    group.finish();
}

fn bench_tessellate(c: &mut Criterion) {
    let mut group = c.benchmark_group("tessellate");
    let session = ParseSession::new(CYLINDER);

    for segments in [16, 64, 256] {
        let config = TessellationConfig::with_segments(segments, 8);
        group.bench_with_input(BenchmarkId::new("cylinder", segments), &config, |b, config| {
            b.iter(|| session.tessellate(black_box(config)));
        });
    }

    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let parser = SatParser::new();

    c.bench_function("parse_cube", |b| {
        b.iter(|| parser.parse(black_box(CUBE)));
    });
}

criterion_group!(
    benches,
    bench_tokenize,
    bench_session,
    bench_tessellate,
    bench_end_to_end
);
criterion_main!(benches);
