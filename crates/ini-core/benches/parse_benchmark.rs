//! Parsing and analysis throughput on generated documents

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use ini_core::{DiagnosticEngine, Snapshot, SyntaxTree, TreeCache, classify, code_actions};
use std::fmt::Write;
use std::hint::black_box;

/// A document with `sections` sections of ten properties each, sprinkled
/// with duplicates, comments and broken lines
fn generate_document(sections: usize) -> String {
    let mut text = String::from("; generated\nroot=1\n");
    for i in 0..sections {
        let _ = writeln!(text, "[section{}] ; header {i}", i % (sections / 2).max(1));
        for j in 0..10 {
            match j {
                3 => {
                    let _ = writeln!(text, "key{j}");
                }
                7 => {
                    let _ = writeln!(text, "key1 = duplicate {i}");
                }
                _ => {
                    let _ = writeln!(text, "key{j} = value {i}.{j} ; note");
                }
            }
        }
        if i % 5 == 0 {
            text.push_str("#!! stray line\n[broken\n");
        }
        text.push('\n');
    }
    text
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for sections in [10, 100, 1000] {
        let snapshot = Snapshot::from_text(generate_document(sections));
        group.throughput(Throughput::Bytes(snapshot.text().len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(sections), &snapshot, |b, s| {
            b.iter(|| SyntaxTree::parse(black_box(s)));
        });
    }
    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let engine = DiagnosticEngine::new();
    let mut group = c.benchmark_group("analyze");
    for sections in [10, 100, 1000] {
        let snapshot = Snapshot::from_text(generate_document(sections));
        let tree = SyntaxTree::parse(&snapshot);
        group.bench_with_input(BenchmarkId::from_parameter(sections), &tree, |b, t| {
            b.iter(|| engine.analyze_all(black_box(t)));
        });
    }
    group.finish();
}

fn bench_code_actions(c: &mut Criterion) {
    let engine = DiagnosticEngine::new();
    let cache = TreeCache::new();
    let snapshot = Snapshot::from_text(generate_document(100));
    let tree = cache.get_tree(&snapshot);
    let diagnostics = engine.analyze_all(&tree);
    let range = snapshot.full_range();

    c.bench_function("code_actions_100", |b| {
        b.iter(|| code_actions(black_box(&tree), black_box(&diagnostics), range));
    });
}

fn bench_classify(c: &mut Criterion) {
    let snapshot = Snapshot::from_text(generate_document(100));
    let tree = SyntaxTree::parse(&snapshot);
    let range = snapshot.full_range();

    c.bench_function("classify_100", |b| {
        b.iter(|| classify(black_box(&tree), range));
    });
}

fn bench_cache_hit(c: &mut Criterion) {
    let cache = TreeCache::new();
    let snapshot = Snapshot::from_text(generate_document(100));
    cache.get_tree(&snapshot);

    c.bench_function("cache_hit", |b| {
        b.iter(|| cache.get_tree(black_box(&snapshot)));
    });
}

criterion_group!(
    benches,
    bench_parse,
    bench_analyze,
    bench_code_actions,
    bench_classify,
    bench_cache_hit
);
criterion_main!(benches);
