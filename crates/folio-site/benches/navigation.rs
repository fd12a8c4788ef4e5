//! Benchmarks for chapter listing and navigation.

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use folio_site::{Library, adjacent_in};
use folio_storage::MockStorage;

/// Create a library with `count` chapters in `en`, stored in reverse order.
fn create_library(count: usize) -> Library {
    let storage = (0..count).rev().fold(MockStorage::new(), |storage, i| {
        storage.with_chapter(
            "en",
            format!("chapter-{i:04}"),
            format!("---\ntitle: Chapter {i}\norder: {i}\n---\n# Chapter {i}\n\n## Section\n"),
        )
    });
    Library::new(Arc::new(storage))
}

fn bench_list_chapters(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_chapters");

    for count in [10, 100, 1000] {
        let library = create_library(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &library, |b, library| {
            b.iter(|| library.list_chapters("en").unwrap());
        });
    }

    group.finish();
}

fn bench_resolve_adjacent(c: &mut Criterion) {
    let library = create_library(100);
    let chapters = library.list_chapters("en").unwrap();

    let mut group = c.benchmark_group("navigation");

    group.bench_function("adjacent_in_last", |b| {
        b.iter(|| adjacent_in(&chapters, "chapter-0099"));
    });

    group.bench_function("adjacent_in_miss", |b| {
        b.iter(|| adjacent_in(&chapters, "missing"));
    });

    group.bench_function("resolve_adjacent", |b| {
        b.iter(|| library.resolve_adjacent("en", "chapter-0050").unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_list_chapters, bench_resolve_adjacent);
criterion_main!(benches);
