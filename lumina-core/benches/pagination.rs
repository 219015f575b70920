//! Pagination benchmarks

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use lumina_core::reader::{paginate, parse, DEFAULT_PAGE_CHAR_BUDGET};
use lumina_core::storefront::Catalog;

fn long_text() -> String {
    let paragraph = "Call me Ishmael. Some years ago, never mind how long precisely, having \
                     little or no money in my purse, I thought I would sail about a little.\n\n";
    let mut text = String::new();
    for chapter in 0..200 {
        text.push_str(&paragraph.repeat(8));
        text.push_str(&format!("[IMAGE:illustrations/{}.png]", chapter));
    }
    text
}

fn pagination_benchmark(c: &mut Criterion) {
    let catalog = Catalog::builtin();
    let sample = catalog
        .publisher("lumina")
        .and_then(|p| p.book("pub-1"))
        .and_then(|b| b.plain_text())
        .unwrap_or_default()
        .to_string();
    let long = long_text();

    c.bench_function("parse_long_text", |b| {
        b.iter(|| parse(std::hint::black_box(&long)))
    });

    let mut group = c.benchmark_group("paginate");
    for (name, text) in [("catalog_sample", &sample), ("long_text", &long)] {
        let segments = parse(text);
        group.bench_with_input(BenchmarkId::from_parameter(name), &segments, |b, segments| {
            b.iter(|| paginate(std::hint::black_box(segments), DEFAULT_PAGE_CHAR_BUDGET))
        });
    }
    group.finish();
}

criterion_group!(benches, pagination_benchmark);
criterion_main!(benches);
