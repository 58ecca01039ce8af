use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use preview_grid::{normalize_with, NormalizeOptions, RecordSet, RowAlignment};
use serde_json::json;

fn record_set(rows: usize) -> RecordSet {
    let records = (0..rows)
        .map(|i| {
            json!({
                "id": i,
                "name": format!("contact-{i}"),
                "email": format!("contact-{i}@example.com"),
                "active": i % 2 == 0,
                "address": {"city": "London", "zip": format!("N{i}")},
                "tags": ["a", "b", i],
            })
        })
        .collect::<Vec<_>>();
    RecordSet::from_value(serde_json::Value::Array(records)).unwrap_or_default()
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    for rows in [10usize, 1_000, 10_000] {
        let set = record_set(rows);
        for alignment in [RowAlignment::ByKey, RowAlignment::Positional] {
            let options = NormalizeOptions::new().with_alignment(alignment);
            group.bench_with_input(
                BenchmarkId::new(alignment.as_str(), rows),
                &set,
                |b, set| b.iter(|| normalize_with(black_box(set), options)),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
