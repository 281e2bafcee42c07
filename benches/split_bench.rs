use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use korean_corpora::split::{hash_value, split_assign, SplitPreset};

fn identifiers(nb: usize) -> Vec<String> {
    (0..nb)
        .map(|x| format!("NWRW18000000{:02}.{}.{}", x % 100, x / 100, x % 7))
        .collect()
}

fn hashing(c: &mut Criterion) {
    let ids = identifiers(1000);
    c.bench_function("hash_value 1000 ids", |b| {
        b.iter(|| {
            for id in &ids {
                black_box(hash_value(black_box(id)));
            }
        })
    });
}

fn assignment(c: &mut Criterion) {
    let mut group = c.benchmark_group("split_assign");
    for preset in [SplitPreset::RawCorpus, SplitPreset::DownstreamTask] {
        let scheme = preset.scheme();
        for nb in [100, 10_000] {
            let ids = identifiers(nb);
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", preset), nb),
                &ids,
                |b, ids| {
                    b.iter(|| {
                        ids.iter()
                            .filter(|id| split_assign(id, &scheme.rules[0].predicate))
                            .count()
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, hashing, assignment);
criterion_main!(benches);
