//! Criterion benchmarks for arbor-id3: tree induction and classification.

use criterion::{Criterion, criterion_group, criterion_main};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use arbor_id3::{CategoricalEncoder, Id3Config, Record, Schema};

fn make_dataset(
    n_samples: usize,
    n_attributes: usize,
    n_values: usize,
    seed: u64,
) -> (Schema, Vec<Record>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut header: Vec<String> = (0..n_attributes).map(|a| format!("a{a}")).collect();
    header.push("class#".to_string());

    let rows: Vec<Vec<String>> = (0..n_samples)
        .map(|_| {
            let ids: Vec<usize> = (0..n_attributes).map(|_| rng.gen_range(0..n_values)).collect();
            let class = (ids[0] + ids[1] + ids[2]) % 3;
            ids.iter()
                .map(|v| format!("v{v}"))
                .chain(std::iter::once(format!("c{class}")))
                .collect()
        })
        .collect();

    let mut enc = CategoricalEncoder::from_header(&header).unwrap();
    let records = enc.encode_rows(&rows).unwrap();
    (enc.into_schema(), records)
}

fn bench_fit(c: &mut Criterion) {
    let (schema, records) = make_dataset(2000, 20, 4, 42);
    let cfg = Id3Config::new();

    c.bench_function("id3_fit_2000x20_4values", |b| {
        b.iter(|| cfg.fit(&schema, &records).unwrap());
    });
}

fn bench_fit_depth_limited(c: &mut Criterion) {
    let (schema, records) = make_dataset(2000, 20, 4, 42);
    let cfg = Id3Config::new().with_max_depth(Some(3));

    c.bench_function("id3_fit_2000x20_depth3", |b| {
        b.iter(|| cfg.fit(&schema, &records).unwrap());
    });
}

fn bench_classify_batch(c: &mut Criterion) {
    let (schema, records) = make_dataset(2000, 20, 4, 42);
    let tree = Id3Config::new().fit(&schema, &records).unwrap();

    c.bench_function("id3_classify_batch_2000x20", |b| {
        b.iter(|| tree.classify_batch(&records).unwrap());
    });
}

criterion_group!(benches, bench_fit, bench_fit_depth_limited, bench_classify_batch);
criterion_main!(benches);
