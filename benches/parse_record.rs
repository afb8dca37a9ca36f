use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use lodestone::query::{assemble, validate, EpochWindow, QueryMode, RawRecord};

/// A well-formed decimal record with randomized field values.
fn random_record(rng: &mut StdRng) -> Vec<String> {
    let year = 2010.0 + rng.random::<f64>() * 5.0;
    let lat = rng.random::<f64>() * 180.0 - 90.0;
    let lon = rng.random::<f64>() * 360.0 - 180.0;
    let alt = rng.random::<f64>() * 400.0;

    vec![
        format!("{year:.3}"),
        "E".to_string(),
        format!("K{alt:.2}"),
        format!("{lat:.4}"),
        format!("{lon:.4}"),
    ]
}

fn bench_assemble(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    c.bench_function("assemble_decimal_record", |b| {
        b.iter_batched(
            || random_record(&mut rng),
            |tokens| {
                let record = RawRecord::new(tokens).unwrap();
                black_box(assemble(&record).unwrap())
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_assemble_and_validate(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let window = EpochWindow::from_epoch(2010.0);
    c.bench_function("assemble_and_validate_record", |b| {
        b.iter_batched(
            || random_record(&mut rng),
            |tokens| {
                let record = RawRecord::new(tokens).unwrap();
                let parsed = assemble(&record).unwrap();
                black_box(validate(&record, &parsed, window, QueryMode::File))
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_assemble, bench_assemble_and_validate);
criterion_main!(benches);
