use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hg_graph::{gen_random_session, gen_random_store, session, HypergraphStore};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn build_store_bench(c: &mut Criterion) {
    c.bench_function("build_store_5k", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(42);
            let store = gen_random_store(5_000, 10_000, &mut rng);
            black_box(store);
        });
    });

    let mut rng = StdRng::seed_from_u64(7);
    let operations = gen_random_session(2_000, &mut rng);
    c.bench_function("replay_session_2k", |b| {
        b.iter(|| {
            let mut store = HypergraphStore::default();
            let report = session::replay(&mut store, &operations);
            black_box((store, report));
        });
    });
}

criterion_group!(benches, build_store_bench);
criterion_main!(benches);
