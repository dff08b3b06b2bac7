use criterion::{black_box, criterion_group, criterion_main, Criterion};
use skipset::{NoDispose, OrdComparator, Options, SkipList};

fn seeded(size: u32) -> SkipList<u32> {
    let options = Options::default().with_seed(0x5eed);
    let mut list = SkipList::with_options(&options, OrdComparator, NoDispose).unwrap();
    for value in 0..size {
        list.insert(value).unwrap();
    }
    list
}

fn bench_insert_linear_500(c: &mut Criterion) {
    c.bench_function("insert_500", |b| {
        b.iter(|| black_box(seeded(500)))
    });
}

fn bench_contains(c: &mut Criterion) {
    for &size in &[500u32, 5000, 50000] {
        let list = seeded(size);
        let probe = size * 2 / 3;
        c.bench_function(&format!("contains_{}", size), |b| {
            b.iter(|| black_box(list.contains(black_box(&probe))))
        });
    }
}

fn bench_insert_remove(c: &mut Criterion) {
    let mut list = seeded(5000);
    c.bench_function("insert_remove_5000", |b| {
        b.iter(|| {
            list.insert(black_box(10_000)).unwrap();
            black_box(list.remove(&10_000));
        })
    });
}

fn bench_iter(c: &mut Criterion) {
    let list = seeded(5000);
    c.bench_function("iter_5000", |b| {
        b.iter(|| {
            for value in list.iter() {
                black_box(value);
            }
        })
    });
}

criterion_group!(
    benches,
    bench_insert_linear_500,
    bench_contains,
    bench_insert_remove,
    bench_iter,
);

criterion_main!(benches);
