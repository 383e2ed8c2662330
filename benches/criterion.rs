use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use small_cow_vec::SmallCowVec;
use smallvec::SmallVec;

fn empty(c: &mut Criterion) {
    let mut group = c.benchmark_group("empty");
    group.bench_function("small_cow_vec", |b| {
        b.iter(<SmallCowVec<u64, 4>>::default);
    });
    group.bench_function("smallvec", |b| {
        b.iter(<SmallVec<[u64; 4]>>::default);
    });
}

fn push_inline(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_inline");
    group.bench_function("small_cow_vec", |b| {
        b.iter(|| {
            let mut vec = <SmallCowVec<u64, 4>>::new();
            for i in 0..4 {
                vec.push(i);
            }
            vec
        });
    });
    group.bench_function("smallvec", |b| {
        b.iter(|| {
            let mut vec = <SmallVec<[u64; 4]>>::new();
            for i in 0..4 {
                vec.push(i);
            }
            vec
        });
    });
}

fn push_heap(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_heap");
    group.bench_function("small_cow_vec", |b| {
        b.iter(|| {
            let mut vec = <SmallCowVec<u64, 4>>::new();
            for i in 0..64 {
                vec.push(i);
            }
            vec
        });
    });
    group.bench_function("smallvec", |b| {
        b.iter(|| {
            let mut vec = <SmallVec<[u64; 4]>>::new();
            for i in 0..64 {
                vec.push(i);
            }
            vec
        });
    });
    group.bench_function("vec", |b| {
        b.iter(|| {
            let mut vec = Vec::new();
            for i in 0..64u64 {
                vec.push(i);
            }
            vec
        });
    });
}

fn clone_heap(c: &mut Criterion) {
    let mut group = c.benchmark_group("clone_heap");
    group.bench_function("small_cow_vec", |b| {
        let vec = <SmallCowVec<u64, 4>>::from(vec![0; 64]);
        b.iter(|| vec.clone());
    });
    group.bench_function("smallvec", |b| {
        let vec = <SmallVec<[u64; 4]>>::from_vec(vec![0; 64]);
        b.iter(|| vec.clone());
    });
    group.bench_function("vec", |b| {
        let vec = vec![0u64; 64];
        b.iter(|| vec.clone());
    });
}

fn clone_then_mutate(c: &mut Criterion) {
    let mut group = c.benchmark_group("clone_then_mutate");
    group.bench_function("small_cow_vec", |b| {
        let vec = <SmallCowVec<u64, 4>>::from(vec![0; 64]);
        b.iter_batched(
            || vec.clone(),
            |mut vec| {
                vec[0] = 1;
                vec
            },
            BatchSize::SmallInput,
        );
    });
    group.bench_function("smallvec", |b| {
        let vec = <SmallVec<[u64; 4]>>::from_vec(vec![0; 64]);
        b.iter_batched(
            || vec.clone(),
            |mut vec| {
                vec[0] = 1;
                vec
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    empty,
    push_inline,
    push_heap,
    clone_heap,
    clone_then_mutate
);
criterion_main!(benches);
