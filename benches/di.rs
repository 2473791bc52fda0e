use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ferrous_injector::*;

// ===== Fixtures =====

struct Leaf;

impl Injectable for Leaf {
    fn construct(_: Args) -> DiResult<Self> {
        Ok(Leaf)
    }
}

struct Branch;

impl Injectable for Branch {
    fn dependencies() -> Vec<ParamType> {
        vec![ParamType::of::<Leaf>(), ParamType::of::<u32>()]
    }

    fn construct(args: Args) -> DiResult<Self> {
        let _leaf: std::sync::Arc<Leaf> = args.required(0)?;
        let _n: u32 = args.value_or(1, 0)?;
        Ok(Branch)
    }
}

macro_rules! chain {
    ($first:ident $(, $rest:ident => $dep:ident)*) => {
        struct $first;
        impl Injectable for $first {
            fn construct(_: Args) -> DiResult<Self> {
                Ok($first)
            }
        }
        $(
            struct $rest;
            impl Injectable for $rest {
                fn dependencies() -> Vec<ParamType> {
                    vec![ParamType::of::<$dep>()]
                }
                fn construct(_: Args) -> DiResult<Self> {
                    Ok($rest)
                }
            }
        )*
    };
}

chain!(C0, C1 => C0, C2 => C1, C3 => C2, C4 => C3, C5 => C4, C6 => C5, C7 => C6);

fn chain_injector() -> Injector {
    let injector = Injector::new();
    injector.register::<C0>().unwrap();
    injector.register::<C1>().unwrap();
    injector.register::<C2>().unwrap();
    injector.register::<C3>().unwrap();
    injector.register::<C4>().unwrap();
    injector.register::<C5>().unwrap();
    injector.register::<C6>().unwrap();
    injector.register::<C7>().unwrap();
    injector
}

// ===== Micro Benchmarks =====

fn bench_singleton_hit(c: &mut Criterion) {
    let injector = Injector::new();
    injector.register::<Leaf>().unwrap();

    // Prime the singleton
    let _ = injector.resolve::<Leaf>().unwrap();

    c.bench_function("singleton_hit", |b| {
        b.iter(|| {
            let v = injector.resolve::<Leaf>().unwrap();
            black_box(v);
        })
    });
}

fn bench_create_with_params(c: &mut Criterion) {
    let injector = Injector::new();
    injector.register::<Leaf>().unwrap();
    injector.register::<Branch>().unwrap();

    let mut group = c.benchmark_group("create");
    group.bench_function("injected", |b| {
        b.iter(|| black_box(injector.create::<Branch>().unwrap()))
    });
    group.bench_function("explicit", |b| {
        let params = [Param::Skip, Param::value(7u32)];
        b.iter(|| black_box(injector.create_with::<Branch>(&params).unwrap()))
    });
    group.finish();
}

fn bench_deep_chain(c: &mut Criterion) {
    c.bench_function("resolve_chain_cold", |b| {
        b.iter_batched(
            chain_injector,
            |injector| black_box(injector.resolve::<C7>().unwrap()),
            criterion::BatchSize::SmallInput,
        )
    });

    let warm = chain_injector();
    warm.resolve::<C7>().unwrap();
    c.bench_function("create_chain_warm", |b| {
        b.iter(|| black_box(warm.create::<C7>().unwrap()))
    });
}

fn bench_tree(c: &mut Criterion) {
    let injector = chain_injector();
    let mut group = c.benchmark_group("tree");

    for include_location in [false, true] {
        group.bench_with_input(
            BenchmarkId::new("roots_and_print", include_location),
            &include_location,
            |b, &include_location| {
                b.iter(|| {
                    let roots = injector.roots().unwrap();
                    black_box(print_tree(&roots, include_location))
                })
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_singleton_hit,
    bench_create_with_params,
    bench_deep_chain,
    bench_tree
);
criterion_main!(benches);
