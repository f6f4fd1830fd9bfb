use std::cell::RefCell;
use std::cmp::Ordering;
use std::env;
use std::rc::Rc;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use once_cell::sync::Lazy;

use heliumsort::MemoryBudget;
use sort_test_tools::{patterns, Sort};

/// Only benchmarks whose name contains this run, `BENCH_FILTER=helium_3c-i32`.
static BENCH_FILTER: Lazy<Option<String>> = Lazy::new(|| env::var("BENCH_FILTER").ok());

/// Print mean comparison counts instead of timing.
static MEASURE_COMP: Lazy<bool> = Lazy::new(|| env::var("MEASURE_COMP").is_ok());

macro_rules! tier_impl {
    ($name:ident, $budget:expr) => {
        struct $name;

        impl Sort for $name {
            fn name() -> String {
                format!("heliumsort_{}", stringify!($name).to_lowercase())
            }

            fn sort<T>(arr: &mut [T])
            where
                T: Ord + Copy,
            {
                heliumsort::sort_with_memory(arr, $budget).unwrap();
            }

            fn sort_by<T, F>(arr: &mut [T], compare: F)
            where
                T: Copy,
                F: FnMut(&T, &T) -> Ordering,
            {
                heliumsort::sort_by_with_memory(arr, $budget, compare).unwrap();
            }
        }
    };
}

tier_impl!(Uranium, MemoryBudget::Uranium);
tier_impl!(Hydrogen, MemoryBudget::Hydrogen);
tier_impl!(Helium3A, MemoryBudget::Helium3A);
tier_impl!(Helium3B, MemoryBudget::Helium3B);
tier_impl!(Helium3C, MemoryBudget::Helium3C);

struct RustStdStable;

impl Sort for RustStdStable {
    fn name() -> String {
        "rust_std_stable".into()
    }

    fn sort<T>(arr: &mut [T])
    where
        T: Ord + Copy,
    {
        arr.sort();
    }

    fn sort_by<T, F>(arr: &mut [T], compare: F)
    where
        T: Copy,
        F: FnMut(&T, &T) -> Ordering,
    {
        arr.sort_by(compare);
    }
}

#[inline(never)]
fn bench_sort<T: Ord + Copy>(
    c: &mut Criterion,
    name: &str,
    test_size: usize,
    transform: &fn(Vec<i32>) -> Vec<T>,
    pattern_provider: &fn(usize) -> Vec<i32>,
    sort_func: impl Fn(&mut [T]),
) {
    let batch_size = if test_size > 30 {
        BatchSize::LargeInput
    } else {
        BatchSize::SmallInput
    };

    c.bench_function(name, |b| {
        b.iter_batched(
            || transform(pattern_provider(test_size)),
            |mut test_data| sort_func(black_box(test_data.as_mut_slice())),
            batch_size,
        )
    });
}

fn measure_comp_count(
    name: &str,
    test_size: usize,
    instrumented_sort_func: impl Fn(),
    comp_count: Rc<RefCell<u64>>,
) {
    // Measure how many comparisons are performed by a specific implementation and input
    // combination.
    let run_count: usize = if test_size < 10_000 {
        1000
    } else if test_size < 100_000 {
        100
    } else {
        10
    };

    *comp_count.borrow_mut() = 0;
    for _ in 0..run_count {
        instrumented_sort_func();
    }

    let total = *comp_count.borrow() / (run_count as u64);
    println!("{name}: mean comparisons: {total}");
}

#[inline(never)]
fn bench_impl<T: Ord + Copy, S: Sort>(
    c: &mut Criterion,
    test_size: usize,
    transform_name: &str,
    transform: &fn(Vec<i32>) -> Vec<T>,
    pattern_name: &str,
    pattern_provider: &fn(usize) -> Vec<i32>,
) {
    let name = format!(
        "{}-{transform_name}-{pattern_name}-{test_size}",
        S::name()
    );

    if let Some(filter) = BENCH_FILTER.as_deref() {
        if !name.contains(filter) {
            return;
        }
    }

    if *MEASURE_COMP {
        // Instrument via sort_by so the element type stays the same.
        let comp_count = Rc::new(RefCell::new(0u64));
        let comp_count_copy = comp_count.clone();
        let instrumented_sort_func = || {
            let mut test_data = transform(pattern_provider(test_size));
            S::sort_by(black_box(test_data.as_mut_slice()), |a, b| {
                *comp_count_copy.borrow_mut() += 1;
                a.cmp(b)
            })
        };
        measure_comp_count(&name, test_size, instrumented_sort_func, comp_count);
    } else {
        bench_sort(c, &name, test_size, transform, pattern_provider, S::sort);
    }
}

fn bench_patterns<T: Ord + Copy>(
    c: &mut Criterion,
    test_size: usize,
    transform_name: &str,
    transform: fn(Vec<i32>) -> Vec<T>,
) {
    let pattern_providers: Vec<(&'static str, fn(usize) -> Vec<i32>)> = vec![
        ("random", patterns::random),
        ("random_dense", |size| {
            patterns::random_uniform(size, 0..=(((size as f64).log2().round()) as i32))
        }),
        ("random_d16", |size| patterns::random_uniform(size, 0..16)),
        ("random_z1", |size| patterns::random_zipf(size, 1.0)),
        ("ascending", patterns::ascending),
        ("descending", patterns::descending),
        ("saws_long", |size| {
            patterns::saw_mixed(size, ((size as f64).log2().round()) as usize)
        }),
        ("pipe_organ", patterns::pipe_organ),
        ("scrambled_head", patterns::scrambled_head),
        ("scrambled_tail", patterns::scrambled_tail),
        ("final_merge_pass", patterns::final_merge_pass),
    ];

    for (pattern_name, pattern_provider) in pattern_providers.iter() {
        macro_rules! bench {
            ($sort_impl:ty) => {
                bench_impl::<T, $sort_impl>(
                    c,
                    test_size,
                    transform_name,
                    &transform,
                    pattern_name,
                    pattern_provider,
                )
            };
        }

        bench!(Uranium);
        bench!(Hydrogen);
        bench!(Helium3A);
        bench!(Helium3B);
        bench!(Helium3C);
        bench!(RustStdStable);
    }
}

fn ensure_true_random() {
    // Ensure that random vecs are actually different.
    let random_vec_a = patterns::random(5);
    let random_vec_b = patterns::random(5);

    assert_ne!(random_vec_a, random_vec_b);
}

fn criterion_benchmark(c: &mut Criterion) {
    // Below 257 every tier uses the same in-place merge sort.
    let test_sizes = [200, 1_000, 4_096, 10_000, 100_000, 1_000_000];

    patterns::use_random_seed_each_time();
    ensure_true_random();

    for test_size in test_sizes {
        bench_patterns(c, test_size, "i32", |values| values);

        bench_patterns(c, test_size, "u64", |values| {
            values
                .iter()
                .map(|val| -> u64 {
                    // Extends the value into the 64 bit range,
                    // while preserving input order.
                    let x = ((*val as i64) + (i32::MAX as i64) + 1) as u64;
                    x.checked_mul(i32::MAX as u64).unwrap()
                })
                .collect()
        });

        // Large Copy value, moves dominate.
        bench_patterns(c, test_size, "1k", |values| {
            values
                .iter()
                .map(|val| {
                    let mut large = [0i32; 256];
                    large[0] = *val;
                    large
                })
                .collect()
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
