use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use typetable::{ColSelector, Column, RowSelector, Table, Value, hcat, order};

fn setup_table(n: usize) -> Table {
    let ids: Vec<i64> = (0..n as i64).collect();
    let names: Vec<String> = (0..n).map(|i| format!("user{}", i)).collect();
    let ages: Vec<i64> = (0..n as i64).map(|i| i % 100).collect();
    let active: Vec<bool> = (0..n).map(|i| i % 2 == 0).collect();

    Table::from_named_columns([
        ("id", Column::from(ids)),
        ("name", Column::from(names)),
        ("age", Column::from(ages)),
        ("active", Column::from(active)),
    ])
    .unwrap()
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("Construction");

    for n in [1000, 10000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(n), n, |b, &n| {
            b.iter(|| {
                let table = setup_table(black_box(n));
                black_box(table);
            });
        });
    }
    group.finish();
}

fn bench_mask_filter_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("Mask_Filter_Performance");

    for n in [1000, 10000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(n), n, |b, &n| {
            let table = setup_table(n);
            b.iter(|| {
                let ages = table.column(ColSelector::Name("age")).unwrap();
                let mask = ages.eq_value(&Value::Int(42)).unwrap();
                let hits = table.filter_rows(RowSelector::Mask(&mask)).unwrap();
                black_box(hits);
            });
        });
    }
    group.finish();
}

fn bench_order_performance(c: &mut Criterion) {
    let mut group = c.benchmark_group("Order_Performance");

    for n in [1000, 10000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(n), n, |b, &n| {
            let table = setup_table(n);
            b.iter(|| {
                let sorted = order(&table, |t| {
                    t.project(&[ColSelector::Name("age"), ColSelector::Name("name")])
                })
                .unwrap();
                black_box(sorted);
            });
        });
    }
    group.finish();
}

fn bench_hcat_performance(c: &mut Criterion) {
    let mut group = c.benchmark_group("Hcat_Performance");

    for n in [1000, 10000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(n), n, |b, &n| {
            b.iter_with_setup(
                || (setup_table(n), setup_table(n)),
                |(a, b_table)| {
                    let joined = hcat(&a, &b_table).unwrap();
                    black_box(joined);
                },
            );
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_construction,
    bench_mask_filter_scaling,
    bench_order_performance,
    bench_hcat_performance
);
criterion_main!(benches);
