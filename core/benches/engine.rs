//! Benchmarks for building and executing option graphs.
//!
//! Run with: `cargo bench` in the core/ directory.
//!
//! Benchmark groups:
//! 1. create_option_graph: reading intermediate code into an option graph
//! 2. execute: one control cycle over an already built graph

use std::cell::Cell;
use std::fmt::Write;
use std::rc::Rc;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use xabsl_core::api::{Clock, Engine, EngineOptions};

/// A chain of `n` options, each activating the next and writing a sum of
/// its option time and the input `distance` into `speed`.
fn generate_option_chain(n: usize) -> String {
    let mut ic = format!("{}", n);
    for i in 0..n {
        write!(ic, " o{} 0", i).unwrap();
    }
    for i in 0..n {
        let activation = if i + 1 < n {
            format!(" o o{} 0", i + 1)
        } else {
            String::new()
        };
        let actions = if activation.is_empty() { 1 } else { 2 };
        write!(
            ic,
            " o{i} 2 near far far \
             near 1 {actions}{activation} d speed + t i distance 0 i < i distance 0 v 100 t near t far \
             far 0 {actions}{activation} d speed + t i distance 0 i < i distance 0 v 100 t near t far",
        )
        .unwrap();
    }
    ic.push_str(" 1 robot o0");
    ic
}

fn engine(distance: Rc<Cell<f64>>, time: Rc<Cell<u64>>) -> Engine {
    Engine::new(
        EngineOptions::default(),
        Clock::new(move || time.get()),
        |env| {
            env.symbols()
                .register_decimal_input_symbol("distance", distance)?;
            env.symbols()
                .register_decimal_output_symbol("speed", Rc::new(Cell::new(0.0)))
        },
    )
    .expect("Engine creation failed")
}

fn bench_create_option_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_option_graph");

    for size in [10, 50, 200] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let source = generate_option_chain(size);
            let mut engine = engine(Rc::new(Cell::new(0.0)), Rc::new(Cell::new(0)));
            b.iter(|| {
                engine
                    .create_option_graph(black_box(&source))
                    .expect("Construction failed");
            });
        });
    }

    group.finish();
}

fn bench_execute(c: &mut Criterion) {
    let mut group = c.benchmark_group("execute");

    for size in [10, 50, 200] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let distance = Rc::new(Cell::new(0.0));
            let time = Rc::new(Cell::new(0));
            let mut engine = engine(distance.clone(), time.clone());
            engine
                .create_option_graph(&generate_option_chain(size))
                .expect("Construction failed");

            b.iter(|| {
                time.set(time.get() + 10);
                distance.set(if distance.get() < 100.0 { 150.0 } else { 50.0 });
                engine.execute().expect("Execution failed");
                black_box(engine.symbols().decimal_output_value("speed"))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_create_option_graph, bench_execute);
criterion_main!(benches);
