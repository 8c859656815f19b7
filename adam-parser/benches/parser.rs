use adam_parser::parser::{parse_expr, parse_program};
use criterion::{criterion_group, criterion_main, Criterion, Throughput};

fn expr(source: &str) {
    let _ast = parse_expr(&source.into()).unwrap();
}

fn long_expr(c: &mut Criterion) {
    let mut group = c.benchmark_group("long-expr");

    let mut source = "1".to_string();
    for _i in 0..1000 {
        source.push_str(" + 1");
    }
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("long-expr", |b| b.iter(|| expr(&source)));
}

fn stress_precedence(c: &mut Criterion) {
    let mut group = c.benchmark_group("stress-precedence");

    let mut source = "1".to_string();
    for _i in 0..200 {
        source.push_str(" - 2 / -3 + 5 * !5");
    }
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("stress-precedence", |b| b.iter(|| expr(&source)));
}

fn many_functions(c: &mut Criterion) {
    let mut group = c.benchmark_group("many-functions");

    let mut source = String::new();
    for i in 0..200 {
        source.push_str(&format!(
            "fn f{i}(a, b) {{ let c = a * b; if c {{ return f(c, 1); }} else {{ print(\"no\"); }} }}\n"
        ));
    }
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("many-functions", |b| {
        b.iter(|| parse_program(&source.as_str().into()).unwrap())
    });
}

criterion_group!(benches, long_expr, stress_precedence, many_functions);
criterion_main!(benches);
