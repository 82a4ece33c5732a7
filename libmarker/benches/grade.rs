#[macro_use]
extern crate criterion;
extern crate libmarker;

use criterion::{black_box, Criterion};
use libmarker::{extract_answer, grade_answer};

const PAIRS: [(&str, &str); 3] = [
    ("\\frac{1}{2}", "0.5"),
    ("(1,2)", "(1,2)"),
    ("5 degrees", "5"),
];

fn bench_fast_path(c: &mut Criterion) {
    c.bench_function("grade_fast_path", |b| {
        b.iter(|| {
            for (given, truth) in PAIRS.iter() {
                grade_answer(black_box(Some(given)), black_box(truth));
            }
        })
    });
}

fn bench_symbolic_path(c: &mut Criterion) {
    c.bench_function("grade_symbolic_path", |b| {
        b.iter(|| {
            grade_answer(
                black_box(Some("\\frac{1}{2}+\\frac{1}{2}")),
                black_box("1"),
            )
        })
    });
}

fn bench_extract(c: &mut Criterion) {
    c.bench_function("extract_boxed", |b| {
        b.iter(|| {
            extract_answer(black_box(
                "First we compute \\boxed{3}. Correcting, the answer is \\boxed{5}.",
            ))
        })
    });
}

criterion_group!(
    grade_benches,
    bench_fast_path,
    bench_symbolic_path,
    bench_extract
);
criterion_main!(grade_benches);
