use criterion::{black_box, criterion_group, criterion_main, Criterion};

use lessonforge_core::generator::strip_markdown_fences;
use lessonforge_core::question::parse_questions;
use lessonforge_core::slides::parse_slides;

fn numbered_quiz(n: usize) -> String {
    let mut s = String::from("Sure! Here are your questions.\n\n");
    for i in 1..=n {
        s.push_str(&format!(
            "{i}. What is {i} + {i}?\nA. {}\nB. {}\nC. {}\nD. {}\nAnswer: B\n\n",
            i,
            i * 2,
            i * 3,
            i * 4
        ));
    }
    s
}

fn unnumbered_quiz(n: usize) -> String {
    let mut s = String::new();
    for i in 1..=n {
        s.push_str(&format!(
            "Which number is double {i}?\nA. {}\nB. {}\nAnswer: A\n\n",
            i * 2,
            i + 1
        ));
    }
    s
}

fn bench_questions(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_questions");

    let small = numbered_quiz(5);
    let large = numbered_quiz(200);
    let fallback = unnumbered_quiz(50);
    let fenced = format!("```\n{small}```");

    group.bench_function("5_numbered", |b| {
        b.iter(|| parse_questions(black_box(&small)))
    });

    group.bench_function("200_numbered", |b| {
        b.iter(|| parse_questions(black_box(&large)))
    });

    group.bench_function("50_fallback", |b| {
        b.iter(|| parse_questions(black_box(&fallback)))
    });

    group.bench_function("5_fenced", |b| {
        b.iter(|| parse_questions(&strip_markdown_fences(black_box(&fenced))))
    });

    group.finish();
}

fn bench_slides(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_slides");

    let deck: String = (1..=20)
        .map(|i| format!("## Part {i}\n- first point\n- second point\n* third point\n\n"))
        .collect();

    group.bench_function("20_slides", |b| {
        b.iter(|| parse_slides(black_box(&deck), black_box("Oceans")))
    });

    group.finish();
}

criterion_group!(benches, bench_questions, bench_slides);
criterion_main!(benches);
