use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quizcheck_core::model::{Question, QuestionBank};
use quizcheck_core::quiz::QuizEngine;
use quizcheck_core::score::PassMark;
use quizcheck_core::validator::evaluate;

fn make_bank(size: usize) -> QuestionBank {
    let categories = ["Legislation", "Hazards", "Control Measures", "Emergencies"];
    let questions = (0..size)
        .map(|i| {
            Question::new(
                format!("q{i}"),
                format!("Benchmark question {i}?"),
                ["Option A", "Option B", "Option C", "Option D"],
                i % 4,
                format!("Option {} is correct for question {i}.", i % 4),
            )
            .unwrap()
            .with_category(categories[i % categories.len()])
        })
        .collect();
    QuestionBank::new("bench", "Bench Bank", questions).unwrap()
}

fn answer_all<'a>(bank: &'a QuestionBank) -> QuizEngine<'a> {
    let mut quiz = QuizEngine::new(bank).unwrap();
    for (i, q) in bank.iter().enumerate() {
        quiz.select_option(q.id().as_str(), i % 3).unwrap();
    }
    quiz
}

fn bench_evaluate(c: &mut Criterion) {
    let bank = make_bank(1);
    let question = &bank.questions()[0];

    c.bench_function("evaluate", |b| {
        b.iter(|| evaluate(black_box(question), black_box(2)))
    });
}

fn bench_quiz(c: &mut Criterion) {
    let mut group = c.benchmark_group("quiz");
    let bank = make_bank(200);

    group.bench_function("answer_200", |b| b.iter(|| answer_all(black_box(&bank))));

    let completed = answer_all(&bank);
    group.bench_function("score_200", |b| b.iter(|| black_box(&completed).score()));
    group.bench_function("summary_200", |b| {
        b.iter(|| black_box(&completed).summary(PassMark::default()))
    });

    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_quiz);
criterion_main!(benches);
