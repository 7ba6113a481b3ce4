use criterion::{black_box, criterion_group, criterion_main, Criterion};
use footprint_scorer::{FootprintScorer, GradeTier, QuizSession, Selection};

fn full_session(scorer: &FootprintScorer, tier: GradeTier, country: &str, pick: usize) -> QuizSession {
    let mut session = QuizSession::new(tier, country);
    for question in scorer.questions().questions(tier) {
        // Every built-in question has at least one option
        let index = pick.min(question.options.len() - 1);
        let _ = session.answer(scorer.questions(), &question.id, &Selection::Index(index));
    }
    session
}

fn bench_score_session(c: &mut Criterion) {
    let scorer = FootprintScorer::builtin();
    let session = full_session(&scorer, GradeTier::College, "US", 2);

    c.bench_function("scorer.score.college_full", |b| {
        b.iter(|| scorer.score(black_box(&session)));
    });
}

fn bench_score_many_parallel(c: &mut Criterion) {
    let scorer = FootprintScorer::builtin();
    let countries = ["US", "IN", "GB", "AU", "DE", "GL", "ZZ"];
    let sessions: Vec<QuizSession> = (0..1024)
        .map(|i| {
            let tier = GradeTier::all()[i % 3];
            full_session(&scorer, tier, countries[i % countries.len()], i % 3)
        })
        .collect();

    c.bench_function("scorer.score_many_parallel.1024", |b| {
        b.iter(|| scorer.score_many_parallel(black_box(&sessions)));
    });
}

criterion_group!(benches, bench_score_session, bench_score_many_parallel);
criterion_main!(benches);
