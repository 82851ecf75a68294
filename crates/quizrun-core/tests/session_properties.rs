//! Seeded property checks over import, scoring, and the engine lifecycle.

use std::collections::HashMap;

use quizrun_core::engine::{IgnoreReason, Outcome, QuizEngine};
use quizrun_core::model::{Phase, RawQuestion};
use quizrun_core::parser::{build_session, import_quiz, parse_quiz_str};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SEEDS: std::ops::Range<u64> = 0..64;

fn sample_quiz() -> Vec<RawQuestion> {
    (0..6)
        .map(|i| RawQuestion {
            question: format!("Question {i}"),
            keys: (0..=i % 3).map(|k| format!("key {i}.{k}")).collect(),
            distractors: (0..i).map(|d| format!("wrong {i}.{d}")).collect(),
        })
        .collect()
}

fn sorted<T: Ord>(mut v: Vec<T>) -> Vec<T> {
    v.sort();
    v
}

#[test]
fn import_round_trips_counts_and_multisets() {
    let raw = sample_quiz();
    for seed in SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let session = build_session(raw.clone(), &mut rng);
        assert_eq!(session.len(), raw.len());

        let by_text: HashMap<&str, &RawQuestion> =
            raw.iter().map(|r| (r.question.as_str(), r)).collect();

        let mut texts: Vec<&str> = Vec::new();
        for q in &session.questions {
            let source = by_text[q.text.as_str()];
            texts.push(&q.text);
            assert_eq!(q.options.len(), source.option_count());

            let options = sorted(q.options.iter().map(|o| o.text.clone()).collect());
            let expected = sorted(
                source
                    .keys
                    .iter()
                    .chain(&source.distractors)
                    .cloned()
                    .collect(),
            );
            assert_eq!(options, expected, "seed {seed}");

            let keys = sorted(
                q.options
                    .iter()
                    .filter(|o| o.is_correct)
                    .map(|o| o.text.clone())
                    .collect(),
            );
            assert_eq!(keys, sorted(source.keys.clone()));
        }
        assert_eq!(
            sorted(texts),
            sorted(raw.iter().map(|r| r.question.as_str()).collect())
        );
    }
}

#[test]
fn question_order_varies_across_seeds() {
    let raw = sample_quiz();
    let orders: std::collections::HashSet<Vec<String>> = SEEDS
        .map(|seed| {
            build_session(raw.clone(), &mut StdRng::seed_from_u64(seed))
                .questions
                .into_iter()
                .map(|q| q.text)
                .collect()
        })
        .collect();
    assert!(orders.len() > 1);
}

#[test]
fn scoring_matches_set_equality_for_random_play() {
    let json = serde_json::to_string(&sample_quiz()).unwrap();
    for seed in SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut engine = QuizEngine::new();
        engine.import(&json, &mut rng).unwrap();

        let mut expected_score = 0;
        loop {
            let n = engine.current_view().unwrap().options.len();
            let picks: Vec<usize> = (0..n).filter(|_| rng.gen_bool(0.5)).collect();
            for &p in &picks {
                engine.toggle_selection(p);
            }
            if picks.is_empty() {
                assert_eq!(
                    engine.submit(),
                    Outcome::Ignored(IgnoreReason::EmptySelection)
                );
                engine.toggle_selection(0);
            }
            assert_eq!(engine.submit(), Outcome::Applied);

            let session = engine.session().unwrap();
            let q = session.current().unwrap();
            let mut chosen = q.selected.clone();
            chosen.sort_unstable();
            let correct = chosen == q.correct_indices();
            assert_eq!(q.is_answered_correctly(), correct);
            if correct {
                expected_score += 1;
            }
            assert_eq!(session.score, expected_score);

            if engine.advance() == Outcome::Finished {
                break;
            }
        }

        assert_eq!(engine.phase(), Phase::Reported);
        let report = engine.report().unwrap();
        assert_eq!(report.score, expected_score);
        assert_eq!(report.correct.len() as u32, expected_score);
        assert_eq!(report.correct.len() + report.incorrect.len(), report.total);
        assert_eq!(report.review_prompt.is_none(), report.is_perfect());
    }
}

#[test]
fn scenario_single_question() {
    let mut rng = StdRng::seed_from_u64(1);
    let session = import_quiz(
        r#"[{"question":"Q1","keys":["A"],"distractors":["B","C"]}]"#,
        &mut rng,
    )
    .unwrap();
    assert_eq!(session.len(), 1);
    assert_eq!(session.questions[0].options.len(), 3);
    assert_eq!(session.questions[0].correct_indices().len(), 1);
}

#[test]
fn scenario_perfect_run() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut engine = QuizEngine::new();
    engine
        .import(
            r#"[{"question":"Q1","keys":["A"],"distractors":["B","C"]}]"#,
            &mut rng,
        )
        .unwrap();

    let correct = engine
        .current_view()
        .unwrap()
        .options
        .iter()
        .find(|o| o.is_correct)
        .map(|o| o.index)
        .unwrap();
    engine.toggle_selection(correct);
    engine.submit();
    assert_eq!(engine.session().unwrap().score, 1);
    assert_eq!(engine.advance(), Outcome::Finished);

    let report = engine.report().unwrap();
    assert_eq!(report.percentage, 100);
    assert!(report.is_perfect());
    assert!(report.review_prompt.is_none());
}

#[test]
fn malformed_input_is_rejected_without_side_effects() {
    for bad in ["{}", "[{", "", "null", r#"[{"question":"Q"}]"#] {
        assert!(parse_quiz_str(bad).is_err(), "{bad:?} should fail");

        let mut engine = QuizEngine::new();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(engine.import(bad, &mut rng).is_err());
        assert_eq!(engine.phase(), Phase::Importing);
        assert!(engine.session().is_none());
    }
}
