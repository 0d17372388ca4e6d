use chrono::Utc;
use eta_backend::models::answer::{AnswerMap, AnswerValue};
use eta_backend::models::question::{Question, QuestionKind};
use eta_backend::services::scoring_service::ScoringService;
use serde_json::{json, Value as JsonValue};
use uuid::Uuid;

fn question(kind: QuestionKind, points: i32, correct: Option<JsonValue>) -> Question {
    let now = Utc::now();
    Question {
        id: Uuid::new_v4(),
        assessment_id: Uuid::new_v4(),
        kind,
        prompt_en: "How confident do you feel?".into(),
        prompt_es: "¿Qué tan seguro te sientes?".into(),
        options: None,
        points,
        correct_answer: correct,
        position: 0,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn likert_plus_open_choice_sums_to_ninety_percent() {
    // Two questions worth 10 each, no canonical answers: a likert
    // answered 4 earns 8, an answered single choice earns 10.
    let likert = question(QuestionKind::LikertScale, 10, None);
    let choice = question(QuestionKind::SingleChoice, 10, None);

    let mut answers = AnswerMap::new();
    answers.insert(likert.id, AnswerValue::Number(4));
    answers.insert(choice.id, AnswerValue::Text("ready".into()));

    let summary = ScoringService::score_submission(&[likert, choice], &answers);
    assert_eq!(summary.score, 18);
    assert_eq!(summary.max_possible, 20);
    assert_eq!(summary.percentage(), 90);
}

#[test]
fn empty_submission_against_three_questions() {
    let questions = vec![
        question(QuestionKind::LikertScale, 10, None),
        question(QuestionKind::ShortText, 10, None),
        question(QuestionKind::LongText, 5, None),
    ];
    let summary = ScoringService::score_submission(&questions, &AnswerMap::new());
    assert_eq!(summary.score, 0);
    assert_eq!(summary.max_possible, 25);
    assert_eq!(summary.percentage(), 0);
}

#[test]
fn answered_text_questions_earn_full_credit_missing_earn_none() {
    let answered = question(QuestionKind::LongText, 10, None);
    let skipped = question(QuestionKind::ShortText, 10, None);

    let mut answers = AnswerMap::new();
    answers.insert(
        answered.id,
        AnswerValue::Text("I practiced parallel parking with my mom.".into()),
    );

    let summary = ScoringService::score_submission(&[answered, skipped], &answers);
    assert_eq!(summary.score, 10);
    assert_eq!(summary.max_possible, 20);
    assert_eq!(summary.percentage(), 50);
}

#[test]
fn likert_full_scale_table() {
    let q = question(QuestionKind::LikertScale, 10, None);
    for (value, expected) in [(0, 0), (1, 2), (2, 4), (3, 6), (4, 8), (5, 10)] {
        let mut answers = AnswerMap::new();
        answers.insert(q.id, AnswerValue::Number(value));
        let summary = ScoringService::score_submission(std::slice::from_ref(&q), &answers);
        assert_eq!(summary.score, expected, "likert {value}");
    }
}

#[test]
fn multiple_choice_set_equality_is_all_or_nothing() {
    let q = question(
        QuestionKind::MultipleChoice,
        10,
        Some(json!(["mirrors", "seatbelt", "headlights"])),
    );

    let score_for = |selected: &[&str]| {
        let mut answers = AnswerMap::new();
        answers.insert(
            q.id,
            AnswerValue::Many(selected.iter().map(|s| s.to_string()).collect()),
        );
        ScoringService::score_submission(std::slice::from_ref(&q), &answers).score
    };

    assert_eq!(score_for(&["seatbelt", "headlights", "mirrors"]), 10);
    assert_eq!(score_for(&["mirrors", "seatbelt"]), 0);
    assert_eq!(score_for(&["mirrors", "seatbelt", "headlights", "horn"]), 0);
    assert_eq!(score_for(&["wipers"]), 0);
}

#[test]
fn score_never_exceeds_max_and_percentage_stays_bounded() {
    let questions = vec![
        question(QuestionKind::LikertScale, 7, None),
        question(QuestionKind::SingleChoice, 3, Some(json!("a"))),
        question(QuestionKind::Rating, 5, Some(json!(5))),
    ];
    let mut answers = AnswerMap::new();
    for q in &questions {
        answers.insert(q.id, AnswerValue::Number(5));
    }
    // Single choice expects "a" but got 5: zero. Rating matches. Likert 5/5.
    let summary = ScoringService::score_submission(&questions, &answers);
    assert_eq!(summary.score, 12);
    assert_eq!(summary.max_possible, 15);
    assert!(summary.score <= summary.max_possible);
    let pct = summary.percentage();
    assert!((0..=100).contains(&pct));
}
