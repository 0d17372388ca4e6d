use crate::models::answer::{AnswerMap, AnswerValue};
use crate::models::question::{Question, QuestionKind, LIKERT_MAX};
use serde_json::Value as JsonValue;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreSummary {
    pub score: i32,
    pub max_possible: i32,
}

impl ScoreSummary {
    /// Integer percentage in [0, 100]. An assessment with no scorable
    /// questions yields 0, never a division error.
    pub fn percentage(&self) -> i32 {
        if self.max_possible > 0 {
            (100.0 * self.score as f64 / self.max_possible as f64).round() as i32
        } else {
            0
        }
    }
}

pub struct ScoringService;

impl ScoringService {
    /// Score a submission against the assessment's active questions.
    /// Every question contributes its point value to `max_possible`,
    /// answered or not; missing answers simply earn zero.
    pub fn score_submission(questions: &[Question], answers: &AnswerMap) -> ScoreSummary {
        let mut summary = ScoreSummary {
            score: 0,
            max_possible: 0,
        };
        for question in questions {
            summary.max_possible += question.points;
            summary.score += score_question(question, answers.get(&question.id));
        }
        summary
    }
}

/// Points earned for a single question, dispatched on the question kind
/// and whether a canonical correct answer exists.
fn score_question(question: &Question, answer: Option<&AnswerValue>) -> i32 {
    let Some(answer) = answer else {
        return 0;
    };
    match (question.kind, question.correct_answer.as_ref()) {
        // Likert answers score proportionally whether or not a canonical
        // value is stored; the canonical value is ignored for this kind.
        (QuestionKind::LikertScale, _) => likert_points(question.points, answer),
        (QuestionKind::SingleChoice | QuestionKind::Rating, Some(expected)) => {
            if answer.to_json() == *expected {
                question.points
            } else {
                0
            }
        }
        (QuestionKind::MultipleChoice, Some(expected)) => {
            if selections_match(answer, expected) {
                question.points
            } else {
                0
            }
        }
        // Free-text and canon-less questions earn full credit once answered.
        _ => question.points,
    }
}

fn likert_points(points: i32, answer: &AnswerValue) -> i32 {
    let value = answer.as_number().unwrap_or(0).clamp(0, LIKERT_MAX);
    (points as f64 * value as f64 / LIKERT_MAX as f64).round() as i32
}

/// Set equality between the submitted choices and the canonical set.
/// Order-independent, no partial credit for subsets or supersets.
fn selections_match(answer: &AnswerValue, expected: &JsonValue) -> bool {
    let Some(submitted) = answer.as_many() else {
        return false;
    };
    let Some(expected_items) = expected.as_array() else {
        return false;
    };
    let mut canonical: HashSet<&str> = HashSet::new();
    for item in expected_items {
        match item.as_str() {
            Some(s) => {
                canonical.insert(s);
            }
            None => return false,
        }
    }
    let submitted: HashSet<&str> = submitted.iter().map(|s| s.as_str()).collect();
    submitted == canonical
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    fn question(kind: QuestionKind, points: i32, correct: Option<JsonValue>) -> Question {
        let now = Utc::now();
        Question {
            id: Uuid::new_v4(),
            assessment_id: Uuid::new_v4(),
            kind,
            prompt_en: "prompt".into(),
            prompt_es: "pregunta".into(),
            options: None,
            points,
            correct_answer: correct,
            position: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn answers(entries: Vec<(Uuid, AnswerValue)>) -> AnswerMap {
        entries.into_iter().collect()
    }

    #[test]
    fn empty_question_list_scores_zero_without_dividing() {
        let summary = ScoringService::score_submission(&[], &AnswerMap::new());
        assert_eq!(summary.score, 0);
        assert_eq!(summary.max_possible, 0);
        assert_eq!(summary.percentage(), 0);
    }

    #[test]
    fn unanswered_questions_count_toward_max_only() {
        let q = question(QuestionKind::ShortText, 10, None);
        let summary = ScoringService::score_submission(std::slice::from_ref(&q), &AnswerMap::new());
        assert_eq!(summary.score, 0);
        assert_eq!(summary.max_possible, 10);
    }

    #[test]
    fn canonless_non_likert_answers_get_full_credit() {
        for kind in [
            QuestionKind::SingleChoice,
            QuestionKind::MultipleChoice,
            QuestionKind::Rating,
            QuestionKind::ShortText,
            QuestionKind::LongText,
        ] {
            let q = question(kind, 10, None);
            let map = answers(vec![(q.id, AnswerValue::Text("anything".into()))]);
            let summary = ScoringService::score_submission(std::slice::from_ref(&q), &map);
            assert_eq!(summary.score, 10, "kind {:?}", kind);
        }
    }

    #[test]
    fn likert_scores_proportionally() {
        let q = question(QuestionKind::LikertScale, 10, None);
        let cases = [(1, 2), (2, 4), (3, 6), (4, 8), (5, 10)];
        for (value, expected) in cases {
            let map = answers(vec![(q.id, AnswerValue::Number(value))]);
            let summary = ScoringService::score_submission(std::slice::from_ref(&q), &map);
            assert_eq!(summary.score, expected, "likert value {}", value);
        }
    }

    #[test]
    fn likert_rounds_to_nearest_point() {
        // 7 points at 3/5 = 4.2 -> 4; at 4/5 = 5.6 -> 6
        let q = question(QuestionKind::LikertScale, 7, None);
        let map = answers(vec![(q.id, AnswerValue::Number(3))]);
        assert_eq!(
            ScoringService::score_submission(std::slice::from_ref(&q), &map).score,
            4
        );
        let map = answers(vec![(q.id, AnswerValue::Number(4))]);
        assert_eq!(
            ScoringService::score_submission(std::slice::from_ref(&q), &map).score,
            6
        );
    }

    #[test]
    fn likert_zero_or_missing_or_non_numeric_earns_nothing() {
        let q = question(QuestionKind::LikertScale, 10, None);
        let map = answers(vec![(q.id, AnswerValue::Number(0))]);
        assert_eq!(
            ScoringService::score_submission(std::slice::from_ref(&q), &map).score,
            0
        );
        assert_eq!(
            ScoringService::score_submission(std::slice::from_ref(&q), &AnswerMap::new()).score,
            0
        );
        let map = answers(vec![(q.id, AnswerValue::Text("5".into()))]);
        assert_eq!(
            ScoringService::score_submission(std::slice::from_ref(&q), &map).score,
            0
        );
    }

    #[test]
    fn likert_value_above_ceiling_is_clamped() {
        let q = question(QuestionKind::LikertScale, 10, None);
        let map = answers(vec![(q.id, AnswerValue::Number(9))]);
        assert_eq!(
            ScoringService::score_submission(std::slice::from_ref(&q), &map).score,
            10
        );
    }

    #[test]
    fn likert_ignores_canonical_answer() {
        let q = question(QuestionKind::LikertScale, 10, Some(json!(5)));
        let map = answers(vec![(q.id, AnswerValue::Number(2))]);
        assert_eq!(
            ScoringService::score_submission(std::slice::from_ref(&q), &map).score,
            4
        );
    }

    #[test]
    fn single_choice_exact_match_all_or_nothing() {
        let q = question(QuestionKind::SingleChoice, 10, Some(json!("b")));
        let map = answers(vec![(q.id, AnswerValue::Text("b".into()))]);
        assert_eq!(
            ScoringService::score_submission(std::slice::from_ref(&q), &map).score,
            10
        );
        let map = answers(vec![(q.id, AnswerValue::Text("a".into()))]);
        assert_eq!(
            ScoringService::score_submission(std::slice::from_ref(&q), &map).score,
            0
        );
    }

    #[test]
    fn rating_with_canonical_compares_exactly() {
        let q = question(QuestionKind::Rating, 10, Some(json!(4)));
        let map = answers(vec![(q.id, AnswerValue::Number(4))]);
        assert_eq!(
            ScoringService::score_submission(std::slice::from_ref(&q), &map).score,
            10
        );
        let map = answers(vec![(q.id, AnswerValue::Number(3))]);
        assert_eq!(
            ScoringService::score_submission(std::slice::from_ref(&q), &map).score,
            0
        );
    }

    #[test]
    fn multiple_choice_requires_set_equality() {
        let q = question(QuestionKind::MultipleChoice, 10, Some(json!(["a", "c"])));
        let full = |items: &[&str]| {
            let map = answers(vec![(
                q.id,
                AnswerValue::Many(items.iter().map(|s| s.to_string()).collect()),
            )]);
            ScoringService::score_submission(std::slice::from_ref(&q), &map).score
        };
        assert_eq!(full(&["a", "c"]), 10);
        assert_eq!(full(&["c", "a"]), 10, "order must not matter");
        assert_eq!(full(&["a"]), 0, "strict subset");
        assert_eq!(full(&["a", "b", "c"]), 0, "strict superset");
        assert_eq!(full(&["b", "d"]), 0, "disjoint");
        assert_eq!(full(&[]), 0, "empty selection");
    }

    #[test]
    fn mixed_submission_matches_documented_scenario() {
        // Likert 10pt answered 4 -> 8, single choice 10pt with no
        // canonical answered -> 10; 18/20 = 90%.
        let likert = question(QuestionKind::LikertScale, 10, None);
        let choice = question(QuestionKind::SingleChoice, 10, None);
        let map = answers(vec![
            (likert.id, AnswerValue::Number(4)),
            (choice.id, AnswerValue::Text("a".into())),
        ]);
        let summary = ScoringService::score_submission(&[likert, choice], &map);
        assert_eq!(summary.score, 18);
        assert_eq!(summary.max_possible, 20);
        assert_eq!(summary.percentage(), 90);
    }

    #[test]
    fn empty_answer_map_scores_each_kind_as_missing() {
        let qs = vec![
            question(QuestionKind::LikertScale, 10, None),
            question(QuestionKind::ShortText, 10, None),
            question(QuestionKind::SingleChoice, 10, None),
        ];
        let summary = ScoringService::score_submission(&qs, &AnswerMap::new());
        assert_eq!(summary.score, 0);
        assert_eq!(summary.max_possible, 30);
    }

    #[test]
    fn percentage_is_always_in_range() {
        let q = question(QuestionKind::ShortText, 3, None);
        let map = answers(vec![(q.id, AnswerValue::Text("done".into()))]);
        let summary = ScoringService::score_submission(std::slice::from_ref(&q), &map);
        assert_eq!(summary.percentage(), 100);
        assert!(summary.score <= summary.max_possible);
    }
}
