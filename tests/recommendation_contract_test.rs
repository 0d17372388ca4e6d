use chrono::Utc;
use eta_backend::models::answer::{AnswerMap, AnswerValue};
use eta_backend::models::recommendation::RecommendationRule;
use eta_backend::services::recommendation_service::{RecommendationService, RuleCondition};
use serde_json::{json, Value as JsonValue};
use uuid::Uuid;

fn rule(condition_type: &str, condition: JsonValue, priority: i32) -> RecommendationRule {
    let now = Utc::now();
    RecommendationRule {
        id: Uuid::new_v4(),
        assessment_id: Uuid::new_v4(),
        condition_type: condition_type.into(),
        condition,
        priority,
        title_en: "Review the signs module".into(),
        title_es: "Repasa el módulo de señales".into(),
        body_en: "Spend more time on road signs before the next quiz.".into(),
        body_es: "Dedica más tiempo a las señales antes del próximo cuestionario.".into(),
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn adjacent_ranges_partition_the_score_axis() {
    // Three bands over a 0..=170 domain: below 68, 68..=119, above 119.
    let low = rule("score_range", json!({"max_score": 67}), 1);
    let mid = rule("score_range", json!({"min_score": 68, "max_score": 119}), 2);
    let high = rule("score_range", json!({"min_score": 120}), 3);
    let rules = vec![low, mid, high];

    let answers = AnswerMap::new();
    for score in [0, 67, 68, 90, 119, 120, 170] {
        let matched = RecommendationService::select_applicable(&rules, score, &answers);
        assert_eq!(matched.len(), 1, "score {score} must hit exactly one band");
    }
    // Boundary values land in the adjoining band, inclusively.
    assert_eq!(
        RecommendationService::select_applicable(&rules, 68, &answers)[0].priority,
        2
    );
    assert_eq!(
        RecommendationService::select_applicable(&rules, 119, &answers)[0].priority,
        2
    );
}

#[test]
fn all_satisfied_rules_apply_in_priority_order() {
    let rules = vec![
        rule("always", json!({}), 5),
        rule("score_range", json!({"min_score": 50}), 1),
        rule("score_range", json!({"max_score": 90}), 3),
    ];
    // Rules arrive ordered by priority from the store; mirror that.
    let mut ordered = rules.clone();
    ordered.sort_by_key(|r| r.priority);

    let matched = RecommendationService::select_applicable(&ordered, 75, &AnswerMap::new());
    let priorities: Vec<i32> = matched.iter().map(|r| r.priority).collect();
    assert_eq!(priorities, vec![1, 3, 5]);
}

#[test]
fn malformed_rules_are_excluded_without_error() {
    let rules = vec![
        rule("score_range", json!({}), 1),
        rule("answer_equals", json!({"answer_value": "yes"}), 2),
        rule("celebrate", json!({}), 3),
        rule("always", json!({}), 4),
    ];
    let matched = RecommendationService::select_applicable(&rules, 100, &AnswerMap::new());
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].priority, 4);
}

#[test]
fn answer_equals_matches_on_deep_equality_only() {
    let question_id = Uuid::new_v4();
    let r = rule(
        "answer_equals",
        json!({"question_id": question_id.to_string(), "answer_value": "with_parent"}),
        1,
    );
    let rules = vec![r];

    let mut answers = AnswerMap::new();
    answers.insert(question_id, AnswerValue::Text("with_parent".into()));
    assert_eq!(
        RecommendationService::select_applicable(&rules, 0, &answers).len(),
        1
    );

    answers.insert(question_id, AnswerValue::Text("alone".into()));
    assert!(RecommendationService::select_applicable(&rules, 0, &answers).is_empty());

    answers.clear();
    assert!(RecommendationService::select_applicable(&rules, 0, &answers).is_empty());
}

#[test]
fn evaluation_is_stable_across_reruns() {
    let rules = vec![
        rule("always", json!({}), 1),
        rule("score_range", json!({"min_score": 40, "max_score": 60}), 2),
    ];
    let answers = AnswerMap::new();
    let a: Vec<Uuid> = RecommendationService::select_applicable(&rules, 50, &answers)
        .iter()
        .map(|r| r.id)
        .collect();
    let b: Vec<Uuid> = RecommendationService::select_applicable(&rules, 50, &answers)
        .iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(a, b);
}

#[test]
fn condition_parsing_accepts_each_documented_shape() {
    assert!(RuleCondition::parse("always", &json!({})).is_some());
    assert!(RuleCondition::parse("score_range", &json!({"min_score": 10})).is_some());
    assert!(RuleCondition::parse("score_range", &json!({"max_score": 10})).is_some());
    assert!(
        RuleCondition::parse("score_range", &json!({"min_score": 0, "max_score": 100})).is_some()
    );
    let qid = Uuid::new_v4().to_string();
    assert!(RuleCondition::parse(
        "answer_equals",
        &json!({"question_id": qid, "answer_value": [1, 2]})
    )
    .is_some());
}
