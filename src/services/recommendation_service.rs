use crate::error::Result;
use crate::models::answer::AnswerMap;
use crate::models::recommendation::{RecommendationRule, UserRecommendation};
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use uuid::Uuid;

/// A rule condition, parsed from the loosely-typed `(condition_type,
/// condition)` columns when the rule is loaded. Malformed payloads
/// parse to `None` and the rule never applies.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleCondition {
    Always,
    ScoreRange {
        min: Option<i32>,
        max: Option<i32>,
    },
    AnswerEquals {
        question_id: Uuid,
        expected: JsonValue,
    },
}

impl RuleCondition {
    pub fn parse(condition_type: &str, payload: &JsonValue) -> Option<Self> {
        match condition_type {
            "always" => Some(Self::Always),
            "score_range" => {
                let min = score_bound(payload, "min_score").ok()?;
                let max = score_bound(payload, "max_score").ok()?;
                // A range with neither bound never applies.
                if min.is_none() && max.is_none() {
                    return None;
                }
                Some(Self::ScoreRange { min, max })
            }
            "answer_equals" => {
                let question_id = payload.get("question_id")?.as_str()?.parse().ok()?;
                let expected = payload.get("answer_value")?.clone();
                if expected.is_null() {
                    return None;
                }
                Some(Self::AnswerEquals {
                    question_id,
                    expected,
                })
            }
            _ => None,
        }
    }

    /// Whether the condition holds for a computed percentage and the
    /// submitted answer map. Pure; re-running on the same inputs always
    /// yields the same verdict.
    pub fn matches(&self, percentage: i32, answers: &AnswerMap) -> bool {
        match self {
            Self::Always => true,
            // Bounds are inclusive on both ends when present.
            Self::ScoreRange { min, max } => {
                min.map_or(true, |lo| percentage >= lo) && max.map_or(true, |hi| percentage <= hi)
            }
            Self::AnswerEquals {
                question_id,
                expected,
            } => answers
                .get(question_id)
                .map_or(false, |answer| answer.to_json() == *expected),
        }
    }
}

fn score_bound(payload: &JsonValue, key: &str) -> std::result::Result<Option<i32>, ()> {
    match payload.get(key) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(value) => value.as_i64().map(|n| Some(n as i32)).ok_or(()),
    }
}

#[derive(Clone)]
pub struct RecommendationService {
    pool: PgPool,
}

impl RecommendationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Filter `rules` (already ordered by ascending priority) down to
    /// those whose condition holds. Every satisfied rule applies; this
    /// is not first-match-wins. Rules with malformed conditions are
    /// skipped silently.
    pub fn select_applicable<'a>(
        rules: &'a [RecommendationRule],
        percentage: i32,
        answers: &AnswerMap,
    ) -> Vec<&'a RecommendationRule> {
        rules
            .iter()
            .filter(|rule| {
                match RuleCondition::parse(&rule.condition_type, &rule.condition) {
                    Some(condition) => condition.matches(percentage, answers),
                    None => {
                        tracing::warn!(
                            rule_id = %rule.id,
                            condition_type = %rule.condition_type,
                            "skipping recommendation rule with malformed condition"
                        );
                        false
                    }
                }
            })
            .collect()
    }

    pub async fn active_rules(&self, assessment_id: Uuid) -> Result<Vec<RecommendationRule>> {
        let rules = sqlx::query_as::<_, RecommendationRule>(
            r#"
            SELECT * FROM recommendation_rules
            WHERE assessment_id = $1 AND is_active = TRUE
            ORDER BY priority ASC, created_at ASC
            "#,
        )
        .bind(assessment_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rules)
    }

    pub async fn grant(
        &self,
        user_id: Uuid,
        response_id: Uuid,
        rule_id: Uuid,
    ) -> Result<UserRecommendation> {
        let grant = sqlx::query_as::<_, UserRecommendation>(
            r#"
            INSERT INTO user_recommendations (user_id, response_id, rule_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(response_id)
        .bind(rule_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(grant)
    }

    pub async fn for_response(&self, response_id: Uuid) -> Result<Vec<UserRecommendation>> {
        let grants = sqlx::query_as::<_, UserRecommendation>(
            r#"
            SELECT * FROM user_recommendations
            WHERE response_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(response_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(grants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::answer::AnswerValue;
    use chrono::Utc;
    use serde_json::json;

    fn rule(condition_type: &str, condition: JsonValue, priority: i32) -> RecommendationRule {
        let now = Utc::now();
        RecommendationRule {
            id: Uuid::new_v4(),
            assessment_id: Uuid::new_v4(),
            condition_type: condition_type.into(),
            condition,
            priority,
            title_en: "Keep practicing".into(),
            title_es: "Sigue practicando".into(),
            body_en: "body".into(),
            body_es: "cuerpo".into(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn always_applies_unconditionally() {
        let condition = RuleCondition::parse("always", &json!({})).unwrap();
        assert!(condition.matches(0, &AnswerMap::new()));
        assert!(condition.matches(100, &AnswerMap::new()));
    }

    #[test]
    fn score_range_supports_three_bound_shapes() {
        let below = RuleCondition::parse("score_range", &json!({"max_score": 67})).unwrap();
        let between =
            RuleCondition::parse("score_range", &json!({"min_score": 68, "max_score": 119}))
                .unwrap();
        let above = RuleCondition::parse("score_range", &json!({"min_score": 120})).unwrap();

        let none = AnswerMap::new();
        for value in [0, 67, 68, 90, 119, 120, 170] {
            let hits = [&below, &between, &above]
                .iter()
                .filter(|c| c.matches(value, &none))
                .count();
            assert_eq!(hits, 1, "value {} must match exactly one range", value);
        }
        // Boundaries are inclusive and belong to the adjoining range.
        assert!(below.matches(67, &none));
        assert!(between.matches(68, &none));
        assert!(between.matches(119, &none));
        assert!(above.matches(120, &none));
    }

    #[test]
    fn score_range_without_bounds_is_malformed() {
        assert_eq!(RuleCondition::parse("score_range", &json!({})), None);
        assert_eq!(
            RuleCondition::parse(
                "score_range",
                &json!({"min_score": null, "max_score": null})
            ),
            None
        );
    }

    #[test]
    fn score_range_with_non_numeric_bound_is_malformed() {
        assert_eq!(
            RuleCondition::parse("score_range", &json!({"min_score": "low"})),
            None
        );
    }

    #[test]
    fn answer_equals_requires_deep_equality() {
        let qid = Uuid::new_v4();
        let condition = RuleCondition::parse(
            "answer_equals",
            &json!({"question_id": qid.to_string(), "answer_value": ["a", "b"]}),
        )
        .unwrap();

        let mut answers = AnswerMap::new();
        answers.insert(qid, AnswerValue::Many(vec!["a".into(), "b".into()]));
        assert!(condition.matches(0, &answers));

        answers.insert(qid, AnswerValue::Many(vec!["b".into(), "a".into()]));
        assert!(!condition.matches(0, &answers), "deep equality is ordered");

        answers.remove(&qid);
        assert!(!condition.matches(0, &answers), "missing answer never matches");
    }

    #[test]
    fn answer_equals_with_missing_fields_is_malformed() {
        assert_eq!(
            RuleCondition::parse("answer_equals", &json!({"answer_value": "a"})),
            None
        );
        assert_eq!(
            RuleCondition::parse(
                "answer_equals",
                &json!({"question_id": Uuid::new_v4().to_string()})
            ),
            None
        );
        assert_eq!(
            RuleCondition::parse("answer_equals", &json!({"question_id": "not-a-uuid", "answer_value": 1})),
            None
        );
    }

    #[test]
    fn unknown_condition_type_never_applies() {
        assert_eq!(RuleCondition::parse("score_below", &json!({"max_score": 10})), None);
    }

    #[test]
    fn selection_keeps_every_match_in_priority_order() {
        let rules = vec![
            rule("score_range", json!({"min_score": 0, "max_score": 50}), 1),
            rule("always", json!({}), 2),
            rule("score_range", json!({"min_score": 40}), 3),
            rule("bogus", json!({}), 4),
        ];
        let selected = RecommendationService::select_applicable(&rules, 45, &AnswerMap::new());
        let priorities: Vec<i32> = selected.iter().map(|r| r.priority).collect();
        assert_eq!(priorities, vec![1, 2, 3]);
    }

    #[test]
    fn selection_is_idempotent() {
        let rules = vec![
            rule("always", json!({}), 1),
            rule("score_range", json!({"min_score": 90}), 2),
        ];
        let answers = AnswerMap::new();
        let first: Vec<Uuid> = RecommendationService::select_applicable(&rules, 80, &answers)
            .iter()
            .map(|r| r.id)
            .collect();
        let second: Vec<Uuid> = RecommendationService::select_applicable(&rules, 80, &answers)
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(first, second);
    }
}
