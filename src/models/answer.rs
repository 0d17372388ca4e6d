use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use uuid::Uuid;

/// A learner-submitted answer. The JSON shape depends on the question
/// kind: a number for likert/rating, a string for single choice and
/// free text, an array of strings for multiple choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(i64),
    Text(String),
    Many(Vec<String>),
}

pub type AnswerMap = HashMap<Uuid, AnswerValue>;

impl AnswerValue {
    pub fn as_number(&self) -> Option<i64> {
        match self {
            AnswerValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_many(&self) -> Option<&[String]> {
        match self {
            AnswerValue::Many(items) => Some(items),
            _ => None,
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            AnswerValue::Number(n) => JsonValue::from(*n),
            AnswerValue::Text(s) => JsonValue::from(s.clone()),
            AnswerValue::Many(items) => JsonValue::from(items.clone()),
        }
    }
}
