use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "message_sender", rename_all = "snake_case")]
pub enum MessageSender {
    Learner,
    Coach,
}

/// One message in a learner's coaching thread. `user_id` always names
/// the learner the thread belongs to, regardless of sender.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Message {
    pub id: Uuid,
    pub user_id: Uuid,
    pub sender: MessageSender,
    pub body: String,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
