use crate::error::Result;
use crate::models::message::{Message, MessageSender};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct MessageService {
    pool: PgPool,
}

impl MessageService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn send(&self, user_id: Uuid, sender: MessageSender, body: &str) -> Result<Message> {
        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (user_id, sender, body)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(sender)
        .bind(body)
        .fetch_one(&self.pool)
        .await?;
        Ok(message)
    }

    pub async fn thread(&self, user_id: Uuid) -> Result<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT * FROM messages
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(messages)
    }

    /// Mark every unread message from `sender` in the learner's thread
    /// as read. Called by whichever side is reading the thread.
    pub async fn mark_read(&self, user_id: Uuid, sender: MessageSender) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE messages
            SET read_at = NOW()
            WHERE user_id = $1 AND sender = $2 AND read_at IS NULL
            "#,
        )
        .bind(user_id)
        .bind(sender)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn unread_from(&self, user_id: Uuid, sender: MessageSender) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM messages
            WHERE user_id = $1 AND sender = $2 AND read_at IS NULL
            "#,
        )
        .bind(user_id)
        .bind(sender)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Unread learner messages across all threads, for the staff inbox
    /// badge.
    pub async fn total_unread_from_learners(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM messages
            WHERE sender = 'learner' AND read_at IS NULL
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
