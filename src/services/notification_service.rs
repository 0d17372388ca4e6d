use crate::error::Result;
use crate::models::webhook_log::WebhookLog;
use reqwest::Client;
use serde_json::Value as JsonValue;
use sqlx::PgPool;

/// Best-effort outbound notifications to the staff dashboard webhook.
/// Events are queued in `webhook_logs` and drained by a background
/// worker; nothing here ever blocks or fails a learner request.
#[derive(Clone)]
pub struct NotificationService {
    pool: PgPool,
    client: Client,
    target_url: Option<String>,
}

impl NotificationService {
    pub fn new(pool: PgPool, target_url: Option<String>) -> Self {
        Self {
            pool,
            client: Client::new(),
            target_url,
        }
    }

    /// Queue an event for delivery. Returns `None` (without touching
    /// the database) when no webhook target is configured.
    pub async fn enqueue(
        &self,
        event_type: &str,
        payload: &JsonValue,
    ) -> Result<Option<WebhookLog>> {
        let Some(target_url) = self.target_url.as_deref() else {
            tracing::debug!(event_type, "no staff webhook configured, dropping event");
            return Ok(None);
        };

        let row = sqlx::query_as::<_, WebhookLog>(
            r#"
            INSERT INTO webhook_logs (event_type, payload, target_url, status)
            VALUES ($1, $2, $3, 'pending')
            RETURNING *
            "#,
        )
        .bind(event_type)
        .bind(payload)
        .bind(target_url)
        .fetch_one(&self.pool)
        .await?;
        Ok(Some(row))
    }

    /// Deliver the oldest pending event, if any. Returns whether work
    /// was done so the worker loop can back off when the queue is dry.
    pub async fn run_once(&self) -> Result<bool> {
        let Some(log) = sqlx::query_as::<_, WebhookLog>(
            r#"
            SELECT * FROM webhook_logs
            WHERE status = 'pending' AND attempts < max_attempts
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?
        else {
            return Ok(false);
        };

        self.deliver(&log).await?;
        Ok(true)
    }

    async fn deliver(&self, log: &WebhookLog) -> Result<()> {
        let secret = crate::config::get_config().webhook_secret.clone();
        let result = self
            .client
            .post(&log.target_url)
            .header("X-Webhook-Secret", secret)
            .json(&log.payload)
            .send()
            .await;

        match result {
            Ok(resp) => {
                let status = resp.status().as_u16() as i32;
                let body = resp.text().await.unwrap_or_default();
                sqlx::query(
                    r#"
                    UPDATE webhook_logs
                    SET http_status = $1,
                        response_body = $2,
                        status = CASE WHEN $1 BETWEEN 200 AND 299 THEN 'success'
                                      WHEN attempts + 1 >= max_attempts THEN 'failed'
                                      ELSE 'pending' END,
                        attempts = attempts + 1,
                        updated_at = NOW()
                    WHERE id = $3
                    "#,
                )
                .bind(status)
                .bind(body)
                .bind(log.id)
                .execute(&self.pool)
                .await?;
            }
            Err(err) => {
                tracing::warn!(error = %err, webhook_id = %log.id, "webhook delivery failed");
                sqlx::query(
                    r#"
                    UPDATE webhook_logs
                    SET response_body = $1,
                        status = CASE WHEN attempts + 1 >= max_attempts THEN 'failed' ELSE 'pending' END,
                        attempts = attempts + 1,
                        updated_at = NOW()
                    WHERE id = $2
                    "#,
                )
                .bind(err.to_string())
                .bind(log.id)
                .execute(&self.pool)
                .await?;
            }
        }
        Ok(())
    }
}
