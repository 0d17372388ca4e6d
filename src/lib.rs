pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    analytics_service::AnalyticsService, assessment_service::AssessmentService,
    content_service::ContentService, message_service::MessageService,
    notification_service::NotificationService, practice_service::PracticeService,
    progress_service::ProgressService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub assessment_service: AssessmentService,
    pub content_service: ContentService,
    pub message_service: MessageService,
    pub notification_service: NotificationService,
    pub practice_service: PracticeService,
    pub progress_service: ProgressService,
    pub analytics_service: AnalyticsService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();

        let assessment_service = AssessmentService::new(pool.clone());
        let content_service = ContentService::new(pool.clone());
        let message_service = MessageService::new(pool.clone());
        let notification_service =
            NotificationService::new(pool.clone(), config.staff_webhook_url.clone());
        let practice_service = PracticeService::new(pool.clone());
        let progress_service = ProgressService::new(pool.clone());
        let analytics_service = AnalyticsService::new(pool.clone());

        Self {
            pool,
            assessment_service,
            content_service,
            message_service,
            notification_service,
            practice_service,
            progress_service,
            analytics_service,
        }
    }
}
