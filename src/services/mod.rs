pub mod analytics_service;
pub mod assessment_service;
pub mod content_service;
pub mod message_service;
pub mod notification_service;
pub mod practice_service;
pub mod progress_service;
pub mod recommendation_service;
pub mod scoring_service;
