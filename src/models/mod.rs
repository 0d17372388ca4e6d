pub mod answer;
pub mod assessment;
pub mod curriculum;
pub mod message;
pub mod milestone;
pub mod practice_log;
pub mod question;
pub mod recommendation;
pub mod response;
pub mod user;
pub mod webhook_log;
