pub mod assessments;
pub mod curriculum;
pub mod health;
pub mod messages;
pub mod practice;
pub mod staff;
