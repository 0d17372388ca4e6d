pub mod assessment_dto;
pub mod curriculum_dto;
pub mod message_dto;
pub mod practice_dto;
pub mod staff_dto;
