// src/api/dto/mod.rs
pub mod auth_dto;
pub mod checkout_dto;
pub mod common;
pub mod email_log_dto;
pub mod foundation_dto;
pub mod goal_dto;
pub mod journal_dto;
pub mod reminder_dto;
pub mod review_dto;
