// src/repository/mod.rs
pub mod email_log_repository;
pub mod foundation_repository;
pub mod goal_repository;
pub mod journal_entry_repository;
pub mod order_confirmation_repository;
pub mod verification_code_repository;
pub mod weekly_review_repository;
