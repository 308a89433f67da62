// src/domain/mod.rs
pub mod email_log_model;
pub mod foundation_model;
pub mod goal_model;
pub mod journal_entry_model;
pub mod order;
pub mod order_confirmation_model;
pub mod progress;
pub mod verification_code_model;
pub mod weekly_review_model;
