// src/service/mod.rs
pub mod checkout_service;
pub mod email_log_service;
pub mod foundation_service;
pub mod goal_service;
pub mod journal_service;
pub mod notification_service;
pub mod order_confirmation_service;
pub mod progress_service;
pub mod reminder_service;
pub mod review_service;
pub mod verification_service;
