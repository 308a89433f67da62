// src/api/handlers/mod.rs
pub mod auth_handler;
pub mod checkout_handler;
pub mod email_log_handler;
pub mod foundation_handler;
pub mod goal_handler;
pub mod journal_handler;
pub mod progress_handler;
pub mod reminder_handler;
pub mod review_handler;
pub mod system_handler;
