// journal-backend/src/utils/mod.rs

pub mod email;
pub mod email_templates;
pub mod jwt;
pub mod timeout;
pub mod validation;
