// src/extractors/mod.rs

pub mod json;
pub mod uuid;

pub use json::JsonBody;
pub use uuid::ValidatedUuid;
