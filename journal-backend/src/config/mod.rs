// src/config/mod.rs

pub mod app;
pub mod stripe;
pub mod supabase;

pub use app::{AppConfig, OrderConfirmationConfig};
pub use stripe::StripeConfig;
pub use supabase::SupabaseConfig;
