// src/infrastructure/mod.rs
//
// 外部サービス（Stripe / Supabase Auth）との境界

pub mod identity;
pub mod payment_gateway;
pub mod stripe_gateway;
pub mod supabase_auth;
