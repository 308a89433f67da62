// tests/common/test_data.rs

use chrono::{DateTime, Duration, NaiveDate, Utc};
use super::stripe_helper::checkout_session_json;
use journal_backend::domain::order::OrderDetails;
use journal_backend::domain::{
    email_log_model, foundation_model, goal_model, journal_entry_model, order_confirmation_model,
    verification_code_model, weekly_review_model,
};
use journal_backend::infrastructure::identity::AuthUser;
use serde_json::json;
use std::collections::HashMap;
use uuid::Uuid;

pub fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
}

pub fn journal_entry(
    user_id: Uuid,
    entry_date: NaiveDate,
    gratitude: Option<&str>,
) -> journal_entry_model::Model {
    journal_entry_model::Model {
        id: Uuid::new_v4(),
        user_id,
        entry_date,
        day_number: 1,
        gratitude: gratitude.map(str::to_string),
        priority_1: None,
        priority_2: None,
        priority_3: None,
        tasks: json!([]),
        reflection: None,
        mood: None,
        completed: false,
        streak: 0,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn goal(user_id: Uuid, title: &str, progress: i32, status: &str) -> goal_model::Model {
    goal_model::Model {
        id: Uuid::new_v4(),
        user_id,
        title: title.to_string(),
        description: None,
        why: None,
        how: None,
        goal_type: "90-day".to_string(),
        category: None,
        timeline: None,
        reward: None,
        progress,
        status: status.to_string(),
        milestones: json!([]),
        entry_date: Utc::now().date_naive(),
        empire_vision: None,
        financial_freedom_number: None,
        legacy_impact: None,
        legacy_goals: None,
        vision_goals: None,
        strategic_goals: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn foundation(user_id: Uuid, entry_date: NaiveDate) -> foundation_model::Model {
    foundation_model::Model {
        id: Uuid::new_v4(),
        user_id,
        entry_date,
        my_why: Some("Freedom for my family".to_string()),
        what_drives_me: Some("Curiosity".to_string()),
        what_im_done_with: None,
        who_im_building_for: None,
        my_vision: None,
        my_values: None,
        my_skills: None,
        influences: None,
        books_that_shaped_me: None,
        mentors_role_models: None,
        core_principles: None,
        lessons_learned: None,
        accountability_partner: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn weekly_review(
    user_id: Uuid,
    week_start: NaiveDate,
    week_number: i32,
) -> weekly_review_model::Model {
    weekly_review_model::Model {
        id: Uuid::new_v4(),
        user_id,
        week_start_date: week_start,
        week_end_date: week_start + Duration::days(6),
        week_number,
        wins: Some("Shipped the landing page".to_string()),
        obstacles: None,
        lessons: None,
        next_steps: None,
        ai_summary: None,
        trends: None,
        insights: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn email_log(email: &str, email_type: &str, status: &str) -> email_log_model::Model {
    email_log_model::Model {
        id: Uuid::new_v4(),
        email: email.to_string(),
        user_id: None,
        email_type: email_type.to_string(),
        subject: "Subject".to_string(),
        status: status.to_string(),
        error_message: None,
        created_at: Utc::now(),
    }
}

pub fn verification_code(
    email: &str,
    code: &str,
    pending_password: Option<&str>,
) -> verification_code_model::Model {
    verification_code_model::Model {
        id: Uuid::new_v4(),
        email: email.to_string(),
        code: code.to_string(),
        expires_at: Utc::now() + Duration::minutes(10),
        used: false,
        pending_password: pending_password.map(str::to_string),
        name: Some("Ada".to_string()),
        created_at: Utc::now(),
    }
}

pub fn confirmation_record(
    session_id: &str,
    status: &str,
    claimed_at: DateTime<Utc>,
) -> order_confirmation_model::Model {
    order_confirmation_model::Model {
        session_id: session_id.to_string(),
        status: status.to_string(),
        confirmed_by: "webhook".to_string(),
        attempts: 1,
        customer_email: Some("buyer@example.com".to_string()),
        last_error: None,
        claimed_at,
        sent_at: (status == "sent").then_some(claimed_at),
        created_at: claimed_at,
        updated_at: claimed_at,
    }
}

pub fn paid_order(session_id: &str, email: &str, created: DateTime<Utc>) -> OrderDetails {
    let line_item = json!({ "description": "Leverage Journal - First Edition A5", "quantity": 1 });
    OrderDetails::from_stripe_json(
        &checkout_session_json(session_id, Some(email), created),
        &[line_item],
    )
}

pub fn other_product_order(session_id: &str) -> OrderDetails {
    OrderDetails {
        product_name: "Consulting call".to_string(),
        metadata: HashMap::new(),
        ..paid_order(session_id, "client@example.com", Utc::now())
    }
}

pub fn auth_user(id: Uuid, email: &str, name: Option<&str>) -> AuthUser {
    AuthUser {
        id: id.to_string(),
        email: Some(email.to_string()),
        user_metadata: match name {
            Some(name) => json!({ "full_name": name }),
            None => json!({}),
        },
    }
}
