// src/utils/email_templates.rs

use crate::domain::order::{Address, OrderDetails};

/// 件名と本文（HTML / テキスト）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailTemplate {
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

/// リマインダーに載せる目標
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalSnapshot {
    pub title: String,
    pub progress: i32,
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = r#"
    body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; }
    .container { max-width: 600px; margin: 0 auto; padding: 20px; }
    .header { background: linear-gradient(135deg, #fbbf24 0%, #f59e0b 100%); padding: 30px; text-align: center; border-radius: 10px 10px 0 0; }
    .content { background: white; padding: 40px; border-radius: 0 0 10px 10px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
    .code { background: #f3f4f6; border: 2px dashed #fbbf24; padding: 20px; text-align: center; font-size: 32px; font-weight: bold; letter-spacing: 5px; margin: 20px 0; border-radius: 8px; }
    .button { display: inline-block; background: #111; color: #fbbf24 !important; padding: 12px 28px; border-radius: 6px; text-decoration: none; font-weight: bold; }
    .footer { text-align: center; margin-top: 20px; color: #999; font-size: 12px; }
    table.details td { padding: 4px 12px 4px 0; vertical-align: top; }
"#;

/// 共通レイアウト。`body` はエスケープ済みの HTML
fn layout(heading: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <style>{style}</style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h1 style="color: #000; margin: 0; font-size: 28px; font-weight: bold;">Leverage Journal™</h1>
    </div>
    <div class="content">
      <h2 style="color: #1a1a1a; margin-top: 0;">{heading}</h2>
      {body}
    </div>
    <div class="footer">
      <p>© Leverage Journal™. All rights reserved.</p>
    </div>
  </div>
</body>
</html>"#,
        style = STYLE,
        heading = escape_html(heading),
        body = body,
    )
}

fn detail_rows(rows: &[(&str, Option<String>)]) -> (String, String) {
    let mut html = String::from(r#"<table class="details">"#);
    let mut text = String::new();
    for (label, value) in rows {
        if let Some(value) = value {
            html.push_str(&format!(
                "<tr><td><strong>{}</strong></td><td>{}</td></tr>",
                escape_html(label),
                escape_html(value)
            ));
            text.push_str(&format!("{}: {}\n", label, value));
        }
    }
    html.push_str("</table>");
    (html, text)
}

fn format_address(address: &Option<Address>) -> Option<String> {
    address.as_ref().and_then(Address::format)
}

/// アプリ URL を埋め込んだテンプレート群
#[derive(Debug, Clone)]
pub struct EmailTemplates {
    app_url: String,
}

impl EmailTemplates {
    pub fn new(app_url: &str) -> Self {
        Self {
            app_url: app_url.trim_end_matches('/').to_string(),
        }
    }

    fn link(&self, path: &str) -> String {
        format!("{}{}", self.app_url, path)
    }

    pub fn verification_code(&self, code: &str) -> EmailTemplate {
        let body = format!(
            r#"<p>Thank you for registering with Leverage Journal™!</p>
      <p>Use this code to complete your sign-in:</p>
      <div class="code">{code}</div>
      <p style="color: #666;">This code will expire in 10 minutes.</p>
      <p style="color: #999; font-size: 12px; margin-top: 30px;">If you didn't request this code, you can safely ignore this email.</p>"#,
            code = escape_html(code)
        );

        EmailTemplate {
            subject: "Your Leverage Journal Verification Code".to_string(),
            html_body: layout("Your Verification Code", &body),
            text_body: format!(
                "Leverage Journal - Verification Code\n\nThank you for registering!\n\nYour verification code is: {}\n\nThis code will expire in 10 minutes.\n\nIf you didn't request this code, you can safely ignore this email.\n",
                code
            ),
        }
    }

    pub fn order_confirmation(&self, order: &OrderDetails) -> EmailTemplate {
        let greeting = order
            .customer_name
            .as_deref()
            .map(|name| format!("Hi {},", name))
            .unwrap_or_else(|| "Hi,".to_string());

        let (rows_html, rows_text) = detail_rows(&[
            ("Order ID", Some(order.session_id.clone())),
            ("Product", Some(order.product_name.clone())),
            ("Quantity", Some(order.quantity.to_string())),
            ("Total", Some(order.formatted_price())),
            ("Ship to", order.shipping_name.clone()),
            ("Shipping address", format_address(&order.shipping_address)),
        ]);

        let body = format!(
            r#"<p>{greeting}</p>
      <p>Thank you for your order! Your Leverage Journal is being prepared for dispatch.</p>
      {rows}
      <p>We'll email you again when your journal ships. While you wait, you can start your 90-day journey online:</p>
      <p><a class="button" href="{dashboard}">Open your dashboard</a></p>"#,
            greeting = escape_html(&greeting),
            rows = rows_html,
            dashboard = self.link("/dashboard"),
        );

        EmailTemplate {
            subject: format!("Order Confirmed - {}", order.product_name),
            html_body: layout("Order Confirmation", &body),
            text_body: format!(
                "{}\n\nThank you for your order! Your Leverage Journal is being prepared for dispatch.\n\n{}\nStart your 90-day journey: {}\n",
                greeting,
                rows_text,
                self.link("/dashboard")
            ),
        }
    }

    pub fn admin_new_order(&self, order: &OrderDetails) -> EmailTemplate {
        let (rows_html, rows_text) = detail_rows(&[
            ("Order ID", Some(order.session_id.clone())),
            ("Customer", order.customer_name.clone()),
            ("Email", order.customer_email.clone()),
            ("Phone", order.phone.clone()),
            ("Product", Some(order.product_name.clone())),
            ("Quantity", Some(order.quantity.to_string())),
            ("Total", Some(order.formatted_price())),
            ("Ship to", order.shipping_name.clone()),
            ("Shipping address", format_address(&order.shipping_address)),
            ("Billing address", format_address(&order.billing_address)),
        ]);

        let body = format!(
            r#"<p>A new order has been placed.</p>
      {rows}
      <p><a class="button" href="{orders}">View all orders</a></p>"#,
            rows = rows_html,
            orders = self.link("/admin/orders"),
        );

        EmailTemplate {
            subject: format!("New Order Received - {}", order.session_id),
            html_body: layout("New Order", &body),
            text_body: format!("A new order has been placed.\n\n{}", rows_text),
        }
    }

    pub fn journal_reminder(&self, name: &str) -> EmailTemplate {
        let url = self.link("/dashboard/daily");
        let body = format!(
            r#"<p>Hi {name},</p>
      <p>You haven't written today's journal entry yet. Five minutes of gratitude, priorities and reflection keeps your streak alive.</p>
      <p><a class="button" href="{url}">Write today's entry</a></p>"#,
            name = escape_html(name),
            url = url,
        );

        EmailTemplate {
            subject: "Don't forget today's journal entry".to_string(),
            html_body: layout("Time to journal", &body),
            text_body: format!(
                "Hi {},\n\nYou haven't written today's journal entry yet. Five minutes of gratitude, priorities and reflection keeps your streak alive.\n\nWrite today's entry: {}\n",
                name, url
            ),
        }
    }

    pub fn goal_progress_reminder(&self, name: &str, goals: &[GoalSnapshot]) -> EmailTemplate {
        let url = self.link("/dashboard/goals");
        let items_html: String = goals
            .iter()
            .map(|g| {
                format!(
                    "<li>{} <strong>({}%)</strong></li>",
                    escape_html(&g.title),
                    g.progress
                )
            })
            .collect();
        let items_text: String = goals
            .iter()
            .map(|g| format!("- {} ({}%)\n", g.title, g.progress))
            .collect();

        let body = format!(
            r#"<p>Hi {name},</p>
      <p>Here's where your active goals stand today:</p>
      <ul>{items}</ul>
      <p><a class="button" href="{url}">Update your progress</a></p>"#,
            name = escape_html(name),
            items = items_html,
            url = url,
        );

        EmailTemplate {
            subject: format!("Your goal progress check-in ({} active)", goals.len()),
            html_body: layout("Goal check-in", &body),
            text_body: format!(
                "Hi {},\n\nHere's where your active goals stand today:\n{}\nUpdate your progress: {}\n",
                name, items_text, url
            ),
        }
    }

    pub fn weekly_review_reminder(&self, name: &str, week_number: i32) -> EmailTemplate {
        let url = self.link("/dashboard/review");
        let body = format!(
            r#"<p>Hi {name},</p>
      <p>Week {week} of your 90-day program is wrapping up. Take a few minutes to record your wins, obstacles and lessons.</p>
      <p><a class="button" href="{url}">Complete your weekly review</a></p>"#,
            name = escape_html(name),
            week = week_number,
            url = url,
        );

        EmailTemplate {
            subject: format!("Time for your Week {} review", week_number),
            html_body: layout("Weekly review", &body),
            text_body: format!(
                "Hi {},\n\nWeek {} of your 90-day program is wrapping up. Take a few minutes to record your wins, obstacles and lessons.\n\nComplete your weekly review: {}\n",
                name, week_number, url
            ),
        }
    }

    pub fn test_email(&self, name: &str) -> EmailTemplate {
        let body = format!(
            r#"<p>Hi {name},</p>
      <p>This is a test email from Leverage Journal. If you can read this, email delivery is working.</p>"#,
            name = escape_html(name),
        );

        EmailTemplate {
            subject: "Leverage Journal test email".to_string(),
            html_body: layout("Test email", &body),
            text_body: format!(
                "Hi {},\n\nThis is a test email from Leverage Journal. If you can read this, email delivery is working.\n",
                name
            ),
        }
    }
}
