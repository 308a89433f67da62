// src/api/handlers/system_handler.rs
use crate::api::dto::common::HealthResponse;
use crate::api::AppState;
use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use once_cell::sync::Lazy;
use std::fmt::Write;

pub const SITEMAP_LASTMOD: &str = "2024-11-08";

/// 公開ページ（パス, 更新頻度, 優先度）
struct SitemapPage {
    path: &'static str,
    changefreq: &'static str,
    priority: &'static str,
}

static SITEMAP_PAGES: Lazy<Vec<SitemapPage>> = Lazy::new(|| {
    [
        ("/", "weekly", "1.0"),
        ("/features", "monthly", "0.9"),
        ("/faq", "monthly", "0.8"),
        ("/contact", "monthly", "0.7"),
        ("/support", "monthly", "0.7"),
        ("/shipping", "monthly", "0.6"),
        ("/auth/signin", "yearly", "0.5"),
        ("/auth/signup", "yearly", "0.5"),
        ("/privacy", "yearly", "0.4"),
        ("/terms", "yearly", "0.4"),
        ("/returns", "yearly", "0.6"),
        ("/sitemap", "monthly", "0.3"),
    ]
    .into_iter()
    .map(|(path, changefreq, priority)| SitemapPage {
        path,
        changefreq,
        priority,
    })
    .collect()
});

pub fn render_sitemap(base_url: &str) -> String {
    let base_url = base_url.trim_end_matches('/');
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for page in SITEMAP_PAGES.iter() {
        // String への書き込みは失敗しない
        let _ = write!(
            xml,
            "  <url>\n    <loc>{}{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>{}</changefreq>\n    <priority>{}</priority>\n  </url>\n",
            base_url, page.path, SITEMAP_LASTMOD, page.changefreq, page.priority
        );
    }
    xml.push_str("</urlset>\n");
    xml
}

pub async fn sitemap_handler(State(app_state): State<AppState>) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "application/xml"),
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        render_sitemap(&app_state.config.site_url),
    )
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub fn system_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/sitemap.xml", get(sitemap_handler))
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_sitemap() {
        let xml = render_sitemap("https://leveragejournal.com/");
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<loc>https://leveragejournal.com/</loc>"));
        assert!(xml.contains("<loc>https://leveragejournal.com/auth/signup</loc>"));
        assert_eq!(xml.matches("<url>").count(), 12);
        assert!(xml.trim_end().ends_with("</urlset>"));
    }
}
