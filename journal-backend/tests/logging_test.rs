use axum::http::StatusCode;
use journal_backend::log_with_context;

mod common;

#[tokio::test]
async fn test_structured_logging_macro() {
    common::init_test_env();

    log_with_context!(tracing::Level::INFO, "Message without context");

    let user_id = uuid::Uuid::new_v4();
    log_with_context!(
        tracing::Level::INFO,
        "Journal entry saved",
        "user_id" => user_id,
        "entry_date" => "2025-10-01",
        "day_number" => 3
    );

    log_with_context!(
        tracing::Level::ERROR,
        "Order confirmation failed",
        "session_id" => "cs_test_123",
        "error" => "SMTP unavailable",
    );

    log_with_context!(
        tracing::Level::WARN,
        "Admin notification skipped",
        "reason" => "ADMIN_EMAIL unset"
    );

    log_with_context!(tracing::Level::DEBUG, "Reminder tally", "sent" => 0usize);

    // TRACE は出力しない
    log_with_context!(tracing::Level::TRACE, "Ignored");
}

#[tokio::test]
async fn test_logging_middleware_over_http() {
    use axum::{routing::get, Router};
    use journal_backend::logging::{logging_middleware, REQUEST_ID_HEADER};
    use tokio::net::TcpListener;

    common::init_test_env();

    let app = Router::new()
        .route("/ok", get(|| async { "ok" }))
        .route(
            "/boom",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error") }),
        )
        .layer(axum::middleware::from_fn(logging_middleware));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service()).await.unwrap();
    });

    let client = reqwest::Client::new();

    let response = client
        .get(format!("http://{}/ok", addr))
        .header(REQUEST_ID_HEADER, "cron-run-42")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers().get(REQUEST_ID_HEADER).unwrap(),
        "cron-run-42"
    );

    let response = client
        .get(format!("http://{}/boom", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 500);
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));

    let response = client
        .get(format!("http://{}/missing", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_request_context_extension() {
    use axum::body::Body;
    use axum::http::Request;
    use axum::{extract::Extension, routing::get, Router};
    use journal_backend::logging::{logging_middleware, RequestContext};
    use tower::ServiceExt;

    let app = Router::new()
        .route(
            "/context-test",
            get(|Extension(context): Extension<RequestContext>| async move {
                assert!(!context.request_id.is_empty());
                assert_eq!(context.path, "/context-test");
                assert_eq!(context.method, "GET");
                "Context test passed"
            }),
        )
        .layer(axum::middleware::from_fn(logging_middleware));

    let res = app
        .oneshot(
            Request::builder()
                .uri("/context-test")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"Context test passed");
}
