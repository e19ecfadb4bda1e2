//! End-to-end routing over real HTTP.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use waypost::{Reply, ServerError};

mod common;

#[tokio::test]
async fn test_root_returns_body() {
    let server = common::start(common::router().get("/", |_| "hi")).await;
    let client = common::client();

    let res = client.get(common::url(&server, "/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "hi");

    server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_named_and_rest_params() {
    let server = common::start(
        common::router()
            .get("/h/:hi", |ctx| format!("Hi {}", ctx.param("hi").unwrap_or_default()))
            .get("/rest/*", |ctx| ctx.param("rest").unwrap_or_default().to_string()),
    )
    .await;
    let client = common::client();

    let res = client.get(common::url(&server, "/h/world")).send().await.unwrap();
    assert_eq!(res.text().await.unwrap(), "Hi world");

    let res = client.get(common::url(&server, "/rest/a/b/c")).send().await.unwrap();
    assert_eq!(res.text().await.unwrap(), "a/b/c");

    server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_exact_route_beats_pattern_registered_first() {
    let server = common::start(
        common::router()
            .get("/h/:x", |ctx| format!("pattern {}", ctx.param("x").unwrap_or_default()))
            .get("/h/a", |_| "exact"),
    )
    .await;
    let client = common::client();

    let res = client.get(common::url(&server, "/h/a")).send().await.unwrap();
    assert_eq!(res.text().await.unwrap(), "exact");

    let res = client.get(common::url(&server, "/h/b")).send().await.unwrap();
    assert_eq!(res.text().await.unwrap(), "pattern b");

    server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_first_registered_pattern_wins() {
    let server = common::start(
        common::router()
            .get("/h/:x", |ctx| format!("x={}", ctx.param("x").unwrap_or_default()))
            .get("/h/*", |_| "rest"),
    )
    .await;
    let client = common::client();

    let res = client.get(common::url(&server, "/h/a")).send().await.unwrap();
    assert_eq!(res.text().await.unwrap(), "x=a");

    // Segment count differs, so only the wildcard can match.
    let res = client.get(common::url(&server, "/h/a/b")).send().await.unwrap();
    assert_eq!(res.text().await.unwrap(), "rest");

    server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unmatched_request_is_empty_404() {
    let server = common::start(common::router().get("/h/:x", |_| "pattern")).await;
    let client = common::client();

    let res = client.get(common::url(&server, "/h/a/b")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.unwrap(), "");

    let res = client.post(common::url(&server, "/h/a")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_custom_fallback() {
    let server = common::start(common::router().fallback(|_| "Not found")).await;
    let client = common::client();

    let res = client.get(common::url(&server, "/anything")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "Not found");

    server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_pending_reply_matches_sync_reply() {
    let server = common::start(
        common::router().get("/sync", |_| "x").get("/async", |_| {
            Reply::pending(async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                "x"
            })
        }),
    )
    .await;
    let client = common::client();

    let sync = client.get(common::url(&server, "/sync")).send().await.unwrap();
    let deferred = client.get(common::url(&server, "/async")).send().await.unwrap();
    assert_eq!(sync.status(), deferred.status());
    assert_eq!(sync.text().await.unwrap(), deferred.text().await.unwrap());

    server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_handler_managed_response() {
    let server = common::start(common::router().delete("/items/:id", |ctx| {
        ctx.response
            .set_status_code(waypost::http::StatusCode::NO_CONTENT)
            .end();
    }))
    .await;
    let client = common::client();

    let res = client.delete(common::url(&server, "/items/3")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_handler_error_becomes_500() {
    let server = common::start(
        common::router().get("/boom", |_| Reply::pending(async { Err::<String, _>("boom") })),
    )
    .await;
    let client = common::client();

    let res = client.get(common::url(&server, "/boom")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_requests() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let server = common::start(common::router().get("/n/:n", move |ctx| {
        counter.fetch_add(1, Ordering::SeqCst);
        let n = ctx.param("n").unwrap_or_default().to_string();
        Reply::pending(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            n
        })
    }))
    .await;
    let client = common::client();

    let mut tasks = Vec::new();
    for n in 0..20 {
        let client = client.clone();
        let url = common::url(&server, &format!("/n/{}", n));
        tasks.push(tokio::spawn(async move {
            let res = client.get(url).send().await.unwrap();
            assert_eq!(res.text().await.unwrap(), n.to_string());
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }
    assert_eq!(hits.load(Ordering::SeqCst), 20);

    server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_bind_failure_is_reported() {
    let first = common::start(common::router()).await;
    let port = first.local_addr().port();

    let err = common::router().listen(port).await.unwrap_err();
    assert!(matches!(err, ServerError::Bind { .. }));

    first.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_dropped_handle_keeps_serving() {
    let server = common::start(common::router().get("/", |_| "hi")).await;
    let addr = server.local_addr();
    drop(server);

    let res = common::client()
        .get(format!("http://{}/", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "hi");
}
