use gitlingo::api::{ApiClient, GitLingoApi};
use gitlingo::app::{Location, SearchState};
use gitlingo::types::ErrorCode;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

type Handler = Arc<dyn Fn(&str) -> (u16, String) + Send + Sync>;

/// Minimal HTTP/1.1 server answering every request through `handler`.
/// Returns the base URL and the request lines it has seen.
async fn spawn_stub(handler: Handler, delay: Option<Duration>) -> (String, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = Arc::clone(&seen);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else { break };
            let handler = Arc::clone(&handler);
            let seen = Arc::clone(&seen_clone);
            tokio::spawn(async move {
                let mut buf = vec![0u8; 8192];
                let mut len = 0;
                while !buf[..len].windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf[len..]).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => len += n,
                    }
                }
                let request = String::from_utf8_lossy(&buf[..len]).to_string();
                let request_line = request.lines().next().unwrap_or_default().to_string();
                let target = request_line.split_whitespace().nth(1).unwrap_or("/").to_string();
                seen.lock().unwrap().push(request_line);

                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }

                let (status, body) = handler(&target);
                let response = format!(
                    "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (format!("http://{}", addr), seen)
}

fn api(base_url: &str, timeout: Duration) -> GitLingoApi {
    GitLingoApi::new(ApiClient::new(base_url, timeout, true).unwrap())
}

fn success_body(username: &str) -> String {
    format!(
        r##"{{
            "ok": true,
            "provider": "github",
            "profile": {{"username": "{}", "avatar_url": "https://example.com/a.png", "type": "user"}},
            "data": [
                {{"key": "TypeScript", "label": "TypeScript", "value": 9, "color": "#3178c6"}},
                {{"key": "__forks__", "label": "Forks", "value": 4, "color": "#cccccc"}},
                {{"key": "Unknown", "label": "Unknown", "value": 1, "color": "#999999"}}
            ],
            "metadata": {{"generated_at": "2025-06-01T12:00:00Z"}}
        }}"##,
        username
    )
}

const NOT_FOUND_BODY: &str = r#"{
    "ok": false,
    "provider": "github",
    "error": {"code": "user_not_found", "message": "User not found"},
    "meta": {"generated_at": "2025-06-01T12:00:00Z"}
}"#;

fn search_handler() -> Handler {
    Arc::new(|target: &str| {
        if target.contains("username=octocat") {
            (200, success_body("octocat"))
        } else if target.contains("username=limited") {
            (
                429,
                r#"{"ok": false, "provider": "github", "error": {"code": "rate_limited", "message": "Slow down", "retry_after_seconds": 42}}"#
                    .to_string(),
            )
        } else if target.contains("username=garbled") {
            (500, "<html>oops</html>".to_string())
        } else {
            (404, NOT_FOUND_BODY.to_string())
        }
    })
}

#[tokio::test]
async fn test_search_success() {
    let (base, seen) = spawn_stub(search_handler(), None).await;
    let success = api(&base, Duration::from_secs(5)).search("octocat").await.unwrap();

    assert_eq!(success.profile.username, "octocat");
    assert_eq!(success.data.len(), 3);
    assert_eq!(
        seen.lock().unwrap()[0],
        "GET /api/v1/search?username=octocat HTTP/1.1"
    );
}

#[tokio::test]
async fn test_error_bodies_are_read_for_non_2xx() {
    let (base, _) = spawn_stub(search_handler(), None).await;
    let api = api(&base, Duration::from_secs(5));

    let failure = api.search("notexist").await.unwrap_err();
    assert_eq!(failure.code, ErrorCode::UserNotFound);
    assert_eq!(failure.message, "User not found");

    let failure = api.search("limited").await.unwrap_err();
    assert_eq!(failure.code, ErrorCode::RateLimited);
    assert_eq!(failure.retry_after_seconds, Some(42));

    let failure = api.search("garbled").await.unwrap_err();
    assert_eq!(failure.code, ErrorCode::ServerError);
}

#[tokio::test]
async fn test_timeout() {
    let (base, _) = spawn_stub(search_handler(), Some(Duration::from_secs(3))).await;
    let failure = api(&base, Duration::from_millis(200))
        .search("octocat")
        .await
        .unwrap_err();
    assert_eq!(failure.code, ErrorCode::Timeout);
}

#[tokio::test]
async fn test_connection_refused() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let failure = api(&format!("http://{}", addr), Duration::from_secs(5))
        .search("octocat")
        .await
        .unwrap_err();
    assert_eq!(failure.code, ErrorCode::NetworkError);
}

#[tokio::test]
async fn test_top_searches() {
    let handler: Handler = Arc::new(|_: &str| {
        (
            200,
            r#"{
                "ok": true,
                "data": [
                    {"username": "torvalds", "hit": 120, "avatar_url": "https://example.com/t.png"},
                    {"username": "octocat", "hit": 80}
                ],
                "pagination": {"total": 2, "limit": 9, "offset": 0, "has_more": false}
            }"#
            .to_string(),
        )
    });
    let (base, seen) = spawn_stub(handler, None).await;

    let items = api(&base, Duration::from_secs(5)).top_searches(9).await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].username, "torvalds");
    assert_eq!(
        seen.lock().unwrap()[0],
        "GET /api/v1/topsearch?provider=github&limit=9&offset=0 HTTP/1.1"
    );
}

#[tokio::test]
async fn test_top_searches_degrades_to_none() {
    let handler: Handler = Arc::new(|_: &str| (503, "unavailable".to_string()));
    let (base, _) = spawn_stub(handler, None).await;
    assert!(api(&base, Duration::from_secs(5)).top_searches(9).await.is_none());

    let handler: Handler = Arc::new(|_: &str| (500, r#"{"ok": false}"#.to_string()));
    let (base, _) = spawn_stub(handler, None).await;
    assert!(api(&base, Duration::from_secs(5)).top_searches(9).await.is_none());
}

#[tokio::test]
async fn test_full_workflow() {
    let (base, _) = spawn_stub(search_handler(), None).await;
    let api = api(&base, Duration::from_secs(5));
    let mut state = SearchState::default();

    // Successful search updates the route and title
    state.set_username("octocat");
    let request = state.submit().unwrap();
    let outcome = api.search(&request.username).await;
    assert!(state.complete(request.id, outcome));
    assert_eq!(state.location().path(), "/github/octocat");
    assert_eq!(state.location().title(), "GitLingo • github • octocat");

    // Forks are hidden by default, unknown is shown
    let data = state.filtered_data().unwrap();
    assert_eq!(data.len(), 2);
    assert!(data.iter().all(|d| !d.is_forks()));

    // A failed search afterwards resets both
    state.set_username("notexist");
    let request = state.submit().unwrap();
    let outcome = api.search(&request.username).await;
    assert!(state.complete(request.id, outcome));
    assert_eq!(state.location().path(), "/");
    assert_eq!(state.location().title(), "GitLingo");
    assert_eq!(state.error().unwrap().code, ErrorCode::UserNotFound);
}
