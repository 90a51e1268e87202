use log::Level;
use mockito::Server;
use osintaam::types::{Category, Coverage, Platform, BROWSER_USER_AGENT};
use osintaam::{
    Config, Fetch, Gateway, GatewayError, GatewayResponse, Logger, NullLogger, OsintEngine, Query,
    SearchResult,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

#[derive(Default)]
struct RecordingLogger {
    lines: Mutex<Vec<(Level, String)>>,
}

impl Logger for RecordingLogger {
    fn log(&self, level: Level, message: &str) {
        self.lines.lock().unwrap().push((level, message.to_string()));
    }
}

fn create_test_gateway() -> Gateway {
    Gateway::new(&Config::default(), Arc::new(NullLogger)).unwrap()
}

/// Accepts connections and never answers them.
async fn silent_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{}/slow", addr)
}

/// Accepts connections and closes them before sending anything.
async fn hangup_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            drop(socket);
        }
    });
    format!("http://{}/", addr)
}

#[tokio::test]
async fn test_fetch_success() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/users/octocat")
        .match_header("user-agent", BROWSER_USER_AGENT)
        .with_status(200)
        .with_header("x-test", "yes")
        .with_body(r#"{"login":"octocat"}"#)
        .create_async()
        .await;

    let gateway = create_test_gateway();
    let response = gateway
        .fetch(&format!("{}/users/octocat", server.url()), 10)
        .await;

    match response {
        GatewayResponse::Success { code, content, headers } => {
            assert_eq!(code, 200);
            assert_eq!(content, r#"{"login":"octocat"}"#);
            assert_eq!(headers.get("x-test").map(String::as_str), Some("yes"));
        }
        other => panic!("expected success, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_follows_redirects() {
    let mut server = Server::new_async().await;
    let _start = server
        .mock("GET", "/start")
        .with_status(302)
        .with_header("location", &format!("{}/final", server.url()))
        .create_async()
        .await;
    let _final = server
        .mock("GET", "/final")
        .with_status(200)
        .with_body("landed")
        .create_async()
        .await;

    let response = create_test_gateway()
        .fetch(&format!("{}/start", server.url()), 10)
        .await;

    assert!(matches!(
        response,
        GatewayResponse::Success { code: 200, ref content, .. } if content == "landed"
    ));
}

#[tokio::test]
async fn test_fetch_http_error_statuses() {
    let mut server = Server::new_async().await;
    let _missing = server.mock("GET", "/missing").with_status(404).create_async().await;
    let _broken = server.mock("GET", "/broken").with_status(503).create_async().await;

    let gateway = create_test_gateway();
    for (path, status) in [("/missing", 404), ("/broken", 503)] {
        let response = gateway.fetch(&format!("{}{}", server.url(), path), 10).await;
        assert_eq!(
            response,
            GatewayResponse::Error {
                error: GatewayError::HttpStatus(status)
            }
        );
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({"status": "error", "error": "HTTP Error"})
        );
    }
}

#[tokio::test]
async fn test_fetch_timeout() {
    let url = silent_server().await;

    let started = std::time::Instant::now();
    let response = create_test_gateway().fetch(&url, 1).await;

    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        serde_json::json!({"status": "error", "error": "Request timeout"})
    );
}

#[tokio::test]
async fn test_fetch_connection_refused() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let response = create_test_gateway()
        .fetch(&format!("http://{}/", addr), 5)
        .await;

    assert_eq!(
        response,
        GatewayResponse::Error {
            error: GatewayError::ConnectionFailure
        }
    );
}

#[tokio::test]
async fn test_fetch_connection_dropped_after_accept() {
    let url = hangup_server().await;

    let response = create_test_gateway().fetch(&url, 5).await;

    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        serde_json::json!({"status": "error", "error": "Connection failed"})
    );
}

#[tokio::test]
async fn test_fetch_unknown_fault_keeps_message() {
    let response = create_test_gateway().fetch("not a url", 5).await;

    match response {
        GatewayResponse::Error {
            error: GatewayError::Unknown(message),
        } => assert!(!message.is_empty()),
        other => panic!("expected an unknown fault, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_logs_before_and_on_failure() {
    let mut server = Server::new_async().await;
    let _mock = server.mock("GET", "/gone").with_status(410).create_async().await;

    let logger = Arc::new(RecordingLogger::default());
    let gateway = Gateway::new(&Config::default(), logger.clone()).unwrap();
    let url = format!("{}/gone", server.url());
    gateway.fetch(&url, 10).await;

    let lines = logger.lines.lock().unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], (Level::Info, format!("Requesting: {}", url)));
    assert_eq!(lines[1].0, Level::Error);
    assert!(lines[1].1.starts_with("HTTP error"));
}

#[tokio::test]
async fn test_username_search_against_live_platforms() {
    let mut server = Server::new_async().await;
    let _github = server
        .mock("GET", "/users/octocat")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;
    let _linkedin = server
        .mock("GET", "/in/octocat")
        .with_status(404)
        .create_async()
        .await;

    let config = Config {
        platforms: vec![
            Platform::new("github", &format!("{}/users/{{username}}", server.url())),
            Platform::new("linkedin", &format!("{}/in/{{username}}", server.url())),
        ],
        ..Config::default()
    };
    let mut engine = OsintEngine::new(&config, Arc::new(NullLogger)).unwrap();

    let result = engine.run(&Query::new(Category::Username, "octocat")).await.clone();
    let SearchResult::Username(report) = result else {
        panic!("expected a username record");
    };

    let github = report.platforms.get("github").unwrap();
    assert!(github.found);
    assert_eq!(github.status_code, Some(200));
    assert_eq!(github.url.as_deref(), Some(format!("{}/users/octocat", server.url()).as_str()));

    let linkedin = report.platforms.get("linkedin").unwrap();
    assert!(!linkedin.found);
    assert_eq!(linkedin.error.as_deref(), Some("HTTP Error"));
    assert_eq!(report.coverage, Coverage::Live);
}
