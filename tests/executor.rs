use std::time::{Duration, Instant};

use courier_tui::models::{HttpMethod, KeyValue, RequestSnapshot, ResponseOutcome};
use courier_tui::network::client::{create_client, execute_request};
use tokio::net::TcpListener;

/// Serve the mock API on an ephemeral port, returning its base url
async fn spawn_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(courier_tui::mock_server::run(listener));
    format!("http://{}", addr)
}

fn get(url: String) -> RequestSnapshot {
    RequestSnapshot {
        method: HttpMethod::GET,
        url,
        headers: Vec::new(),
        query_params: Vec::new(),
        body: Vec::new(),
    }
}

fn expect_success(outcome: ResponseOutcome) -> (String, u16, Vec<KeyValue>, String) {
    match outcome {
        ResponseOutcome::Success { status_line, status_code, headers, body_text, .. } => {
            (status_line, status_code, headers, body_text)
        }
        ResponseOutcome::Failure { message } => panic!("request failed: {}", message),
    }
}

#[tokio::test]
async fn hello_is_200_with_pretty_body() {
    let base = spawn_server().await;
    let client = create_client(None);

    let outcome = execute_request(&client, get(format!("{}/hello", base)), Duration::ZERO).await;
    let (status_line, status_code, headers, body) = expect_success(outcome);
    assert_eq!(status_line, "200 OK");
    assert_eq!(status_code, 200);
    assert_eq!(body, "\"hello\"");
    assert!(headers.iter().any(|h| h.name == "content-type" && h.value == "application/json"));
}

#[tokio::test]
async fn error_statuses_are_successful_exchanges() {
    let base = spawn_server().await;
    let client = create_client(None);

    let outcome = execute_request(&client, get(format!("{}/4xxtest", base)), Duration::ZERO).await;
    let (status_line, status_code, _, body) = expect_success(outcome);
    assert_eq!(status_line, "404 Not Found");
    assert_eq!(status_code, 404);
    assert_eq!(body, "");

    let outcome = execute_request(&client, get(format!("{}/5xxtest", base)), Duration::ZERO).await;
    let (_, status_code, _, _) = expect_success(outcome);
    assert_eq!(status_code, 500);
}

#[tokio::test]
async fn params_are_encoded_in_order_with_duplicates() {
    let base = spawn_server().await;
    let client = create_client(None);

    let mut request = get(format!("{}/query", base));
    request.query_params = vec![
        KeyValue::new("tag", "a b"),
        KeyValue::new("page", "1"),
        KeyValue::new("tag", "x&y"),
    ];
    let outcome = execute_request(&client, request, Duration::ZERO).await;
    let (_, _, _, body) = expect_success(outcome);

    let pairs: Vec<(String, String)> = serde_json::from_str(&body).unwrap();
    assert_eq!(
        pairs,
        vec![
            ("tag".to_string(), "a b".to_string()),
            ("page".to_string(), "1".to_string()),
            ("tag".to_string(), "x&y".to_string()),
        ]
    );
}

#[tokio::test]
async fn headers_reach_the_server() {
    let base = spawn_server().await;
    let client = create_client(None);

    let mut request = get(format!("{}/headers", base));
    request.headers = vec![KeyValue::new("X-Probe", "value with spaces")];
    let outcome = execute_request(&client, request, Duration::ZERO).await;
    let (_, _, _, body) = expect_success(outcome);

    let echoed: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(echoed["x-probe"], "value with spaces");
}

#[tokio::test]
async fn body_is_sent() {
    let base = spawn_server().await;
    let client = create_client(None);

    let request = RequestSnapshot {
        method: HttpMethod::POST,
        url: format!("{}/user/9", base),
        headers: vec![KeyValue::new("Content-Type", "application/json")],
        query_params: Vec::new(),
        body: br#"{"firstName":"Ada","lastName":"L","money":3}"#.to_vec(),
    };
    let outcome = execute_request(&client, request, Duration::ZERO).await;
    let (_, status_code, _, body) = expect_success(outcome);
    assert_eq!(status_code, 201);
    assert_eq!(body, "{\n  \"firstName\": \"Ada\",\n  \"lastName\": \"L\",\n  \"money\": 3\n}");
}

#[tokio::test]
async fn artificial_delay_is_included_in_elapsed() {
    let base = spawn_server().await;
    let client = create_client(None);
    let delay = Duration::from_millis(200);

    let start = Instant::now();
    let outcome = execute_request(&client, get(format!("{}/hello", base)), delay).await;
    assert!(start.elapsed() >= delay);
    match outcome {
        ResponseOutcome::Success { elapsed, .. } => assert!(elapsed >= delay),
        other => panic!("expected success, got {:?}", other),
    }
}

#[tokio::test]
async fn refused_connection_is_a_failure() {
    // Grab a free port, then close it
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = create_client(Some(Duration::from_secs(5)));
    let outcome = execute_request(&client, get(format!("http://{}/hello", addr)), Duration::ZERO).await;
    match outcome {
        ResponseOutcome::Failure { message } => assert!(!message.is_empty()),
        other => panic!("expected failure, got {:?}", other),
    }
}
