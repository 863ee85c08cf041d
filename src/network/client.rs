//! HTTP client wrapper - executes requests and formats responses

use std::time::{Duration, Instant};

use crate::models::{HttpMethod, KeyValue, RequestSnapshot, ResponseOutcome};

/// Build a request from the snapshot, or fail with a construction message
fn build_request(
    client: &reqwest::Client,
    request: &RequestSnapshot,
) -> Result<reqwest::RequestBuilder, String> {
    let mut url = reqwest::Url::parse(&request.url)
        .map_err(|e| format!("Invalid URL \"{}\": {}", request.url, e))?;

    // Params are appended to whatever query string the URL already has
    if !request.query_params.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for param in &request.query_params {
            pairs.append_pair(&param.name, &param.value);
        }
    }

    let method = match request.method {
        HttpMethod::GET => reqwest::Method::GET,
        HttpMethod::POST => reqwest::Method::POST,
        HttpMethod::PUT => reqwest::Method::PUT,
        HttpMethod::PATCH => reqwest::Method::PATCH,
        HttpMethod::DELETE => reqwest::Method::DELETE,
    };

    let mut req_builder = client.request(method, url);

    // Duplicates are all sent
    for header in &request.headers {
        req_builder = req_builder.header(&header.name, &header.value);
    }

    if !request.body.is_empty() {
        req_builder = req_builder.body(request.body.clone());
    }

    Ok(req_builder)
}

/// Perform one exchange; never returns an error, only a `Failure` outcome
pub async fn execute_request(
    client: &reqwest::Client,
    request: RequestSnapshot,
    artificial_delay: Duration,
) -> ResponseOutcome {
    let start = Instant::now();

    let req_builder = match build_request(client, &request) {
        Ok(builder) => builder,
        Err(message) => return ResponseOutcome::Failure { message },
    };

    let resp = match req_builder.send().await {
        Ok(resp) => resp,
        Err(e) => {
            return ResponseOutcome::Failure {
                message: describe_error(&e),
            }
        }
    };

    let status = resp.status();
    let headers = resp
        .headers()
        .iter()
        .map(|(name, value)| KeyValue::new(name.as_str(), String::from_utf8_lossy(value.as_bytes())))
        .collect();

    let bytes = match resp.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            return ResponseOutcome::Failure {
                message: format!("Error reading body: {}", e),
            }
        }
    };
    let body_text = pretty_body(&bytes);

    tokio::time::sleep(artificial_delay).await;

    ResponseOutcome::Success {
        status_line: status.to_string(),
        status_code: status.as_u16(),
        headers,
        body_text,
        elapsed: start.elapsed(),
    }
}

/// Indented JSON when the payload parses, otherwise the raw text
pub fn pretty_body(bytes: &[u8]) -> String {
    match serde_json::from_slice::<serde_json::Value>(bytes) {
        Ok(json) => serde_json::to_string_pretty(&json)
            .unwrap_or_else(|_| String::from_utf8_lossy(bytes).into_owned()),
        Err(_) => String::from_utf8_lossy(bytes).into_owned(),
    }
}

fn describe_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("Request timed out: {}", e)
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else if e.is_builder() {
        format!("Invalid request: {}", e)
    } else {
        format!("Request failed: {}", e)
    }
}

/// Create an HTTP client; without a timeout the transport default applies
pub fn create_client(timeout: Option<Duration>) -> reqwest::Client {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(url: &str) -> RequestSnapshot {
        RequestSnapshot {
            method: HttpMethod::GET,
            url: url.to_string(),
            headers: vec![KeyValue::new("Accept", "a"), KeyValue::new("Accept", "b")],
            query_params: vec![KeyValue::new("q", "a b&c"), KeyValue::new("q", "2")],
            body: b"payload".to_vec(),
        }
    }

    #[test]
    fn test_pretty_body_indents_json() {
        assert_eq!(pretty_body(br#"{"b":1,"a":[true]}"#), "{\n  \"b\": 1,\n  \"a\": [\n    true\n  ]\n}");
        assert_eq!(pretty_body(b"\"hello\""), "\"hello\"");
    }

    #[test]
    fn test_pretty_body_passes_raw_text_through() {
        assert_eq!(pretty_body(b"not json"), "not json");
        assert_eq!(pretty_body(b""), "");
        assert_eq!(pretty_body(&[0x66, 0x6f, 0xff]), "fo\u{fffd}");
    }

    #[test]
    fn test_build_request_encodes_params_and_keeps_duplicates() {
        let client = create_client(None);
        let req = build_request(&client, &snapshot("http://localhost:8090/x?keep=1"))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(req.url().as_str(), "http://localhost:8090/x?keep=1&q=a+b%26c&q=2");
        let accept: Vec<_> = req.headers().get_all("accept").iter().collect();
        assert_eq!(accept.len(), 2);
        assert_eq!(req.body().and_then(|b| b.as_bytes()), Some(&b"payload"[..]));
    }

    #[test]
    fn test_build_request_rejects_relative_url() {
        let client = create_client(None);
        let err = build_request(&client, &snapshot("/just/a/path")).err().unwrap();
        assert!(err.starts_with("Invalid URL"));
    }

    #[tokio::test]
    async fn test_invalid_url_fails_without_delay() {
        let client = create_client(None);
        let start = Instant::now();
        let outcome = execute_request(&client, snapshot("not a url"), Duration::from_secs(5)).await;
        assert!(matches!(outcome, ResponseOutcome::Failure { .. }));
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_bad_header_name_is_a_failure() {
        let client = create_client(None);
        let mut request = snapshot("http://127.0.0.1:9/");
        request.headers = vec![KeyValue::new("bad header", "x")];
        let outcome = execute_request(&client, request, Duration::ZERO).await;
        match outcome {
            ResponseOutcome::Failure { message } => assert!(message.starts_with("Invalid request")),
            other => panic!("expected failure, got {:?}", other),
        }
    }
}
