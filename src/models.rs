use serde::{Deserialize, Serialize};
use std::time::Duration;

/// HTTP Method enum
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::DELETE => "DELETE",
        }
    }
}

/// A name/value pair, used for both headers and query parameters
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    pub name: String,
    pub value: String,
}

impl KeyValue {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        KeyValue {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Parse `name:value`, splitting on the first colon.
    ///
    /// Returns `None` when there is no colon; that input is dropped by the
    /// caller rather than reported.
    pub fn parse(input: &str) -> Option<Self> {
        let (name, value) = input.split_once(':')?;
        Some(KeyValue::new(name.trim(), value.trim()))
    }

    /// The `name:value` form used to seed the edit buffer
    pub fn to_edit_string(&self) -> String {
        format!("{}:{}", self.name, self.value)
    }
}

/// Result of one send attempt
#[derive(Clone, Debug, PartialEq)]
pub enum ResponseOutcome {
    Success {
        status_line: String,
        status_code: u16,
        headers: Vec<KeyValue>,
        body_text: String,
        elapsed: Duration,
    },
    Failure {
        message: String,
    },
}

impl ResponseOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ResponseOutcome::Success { .. })
    }
}

/// A named, reusable request template
#[derive(Clone, Debug, PartialEq)]
pub struct Query {
    pub name: String,
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<KeyValue>,
    pub query_params: Vec<KeyValue>,
    pub body: String,
    pub last_response: Option<ResponseOutcome>,
}

impl Query {
    pub fn new(name: impl Into<String>, method: HttpMethod, url: impl Into<String>) -> Self {
        Query {
            name: name.into(),
            method,
            url: url.into(),
            headers: Vec::new(),
            query_params: Vec::new(),
            body: String::new(),
            last_response: None,
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push(KeyValue::new(name, value));
        self
    }

    pub fn with_param(mut self, name: &str, value: &str) -> Self {
        self.query_params.push(KeyValue::new(name, value));
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Immutable copy of everything the executor needs
    pub fn snapshot(&self) -> RequestSnapshot {
        RequestSnapshot {
            method: self.method,
            url: self.url.clone(),
            headers: self.headers.clone(),
            query_params: self.query_params.clone(),
            body: self.body.clone().into_bytes(),
        }
    }
}

impl Default for Query {
    fn default() -> Self {
        use crate::constants::DEFAULT_BASE_URL;
        Query::new("untitled", HttpMethod::GET, DEFAULT_BASE_URL)
    }
}

/// What gets handed to the network layer for a single send
#[derive(Clone, Debug, PartialEq)]
pub struct RequestSnapshot {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<KeyValue>,
    pub query_params: Vec<KeyValue>,
    pub body: Vec<u8>,
}

/// The example queries every session starts with
pub fn seed_queries(base_url: &str) -> Vec<Query> {
    let base = base_url.trim_end_matches('/');
    let standard = |name: &str, path: &str, accept: &str| {
        Query::new(name, HttpMethod::GET, format!("{}{}", base, path))
            .with_header("Accept", accept)
            .with_header("Content-Type", "application/json")
            .with_header("User-Agent", "courier-tui")
    };

    vec![
        standard("mock server hello", "/hello", "application/json;v=2"),
        standard("mock server headers", "/headers", "*/*"),
        standard("mock api call v1", "/user/1", "application/json;v=1"),
        standard("mock api call v2", "/user/1", "application/json;v=2"),
        standard("mock api call 404", "/user/doesntexistlmao", "application/json;v=2"),
        standard("mock users", "/users", "application/json"),
        Query::new("mock create user", HttpMethod::POST, format!("{}/user/2", base))
            .with_header("Content-Type", "application/json")
            .with_header("User-Agent", "courier-tui")
            .with_body("{\n  \"firstName\": \"Helen\",\n  \"lastName\": \"Wick\",\n  \"money\": 250\n}"),
        standard("mock auth echo", "/headers", "application/json")
            .with_header("Authorization", "Bearer not-a-real-token")
            .with_param("verbose", "true"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_on_first_colon() {
        let kv = KeyValue::parse("Accept:application/json;v=2").unwrap();
        assert_eq!(kv, KeyValue::new("Accept", "application/json;v=2"));

        let kv = KeyValue::parse("Referer:http://localhost:8090/x").unwrap();
        assert_eq!(kv.name, "Referer");
        assert_eq!(kv.value, "http://localhost:8090/x");
    }

    #[test]
    fn test_parse_trims_and_rejects_missing_colon() {
        assert_eq!(KeyValue::parse(" Accept : text/plain "), Some(KeyValue::new("Accept", "text/plain")));
        assert_eq!(KeyValue::parse("NoColonHere"), None);
        assert_eq!(KeyValue::parse(""), None);
    }

    #[test]
    fn test_snapshot_copies_fields() {
        let query = Query::new("q", HttpMethod::POST, "http://example.com")
            .with_header("A", "1")
            .with_param("p", "v w")
            .with_body("{}");
        let snap = query.snapshot();
        assert_eq!(snap.method, HttpMethod::POST);
        assert_eq!(snap.url, "http://example.com");
        assert_eq!(snap.headers, vec![KeyValue::new("A", "1")]);
        assert_eq!(snap.query_params, vec![KeyValue::new("p", "v w")]);
        assert_eq!(snap.body, b"{}".to_vec());
    }

    #[test]
    fn test_seed_queries_use_base_url() {
        let queries = seed_queries("http://127.0.0.1:9000/");
        assert!(!queries.is_empty());
        assert_eq!(queries[0].name, "mock server hello");
        assert_eq!(queries[0].url, "http://127.0.0.1:9000/hello");
        assert!(queries.iter().all(|q| q.last_response.is_none()));
        assert!(queries.iter().any(|q| q.method == HttpMethod::POST));
    }
}
