//! Local API for the seed queries to talk to

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

pub const ACCEPT_V1: &str = "application/json;v=1";
pub const ACCEPT_V2: &str = "application/json;v=2";

const UNSUPPORTED_VERSION: &str =
    "API version not supported. Must pass Accept header set to application/json;v=1 OR application/json;v=2";

/// Stored user; absent fields decode to their zero values
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
    pub money: i64,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct AccountV1 {
    pub money: i64,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct PersonV1 {
    pub name: String,
    pub account: AccountV1,
}

impl From<&Person> for PersonV1 {
    fn from(p: &Person) -> Self {
        PersonV1 {
            name: format!("{} {}", p.first_name, p.last_name),
            account: AccountV1 { money: p.money },
        }
    }
}

pub type Db = Arc<RwLock<BTreeMap<String, Person>>>;

fn seeded_db() -> Db {
    let mut people = BTreeMap::new();
    people.insert(
        "1".to_string(),
        Person {
            first_name: "John".to_string(),
            last_name: "Wick".to_string(),
            money: 100000,
        },
    );
    Arc::new(RwLock::new(people))
}

pub fn app() -> Router {
    Router::new()
        .route("/hello", get(hello))
        .route("/headers", get(echo_headers))
        .route("/query", get(echo_query))
        .route("/4xxtest", get(|| async { StatusCode::NOT_FOUND }))
        .route("/5xxtest", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route("/user/{key}", get(get_user).post(create_user))
        .route("/users", get(list_users))
        .with_state(seeded_db())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn hello() -> Json<&'static str> {
    Json("hello")
}

/// Header name to value; the last value wins for repeated names
async fn echo_headers(headers: HeaderMap) -> Json<BTreeMap<String, String>> {
    let map = headers
        .iter()
        .map(|(name, value)| {
            (name.as_str().to_string(), String::from_utf8_lossy(value.as_bytes()).into_owned())
        })
        .collect();
    Json(map)
}

/// Decoded query pairs in request order
async fn echo_query(Query(pairs): Query<Vec<(String, String)>>) -> Json<Vec<(String, String)>> {
    Json(pairs)
}

async fn get_user(State(db): State<Db>, Path(key): Path<String>, headers: HeaderMap) -> Response {
    let accept = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let people = db.read().await;

    match accept {
        ACCEPT_V1 => match people.get(&key) {
            Some(person) => Json(PersonV1::from(person)).into_response(),
            None => StatusCode::NOT_FOUND.into_response(),
        },
        ACCEPT_V2 => match people.get(&key) {
            Some(person) => Json(person.clone()).into_response(),
            None => StatusCode::NOT_FOUND.into_response(),
        },
        _ => (StatusCode::BAD_REQUEST, Json(UNSUPPORTED_VERSION)).into_response(),
    }
}

/// Any body that decodes as a person is accepted, whatever its content type
async fn create_user(State(db): State<Db>, Path(key): Path<String>, body: Bytes) -> Response {
    let person: Person = match serde_json::from_slice(&body) {
        Ok(person) => person,
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "Rejected user payload");
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    tracing::info!(key = %key, "Stored user");
    db.write().await.insert(key, person.clone());
    (StatusCode::CREATED, Json(person)).into_response()
}

/// Key to "First Last - $money"
async fn list_users(State(db): State<Db>) -> Json<BTreeMap<String, String>> {
    let people = db.read().await;
    let summary = people
        .iter()
        .map(|(key, p)| (key.clone(), format!("{} {} - ${}", p.first_name, p.last_name, p.money)))
        .collect();
    Json(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_uses_camel_case_fields() {
        let person = Person {
            first_name: "Helen".to_string(),
            last_name: "Wick".to_string(),
            money: 250,
        };
        let json = serde_json::to_value(&person).unwrap();
        assert_eq!(json["firstName"], "Helen");
        assert_eq!(json["lastName"], "Wick");
        assert_eq!(json["money"], 250);
    }

    #[test]
    fn person_missing_fields_default() {
        let person: Person = serde_json::from_str(r#"{"firstName":"Solo"}"#).unwrap();
        assert_eq!(person.first_name, "Solo");
        assert_eq!(person.last_name, "");
        assert_eq!(person.money, 0);
    }

    #[test]
    fn v1_view_joins_names() {
        let person = Person {
            first_name: "John".to_string(),
            last_name: "Wick".to_string(),
            money: 7,
        };
        let v1 = PersonV1::from(&person);
        assert_eq!(v1.name, "John Wick");
        assert_eq!(v1.account.money, 7);
    }
}
