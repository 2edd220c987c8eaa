use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::info;

use crate::errors::JsonApiError;
use crate::routes::AppState;

#[derive(Debug, Deserialize)]
pub struct KeyValueQuery {
    pub file: String,
    pub key: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct KeyQuery {
    pub file: String,
    pub key: String,
}

#[derive(Debug, Deserialize)]
pub struct FileQuery {
    pub file: String,
}

#[derive(Debug, Deserialize)]
pub struct PairQuery {
    pub a: String,
    pub b: String,
}

#[derive(Debug, Deserialize)]
pub struct MergeQuery {
    /// Comma-separated document names.
    pub files: String,
}

/// PATCH /set?file=&key=&value= ; the value is stored as a JSON string
pub async fn set_value(
    State(state): State<AppState>,
    q: Result<Query<KeyValueQuery>, QueryRejection>,
) -> Result<&'static str, JsonApiError> {
    let Query(q) = q?;
    state.store.set(&q.file, &q.key, Value::String(q.value)).await?;
    Ok("value set")
}

/// GET /get?file=&key=
pub async fn get_value(
    State(state): State<AppState>,
    q: Result<Query<KeyQuery>, QueryRejection>,
) -> Result<Json<Value>, JsonApiError> {
    let Query(q) = q?;
    match state.store.get(&q.file, &q.key).await? {
        Some(v) => Ok(Json(v)),
        None => Err(JsonApiError::new(
            StatusCode::NOT_FOUND,
            "Invalid Key",
            Some(format!("{} invalid key on {}", q.key, q.file)),
        )),
    }
}

/// DELETE /remove?file=&key=
pub async fn remove_key(
    State(state): State<AppState>,
    q: Result<Query<KeyQuery>, QueryRejection>,
) -> Result<&'static str, JsonApiError> {
    let Query(q) = q?;
    state.store.delete(&q.file, &q.key).await?;
    Ok("key removed")
}

/// POST /files?file= with an optional JSON object body as initial content
pub async fn create_file(
    State(state): State<AppState>,
    q: Result<Query<FileQuery>, QueryRejection>,
    body: Bytes,
) -> Result<(StatusCode, String), JsonApiError> {
    let Query(q) = q?;
    let initial = if body.is_empty() {
        None
    } else {
        match serde_json::from_slice::<Value>(&body) {
            Ok(Value::Object(doc)) => Some(doc),
            Ok(_) => return Err(JsonApiError::bad_request("initial content must be a JSON object")),
            Err(e) => return Err(JsonApiError::bad_request(format!("invalid JSON body: {e}"))),
        }
    };
    state.store.create_file(&q.file, initial).await?;
    info!(file = %q.file, "document created via http");
    Ok((StatusCode::CREATED, format!("{} created", q.file)))
}

/// DELETE /files?file=
pub async fn delete_file(
    State(state): State<AppState>,
    q: Result<Query<FileQuery>, QueryRejection>,
) -> Result<StatusCode, JsonApiError> {
    let Query(q) = q?;
    state.store.delete_file(&q.file).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn union(
    State(state): State<AppState>,
    q: Result<Query<PairQuery>, QueryRejection>,
) -> Result<Json<Vec<String>>, JsonApiError> {
    let Query(q) = q?;
    Ok(Json(state.store.union(&q.a, &q.b).await?))
}

pub async fn intersection(
    State(state): State<AppState>,
    q: Result<Query<PairQuery>, QueryRejection>,
) -> Result<Json<Vec<String>>, JsonApiError> {
    let Query(q) = q?;
    Ok(Json(state.store.intersection(&q.a, &q.b).await?))
}

pub async fn difference(
    State(state): State<AppState>,
    q: Result<Query<PairQuery>, QueryRejection>,
) -> Result<Json<Vec<String>>, JsonApiError> {
    let Query(q) = q?;
    Ok(Json(state.store.difference(&q.a, &q.b).await?))
}

/// GET /merge?files=a.json,b.json
pub async fn merge(
    State(state): State<AppState>,
    q: Result<Query<MergeQuery>, QueryRejection>,
) -> Result<Json<Map<String, Value>>, JsonApiError> {
    let Query(q) = q?;
    let names: Vec<String> = q
        .files
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if names.is_empty() {
        return Err(JsonApiError::bad_request("files must name at least one document"));
    }
    Ok(Json(state.store.merge_all(&names).await?))
}
