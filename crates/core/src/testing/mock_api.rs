//! In-memory `ArrApi` double.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::api::{ApiError, ArrApi};

/// Mock service API backed by per-endpoint JSON collections.
///
/// `post` appends the body to the matching collection, so repeated ensure
/// operations observe their own writes. Individual endpoints can be made to
/// fail on fetch or on creation.
pub struct MockArrApi {
    name: String,
    ready: AtomicBool,
    collections: Mutex<HashMap<String, Vec<Value>>>,
    raw_responses: Mutex<HashMap<String, Value>>,
    failing_gets: Mutex<HashSet<String>>,
    failing_posts: Mutex<HashSet<String>>,
    posts: Mutex<Vec<(String, Value)>>,
    puts: Mutex<Vec<(String, Value)>>,
}

impl MockArrApi {
    pub fn new() -> Self {
        Self::named("mock")
    }

    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ready: AtomicBool::new(true),
            collections: Mutex::new(HashMap::new()),
            raw_responses: Mutex::new(HashMap::new()),
            failing_gets: Mutex::new(HashSet::new()),
            failing_posts: Mutex::new(HashSet::new()),
            posts: Mutex::new(Vec::new()),
            puts: Mutex::new(Vec::new()),
        }
    }

    /// Control what `wait_for_ready` reports.
    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    /// Seed the collection returned by `get(endpoint)`.
    pub fn set_collection(&self, endpoint: &str, entries: Vec<Value>) {
        self.collections
            .lock()
            .unwrap()
            .insert(endpoint.to_string(), entries);
    }

    /// Make `get(endpoint)` return an arbitrary (possibly non-array) value.
    pub fn set_raw_response(&self, endpoint: &str, value: Value) {
        self.raw_responses
            .lock()
            .unwrap()
            .insert(endpoint.to_string(), value);
    }

    /// Make `get(endpoint)` fail with a connection error.
    pub fn fail_get(&self, endpoint: &str) {
        self.failing_gets.lock().unwrap().insert(endpoint.to_string());
    }

    /// Make `post(endpoint, ..)` fail with an API error.
    pub fn fail_post(&self, endpoint: &str) {
        self.failing_posts.lock().unwrap().insert(endpoint.to_string());
    }

    /// All recorded creation requests, in order.
    pub fn posts(&self) -> Vec<(String, Value)> {
        self.posts.lock().unwrap().clone()
    }

    /// Number of creation requests sent to `endpoint`.
    pub fn posts_to(&self, endpoint: &str) -> usize {
        self.posts
            .lock()
            .unwrap()
            .iter()
            .filter(|(e, _)| e == endpoint)
            .count()
    }

    /// All recorded update requests, in order.
    pub fn puts(&self) -> Vec<(String, Value)> {
        self.puts.lock().unwrap().clone()
    }
}

impl Default for MockArrApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArrApi for MockArrApi {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get(&self, endpoint: &str) -> Result<Value, ApiError> {
        if self.failing_gets.lock().unwrap().contains(endpoint) {
            return Err(ApiError::ConnectionFailed(format!(
                "mock get failure for {}",
                endpoint
            )));
        }
        if let Some(raw) = self.raw_responses.lock().unwrap().get(endpoint) {
            return Ok(raw.clone());
        }
        let collections = self.collections.lock().unwrap();
        Ok(Value::Array(
            collections.get(endpoint).cloned().unwrap_or_default(),
        ))
    }

    async fn post(&self, endpoint: &str, body: &Value) -> Result<Value, ApiError> {
        if self.failing_posts.lock().unwrap().contains(endpoint) {
            return Err(ApiError::Api(format!("mock post failure for {}", endpoint)));
        }
        self.posts
            .lock()
            .unwrap()
            .push((endpoint.to_string(), body.clone()));
        self.collections
            .lock()
            .unwrap()
            .entry(endpoint.to_string())
            .or_default()
            .push(body.clone());
        Ok(body.clone())
    }

    async fn put(&self, endpoint: &str, body: &Value) -> Result<Value, ApiError> {
        self.puts
            .lock()
            .unwrap()
            .push((endpoint.to_string(), body.clone()));
        Ok(body.clone())
    }

    async fn wait_for_ready(&self, _timeout: Duration) -> bool {
        self.ready.load(Ordering::SeqCst)
    }
}
