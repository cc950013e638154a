//! In-memory transport for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use reqwest::{StatusCode, Url};
use serde_json::Value;

use crate::fetch::{FetchError, Transport};

enum Reply {
    Json(Value, Duration),
    Status(StatusCode),
    Broken,
}

#[derive(Default)]
pub struct FakeTransport {
    replies: HashMap<String, Reply>,
    pub gets: Mutex<Vec<String>>,
    pub puts: Mutex<Vec<(String, String)>>,
    put_status: Option<StatusCode>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json(mut self, url: &str, value: Value) -> Self {
        self.replies
            .insert(url.to_string(), Reply::Json(value, Duration::ZERO));
        self
    }

    /// Reply after `delay`, to force a completion order.
    pub fn delayed_json(mut self, url: &str, value: Value, delay: Duration) -> Self {
        self.replies.insert(url.to_string(), Reply::Json(value, delay));
        self
    }

    pub fn status(mut self, url: &str, status: StatusCode) -> Self {
        self.replies.insert(url.to_string(), Reply::Status(status));
        self
    }

    pub fn broken(mut self, url: &str) -> Self {
        self.replies.insert(url.to_string(), Reply::Broken);
        self
    }

    pub fn put_fails_with(mut self, status: StatusCode) -> Self {
        self.put_status = Some(status);
        self
    }

    pub fn get_count(&self) -> usize {
        self.gets.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl Transport for FakeTransport {
    async fn get_json(&self, url: &Url) -> Result<Value, FetchError> {
        self.gets.lock().unwrap().push(url.to_string());
        match self.replies.get(url.as_str()) {
            Some(Reply::Json(value, delay)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(*delay).await;
                }
                Ok(value.clone())
            }
            Some(Reply::Status(status)) => Err(FetchError::status(*status)),
            Some(Reply::Broken) | None => {
                Err(FetchError::Transport("connection refused".to_string()))
            }
        }
    }

    async fn put_json(&self, url: &Url, body: String) -> Result<(), FetchError> {
        self.puts.lock().unwrap().push((url.to_string(), body));
        match self.put_status {
            Some(status) => Err(FetchError::status(status)),
            None => Ok(()),
        }
    }
}
