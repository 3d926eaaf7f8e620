#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use unisystem_ui::backend::{BackendClient, BackendResponse};
use unisystem_ui::error::BackendError;

#[derive(Debug, Clone, PartialEq)]
pub struct SentRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// Backend stand-in answering from scripted responses, keyed by `"METHOD path"`.
///
/// Unscripted requests fail at the transport level. Each key can be scripted several
/// times; the last answer repeats once the queue runs dry.
#[derive(Default)]
pub struct RecordingClient {
    scripted: Mutex<HashMap<String, VecDeque<Result<BackendResponse, String>>>>,
    sent: Mutex<Vec<SentRequest>>,
}

impl RecordingClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, method: Method, path: &str, status: u16, body: impl Into<String>) -> &Self {
        self.push(method, path, Ok(BackendResponse::new(status, body)))
    }

    pub fn respond_json(&self, method: Method, path: &str, status: u16, body: Value) -> &Self {
        self.respond(method, path, status, body.to_string())
    }

    pub fn fail(&self, method: Method, path: &str) -> &Self {
        self.push(method, path, Err("connection refused".to_string()))
    }

    fn push(&self, method: Method, path: &str, answer: Result<BackendResponse, String>) -> &Self {
        self.scripted
            .lock()
            .unwrap()
            .entry(format!("{} {}", method, path))
            .or_default()
            .push_back(answer);
        self
    }

    pub fn sent(&self) -> Vec<SentRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, method: Method, path: &str) -> Vec<SentRequest> {
        self.sent()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }
}

#[async_trait]
impl BackendClient for RecordingClient {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<BackendResponse, BackendError> {
        self.sent.lock().unwrap().push(SentRequest {
            method: method.clone(),
            path: path.to_string(),
            body,
        });

        let key = format!("{} {}", method, path);
        let mut scripted = self.scripted.lock().unwrap();
        let answer = match scripted.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };
        match answer {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(BackendError::Transport(message)),
            None => Err(BackendError::Transport(format!("no response scripted for {}", key))),
        }
    }
}
