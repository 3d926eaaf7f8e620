use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::BackendError;

/// Raw answer from the REST backend: status code plus the untouched text body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendResponse {
    pub status: u16,
    pub body: String,
}

impl BackendResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn into_result(self) -> Result<Self, BackendError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(BackendError::Status {
                status: self.status,
                body: self.body,
            })
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, BackendError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

#[async_trait]
pub trait BackendClient: Send + Sync {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<BackendResponse, BackendError>;
}

pub struct HttpBackendClient {
    client: Client,
    base_url: String,
}

impl HttpBackendClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, BackendError> {
        let client = Client::builder()
            .build()
            .map_err(|e| BackendError::Transport(format!("Failed to build http client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl BackendClient for HttpBackendClient {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<BackendResponse, BackendError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let mut request = self.client.request(method.clone(), &url);
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        debug!("{} {} -> {}", method, url, status);

        Ok(BackendResponse { status, body })
    }
}

/// Base path of one backend resource, handed to each controller at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resource {
    base: String,
}

impl Resource {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.base
    }

    pub fn item(&self, id: i64) -> String {
        format!("{}/{}", self.base, id)
    }

    pub fn activation(&self, id: i64) -> String {
        format!("{}/{}/activate", self.base, id)
    }
}

/// GET `path` and decode the success body as `T`.
pub async fn fetch_json<T: DeserializeOwned>(
    client: &dyn BackendClient,
    path: &str,
) -> Result<T, BackendError> {
    client.send(Method::GET, path, None).await?.into_result()?.json()
}
