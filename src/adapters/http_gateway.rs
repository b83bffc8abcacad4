//! HTTP command gateway.
//!
//! Every backend command is `POST {base_url}/invoke/{command}` with the JSON
//! argument bag as body. A 2xx reply carries the JSON result (an empty body
//! means `null`); any other status carries the backend's error payload.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error};

use crate::error::CommandError;
use crate::traits::{CommandGateway, Headers, HttpClient};

/// Command gateway over an [`HttpClient`].
#[derive(Debug, Clone)]
pub struct HttpGateway<C: HttpClient> {
    client: C,
    base_url: String,
}

impl<C: HttpClient> HttpGateway<C> {
    /// Create a gateway rooted at `base_url` (e.g. `http://127.0.0.1:4717`).
    pub fn new(client: C, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Base URL commands are posted to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for a command.
    pub fn command_url(&self, command: &str) -> String {
        format!("{}/invoke/{}", self.base_url, command)
    }

    fn json_headers() -> Headers {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "application/json".to_string());
        headers
    }
}

#[async_trait]
impl<C: HttpClient> CommandGateway for HttpGateway<C> {
    async fn invoke(&self, command: &str, args: Value) -> Result<Value, CommandError> {
        let body = serde_json::to_string(&args).map_err(|e| CommandError::InvalidArguments {
            command: command.to_string(),
            message: e.to_string(),
        })?;

        debug!(command, "invoking backend command");

        let response = self
            .client
            .post(&self.command_url(command), &body, &Self::json_headers())
            .await
            .map_err(|e| {
                error!(command, error = %e, "backend unreachable");
                CommandError::Transport {
                    command: command.to_string(),
                    message: e.to_string(),
                }
            })?;

        if response.is_success() {
            if response.body.is_empty() {
                return Ok(Value::Null);
            }
            return response.json::<Value>().map_err(|e| CommandError::Decode {
                command: command.to_string(),
                message: e.to_string(),
            });
        }

        let payload = response.json::<Value>().unwrap_or_else(|_| {
            let text = response.text().unwrap_or_default();
            if text.trim().is_empty() {
                Value::String(format!("Backend returned HTTP {}", response.status))
            } else {
                Value::String(text)
            }
        });
        let err = CommandError::from_backend_payload(command, &payload);
        error!(command, status = response.status, error = %err, "backend command failed");
        Err(err)
    }
}
