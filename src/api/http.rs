use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde_json::Value as JsonValue;

use super::{ApiRequest, Method, RequestBody, Transport};
use crate::error::{ClientError, ClientResult};

/// [`Transport`] over HTTP using `reqwest`.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    probe_path: String,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(base_url: &str, api_prefix: &str, connect_timeout: Duration, timeout: Duration) -> ClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            probe_path: format!("{}/server", api_prefix.trim_end_matches('/')),
            timeout,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn map_err(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout { after_ms: self.timeout.as_millis() as u64 }
        } else {
            ClientError::Network(err.to_string())
        }
    }

    async fn read_body(&self, response: Response) -> ClientResult<JsonValue> {
        let status = response.status();
        let text = response.text().await.map_err(|e| self.map_err(e))?;
        let parsed: Option<JsonValue> = if text.trim().is_empty() { None } else { serde_json::from_str(&text).ok() };

        if !status.is_success() {
            let message = parsed
                .as_ref()
                .and_then(|v| v.get("error"))
                .and_then(|e| e.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());
            return Err(ClientError::Http { status: status.as_u16(), message });
        }

        match parsed {
            Some(value) => Ok(value),
            None if text.trim().is_empty() => Ok(JsonValue::Null),
            None => Err(ClientError::Decode(format!("response from backend is not JSON ({} bytes)", text.len()))),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<JsonValue> {
        let url = self.url(&request.path);
        let builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Delete => self.client.delete(&url),
        };
        let builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(&body),
            RequestBody::Upload { directory, file } => {
                let part = Part::bytes(file.bytes).file_name(file.name);
                builder.multipart(Form::new().text("path", directory).part("file", part))
            }
        };
        let response = builder.send().await.map_err(|e| self.map_err(e))?;
        self.read_body(response).await
    }

    async fn probe(&self) -> ClientResult<()> {
        let response = self.client.head(self.url(&self.probe_path)).send().await.map_err(|e| self.map_err(e))?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ClientError::Http {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Probe failed").to_string(),
            })
        }
    }
}
