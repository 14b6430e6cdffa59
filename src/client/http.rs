//! HTTP Transport
//!
//! Async HTTP transport with bearer-credential attachment and a chunked
//! byte-stream path for streamed completions.

use crate::api::completion::WireError;
use crate::error::{AgentryError, Result};
use bytes::Bytes;
use futures::Stream;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::pin::Pin;
use std::time::Duration;

/// Chunked response body as a stream of byte buffers
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send>>;

/// HTTP transport shared by all client operations
pub struct HttpTransport {
    /// Inner reqwest client
    client: Client,
}

impl HttpTransport {
    /// Create a new transport
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(300)) // 5 minute timeout for long completions
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| AgentryError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    fn headers(credential: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", credential))
                .map_err(|e| AgentryError::Config(format!("Invalid credential format: {}", e)))?,
        );
        Ok(headers)
    }

    /// Issue a GET and report only whether the status was a success.
    pub async fn get_status(&self, url: &str, credential: &str) -> Result<u16> {
        let response = self
            .client
            .get(url)
            .headers(Self::headers(credential)?)
            .send()
            .await?;

        Ok(response.status().as_u16())
    }

    /// GET a JSON body and deserialize it.
    pub async fn get_json<R>(&self, url: &str, credential: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let response = self
            .client
            .get(url)
            .headers(Self::headers(credential)?)
            .send()
            .await?;

        Self::decode_response(response).await
    }

    /// POST a JSON body and deserialize the JSON response.
    pub async fn post_json<T, R>(&self, url: &str, body: &T, credential: &str) -> Result<R>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(url)
            .headers(Self::headers(credential)?)
            .json(body)
            .send()
            .await?;

        Self::decode_response(response).await
    }

    /// POST a JSON body and return the response as a byte stream.
    ///
    /// A non-success status fails here, before any decode is attempted; the
    /// error body is not consulted on this path.
    pub async fn post_stream(
        &self,
        url: &str,
        body: &impl Serialize,
        credential: &str,
    ) -> Result<ByteStream> {
        use async_stream::stream;
        use futures::StreamExt;

        let response = self
            .client
            .post(url)
            .headers(Self::headers(credential)?)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), url, "streaming request rejected");
            return Err(AgentryError::status(status.as_u16(), None));
        }

        let mut byte_stream = response.bytes_stream();
        let s = stream! {
            while let Some(chunk) = byte_stream.next().await {
                yield chunk.map_err(AgentryError::from);
            }
        };

        Ok(Box::pin(s))
    }

    async fn decode_response<R>(response: reqwest::Response) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            return serde_json::from_str(&body).map_err(|e| {
                AgentryError::Response(format!(
                    "Failed to parse response: {}. Body: {}",
                    e,
                    &body[..body.len().min(500)]
                ))
            });
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), "request rejected by service");
        Err(AgentryError::status(
            status.as_u16(),
            WireError::message_from_body(&body),
        ))
    }
}
