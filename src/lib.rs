//! Agentry - Agent Persona Workbench Core
//!
//! A client library for configuring AI agent personas and running chat
//! completions against a Cerebras-style OpenAI-compatible inference API,
//! with both single-shot and incrementally streamed responses.
//!
//! A streamed call emits zero or more text deltas strictly before either the
//! `[DONE]` sentinel or end-of-stream; no text is ever delivered after the
//! sentinel. Per-call state lives entirely inside the call, so concurrent
//! calls on one client are independent.

use std::sync::Arc;

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod notify;
pub mod persona;
pub mod store;

use api::completion::ModelList;
use api::streaming::SseDecoder;
use client::HttpTransport;
use futures::StreamExt;

pub use api::{
    Choice, CompletionRequest, CompletionResponse, Message, Role, SamplingDefaults, Usage,
};
pub use client::{cancel_pair, CancelHandle, CancelSignal};
pub use config::{ConfigLoader, EndpointConfig};
pub use error::{AgentryError, Result};
pub use notify::{Notifier, NullNotifier, Severity, TracingNotifier};
pub use persona::{AgentPersona, TemplateCatalog};
pub use store::{CredentialStore, FileStore, MemoryStore, STORED_CREDENTIAL_KEY};

/// The completion client
///
/// Owns the HTTP request lifecycle and credential attachment for the chat
/// completion endpoint. The credential store and the notification sink are
/// injected capabilities.
pub struct CompletionClient {
    /// Endpoint configuration
    config: EndpointConfig,

    /// Credential storage
    store: Arc<dyn CredentialStore>,

    /// User-facing notification sink
    notifier: Arc<dyn Notifier>,

    /// HTTP transport
    transport: HttpTransport,
}

impl CompletionClient {
    /// Create a client with the default configuration and a given store.
    pub fn new(store: Arc<dyn CredentialStore>) -> Result<Self> {
        Self::with_config(ConfigLoader::new()?.into_config(), store)
    }

    /// Create a client from the environment.
    ///
    /// Loads `.env` if present; a credential found in the configured
    /// environment variable wins over the file-backed store.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let config = ConfigLoader::new()?.into_config();
        let store: Arc<dyn CredentialStore> = match config.credential_from_env() {
            Some(credential) => Arc::new(MemoryStore::with_credential(credential)),
            None => Arc::new(FileStore::new()),
        };

        Self::with_config(config, store)
    }

    /// Create a client from an explicit configuration and store.
    pub fn with_config(config: EndpointConfig, store: Arc<dyn CredentialStore>) -> Result<Self> {
        Ok(Self {
            config,
            store,
            notifier: Arc::new(TracingNotifier),
            transport: HttpTransport::new()?,
        })
    }

    /// Replace the notification sink.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// The endpoint configuration in use.
    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    /// Resolve the credential for one request.
    fn credential(&self) -> Result<String> {
        self.store
            .get()
            .or_else(|| self.config.credential_from_env())
            .ok_or_else(|| {
                AgentryError::Config("no API credential configured".to_string())
            })
    }

    /// Probe the service with the held credential.
    ///
    /// Returns `true` iff the service answered the models listing with a
    /// success status. Never fails: any transport error resolves to `false`.
    pub async fn validate_credential(&self) -> bool {
        let valid = match self.try_validate().await {
            Ok(ok) => ok,
            Err(err) => {
                tracing::debug!(error = %err, "credential validation failed");
                false
            }
        };

        if !valid {
            self.notifier.error("API credential validation failed");
        }
        valid
    }

    async fn try_validate(&self) -> Result<bool> {
        let credential = self.credential()?;
        let status = self
            .transport
            .get_status(&self.config.url("models"), &credential)
            .await?;
        Ok((200..300).contains(&status))
    }

    /// List the model identifiers the service reports.
    ///
    /// Failures are surfaced as a notification and an empty list, never as an
    /// error. A response of an unexpected shape also yields an empty list.
    pub async fn list_models(&self) -> Vec<String> {
        match self.try_list_models().await {
            Ok(models) => models,
            Err(err) => {
                tracing::warn!(error = %err, "failed to fetch models");
                self.notifier.error("Failed to fetch available models");
                Vec::new()
            }
        }
    }

    async fn try_list_models(&self) -> Result<Vec<String>> {
        let credential = self.credential()?;
        let list: ModelList = self
            .transport
            .get_json(&self.config.url("models"), &credential)
            .await?;
        Ok(list.data.into_iter().map(|m| m.id).collect())
    }

    /// Run a single-shot completion and return the full response.
    ///
    /// Unset request fields are filled from the configured defaults. An empty
    /// message list is rejected before any network call. Failures are
    /// propagated after a notification is emitted.
    pub async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse> {
        match self.try_complete(request).await {
            Ok(response) => Ok(response),
            Err(err) => {
                tracing::warn!(error = %err, "completion failed");
                self.notifier.error("Failed to generate AI completion");
                Err(err)
            }
        }
    }

    async fn try_complete(&self, request: &CompletionRequest) -> Result<CompletionResponse> {
        let wire = request.finalize(&self.config.defaults)?;
        let credential = self.credential()?;
        self.transport
            .post_json(&self.config.url("chat/completions"), &wire, &credential)
            .await
    }

    /// Run a streamed completion, invoking `on_delta` once per text delta.
    ///
    /// The streaming flag is forced on regardless of the request's value.
    /// Deltas are delivered synchronously in arrival order. A stream that
    /// closes without the `[DONE]` sentinel counts as a clean close.
    pub async fn stream_complete<F>(&self, request: &CompletionRequest, on_delta: F) -> Result<()>
    where
        F: FnMut(&str),
    {
        self.stream_inner(request, None, on_delta).await
    }

    /// Like [`stream_complete`](Self::stream_complete), with an explicit stop
    /// signal checked before every chunk read. Cancellation terminates the
    /// stream cleanly; it is not an error.
    pub async fn stream_complete_with_cancel<F>(
        &self,
        request: &CompletionRequest,
        cancel: CancelSignal,
        on_delta: F,
    ) -> Result<()>
    where
        F: FnMut(&str),
    {
        self.stream_inner(request, Some(cancel), on_delta).await
    }

    async fn stream_inner<F>(
        &self,
        request: &CompletionRequest,
        mut cancel: Option<CancelSignal>,
        mut on_delta: F,
    ) -> Result<()>
    where
        F: FnMut(&str),
    {
        let result = async {
            let mut wire = request.finalize(&self.config.defaults)?;
            wire.stream = true;

            let credential = self.credential()?;
            let mut stream = self
                .transport
                .post_stream(&self.config.url("chat/completions"), &wire, &credential)
                .await?;

            let mut decoder = SseDecoder::new();
            loop {
                let next = match cancel.as_mut() {
                    Some(signal) => {
                        if signal.is_cancelled() {
                            tracing::debug!("completion stream cancelled");
                            break;
                        }
                        tokio::select! {
                            _ = signal.cancelled() => {
                                tracing::debug!("completion stream cancelled");
                                break;
                            }
                            chunk = stream.next() => chunk,
                        }
                    }
                    None => stream.next().await,
                };

                // End of stream without a sentinel is a clean close; the
                // buffered partial line, if any, dies with the decoder.
                let Some(chunk) = next else { break };

                for delta in decoder.feed(&chunk?) {
                    on_delta(&delta);
                }

                if decoder.is_done() {
                    break;
                }
            }

            Ok(())
        }
        .await;

        if let Err(err) = &result {
            tracing::warn!(error = %err, "streaming completion failed");
            self.notifier.error("Failed to generate AI completion");
        }
        result
    }

    /// Generate a one-shot reply to a prompt, optionally framed by a system
    /// prompt, and return the first choice's text.
    pub async fn respond(&self, prompt: &str, system_prompt: Option<&str>) -> Result<String> {
        let mut messages = Vec::new();
        if let Some(system) = system_prompt {
            messages.push(Message::system(system));
        }
        messages.push(Message::user(prompt));

        let request = CompletionRequest::new(messages)
            .with_temperature(0.7)
            .with_max_tokens(2000);

        let response = self.complete(&request).await?;
        Ok(response
            .content()
            .unwrap_or("No response generated")
            .to_string())
    }

    /// Stream a reply from an agent persona: the persona's system prompt
    /// frames the conversation, the user prompt follows.
    pub async fn stream_persona<F>(
        &self,
        persona: &AgentPersona,
        prompt: &str,
        on_delta: F,
    ) -> Result<()>
    where
        F: FnMut(&str),
    {
        let request = CompletionRequest::new(vec![
            Message::system(persona.system_prompt()),
            Message::user(prompt),
        ])
        .with_temperature(0.7)
        .with_max_tokens(1500);

        self.stream_complete(&request, on_delta).await
    }
}
