pub mod registry;
pub mod request;
pub mod response;
pub mod timeout;

pub use registry::{Dialect, ProviderDescriptor, ProviderRegistry, RawEndpoint, RegistryError};
pub use request::OutboundCall;
pub use timeout::ATTEMPT_TIMEOUT;

use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const LOG_TARGET: &str = "gateway";

/// One translation to perform. Immutable; one instance per gateway call.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    /// ISO code or the literal "auto" for provider-side detection.
    pub source: String,
    pub target: String,
}

impl TranslationRequest {
    pub fn new(
        text: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Outcome of a single provider attempt. Every variant is recoverable at
/// the orchestrator level; the Display strings are the user-facing
/// messages.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AttemptError {
    #[error("{0}")]
    Http(String),
    #[error("Translation unavailable")]
    EmptyResult,
    #[error("Translation timed out. Please try again.")]
    Timeout,
    #[error("{0}")]
    Network(String),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Every provider in the registry failed; carries the message of the
    /// most recently tried provider's failure.
    #[error("{0}")]
    AllProvidersFailed(String),
}

/// Raw HTTP response as the normalizer consumes it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

/// Network seam: executes one outbound call. Implemented by the
/// reqwest-backed transport and by test stubs.
pub trait Transport: Send + Sync {
    fn execute(&self, call: OutboundCall) -> BoxFuture<'_, Result<RawResponse, AttemptError>>;
}

#[derive(Clone, Debug, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn execute(&self, call: OutboundCall) -> BoxFuture<'_, Result<RawResponse, AttemptError>> {
        let this = self.clone();
        async move {
            let url = call
                .request_url()
                .map_err(|e| AttemptError::Network(e.to_string()))?;

            let mut req = this.client.request(call.method.clone(), url);
            for (name, value) in &call.headers {
                req = req.header(*name, *value);
            }
            if let Some(body) = &call.body {
                req = req.json(body);
            }

            let res = req
                .send()
                .await
                .map_err(|e| AttemptError::Network(e.to_string()))?;

            let status = res.status().as_u16();
            let content_type = res
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);
            let body = res
                .text()
                .await
                .map_err(|e| AttemptError::Network(e.to_string()))?;

            Ok(RawResponse {
                status,
                content_type,
                body,
            })
        }
        .boxed()
    }
}

/// Drives the registry through build -> transport -> extract, strictly
/// sequentially: stops at the first success, otherwise records each failure
/// and surfaces the last one. Stateless across calls aside from the
/// registry; concurrent calls interleave freely.
#[derive(Clone)]
pub struct TranslationGateway<T = HttpTransport>
where
    T: Transport,
{
    transport: T,
    registry: ProviderRegistry,
    attempt_timeout: Duration,
}

impl TranslationGateway<HttpTransport> {
    pub fn new(registry: ProviderRegistry) -> Self {
        Self::with_transport(HttpTransport::default(), registry)
    }
}

impl<T: Transport> TranslationGateway<T> {
    pub fn with_transport(transport: T, registry: ProviderRegistry) -> Self {
        Self {
            transport,
            registry,
            attempt_timeout: ATTEMPT_TIMEOUT,
        }
    }

    pub fn with_attempt_timeout(mut self, attempt_timeout: Duration) -> Self {
        self.attempt_timeout = attempt_timeout;
        self
    }

    pub async fn translate(&self, request: &TranslationRequest) -> Result<String, GatewayError> {
        let mut last_error: Option<AttemptError> = None;

        for (slot, provider) in self.registry.iter().enumerate() {
            let call = request::build(provider, request);
            let outcome = timeout::with_deadline(self.attempt_timeout, self.transport.execute(call))
                .await
                .and_then(|raw| response::extract(provider.dialect, &raw));

            match outcome {
                Ok(text) => {
                    tracing::debug!(
                        target: LOG_TARGET,
                        slot,
                        url = %provider.url,
                        "provider succeeded"
                    );
                    return Ok(text);
                }
                Err(e) => {
                    tracing::warn!(
                        target: LOG_TARGET,
                        slot,
                        url = %provider.url,
                        error = %e,
                        "provider failed, falling through"
                    );
                    last_error = Some(e);
                }
            }
        }

        // The registry is non-empty by construction, so at least one
        // failure was recorded.
        let message = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no translation providers configured".to_owned());
        Err(GatewayError::AllProvidersFailed(message))
    }
}
