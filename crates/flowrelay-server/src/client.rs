//! Flow engine HTTP client.
//!
//! [`FlowClient`] performs exactly one `POST {base_url}/api/v1/run/{flow_id}`
//! per [`FlowClient::send`] call. There are no retries; connection reuse is
//! whatever `reqwest::Client` provides.

use std::time::Duration;

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Url;
use serde::Serialize;

use flowrelay_core::{FlowConfig, FlowError, RawFlowResponse};

/// Header carrying the flow engine API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Request body understood by the flow engine's run endpoint.
#[derive(Debug, Serialize)]
struct FlowRunRequest<'a> {
    output_type: &'a str,
    input_type: &'a str,
    input_value: &'a str,
}

impl<'a> FlowRunRequest<'a> {
    fn chat(message: &'a str) -> Self {
        FlowRunRequest {
            output_type: "chat",
            input_type: "chat",
            input_value: message,
        }
    }
}

/// Client bound to a single flow on a single flow engine.
///
/// The API key header and run URL are validated once in [`FlowClient::new`],
/// so a client that exists can always build its request.
#[derive(Debug, Clone)]
pub struct FlowClient {
    http: reqwest::Client,
    api_key: HeaderValue,
    run_url: Url,
    timeout: Duration,
}

impl FlowClient {
    /// Builds a client for a validated configuration.
    pub fn new(config: FlowConfig) -> Result<Self, FlowError> {
        let mut api_key = HeaderValue::from_str(config.api_key()).map_err(|_| {
            FlowError::ClientBuild("API key is not a valid HTTP header value".to_string())
        })?;
        api_key.set_sensitive(true);

        let run_url = Url::parse(&config.run_url()).map_err(|err| {
            FlowError::ClientBuild(format!("invalid flow engine URL '{}': {}", config.run_url(), err))
        })?;
        if !matches!(run_url.scheme(), "http" | "https") {
            return Err(FlowError::ClientBuild(format!(
                "unsupported scheme '{}' in flow engine URL; expected http or https",
                run_url.scheme()
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|err| FlowError::ClientBuild(err.to_string()))?;

        Ok(FlowClient {
            http,
            api_key,
            run_url,
            timeout: config.timeout(),
        })
    }

    pub fn run_url(&self) -> &str {
        self.run_url.as_str()
    }

    /// Runs the flow with `message` as chat input and returns the decoded body.
    pub async fn send(&self, message: &str) -> Result<RawFlowResponse, FlowError> {
        tracing::debug!(endpoint = %self.run_url, "calling flow engine");

        let response = self
            .http
            .post(self.run_url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, self.api_key.clone())
            .json(&FlowRunRequest::chat(message))
            .send()
            .await
            .map_err(|err| self.unreachable(err))?;

        let status = response.status();
        tracing::debug!(endpoint = %self.run_url, status = status.as_u16(), "flow engine responded");

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "flow engine returned an error status");
            let body = response.text().await.unwrap_or_default();
            return Err(FlowError::UpstreamHttp {
                status: status.as_u16(),
                body,
            });
        }

        let body_text = response.text().await.map_err(|err| self.unreachable(err))?;

        serde_json::from_str(&body_text).map_err(|err| {
            tracing::warn!(error = %err, "flow engine response is not valid JSON");
            FlowError::MalformedResponse(err.to_string())
        })
    }

    fn unreachable(&self, err: reqwest::Error) -> FlowError {
        let reason = if err.is_timeout() {
            format!("request timed out after {:?}", self.timeout)
        } else {
            err.to_string()
        };
        tracing::warn!(endpoint = %self.run_url, error = %reason, "flow engine unreachable");
        FlowError::UpstreamUnreachable(reason)
    }
}
