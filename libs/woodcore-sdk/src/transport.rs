use std::sync::Arc;

use bytes::Bytes;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::Error;
use crate::request::RequestDescriptor;

/// HTTP transport that sends descriptors to the configured WoodCore host
#[derive(Clone)]
pub(crate) struct Transport {
    http_client: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl Transport {
    pub(crate) fn new(http_client: reqwest::Client, config: Arc<ClientConfig>) -> Self {
        Self {
            http_client,
            config,
        }
    }

    pub(crate) fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send one request and return the parsed body of a successful response.
    pub(crate) async fn send(&self, descriptor: &RequestDescriptor) -> Result<Value, Error> {
        // Build URL: {base_url}{path}?{query}
        let mut url = self.config.url_for(descriptor.path())?;
        let pairs = descriptor.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        let mut authorization = HeaderValue::from_str(&self.config.bearer())
            .map_err(|e| Error::Configuration(format!("Invalid API key: {e}")))?;
        authorization.set_sensitive(true);

        let mut req_builder = self
            .http_client
            .request(descriptor.method().clone(), url)
            .header(AUTHORIZATION, authorization)
            .header(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(body) = descriptor.body() {
            let bytes = serde_json::to_vec(body)
                .map_err(|e| Error::InvalidRequest(format!("Unserializable body: {e}")))?;
            req_builder = req_builder
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(bytes);
        }

        debug!(
            method = %descriptor.method(),
            path = descriptor.path(),
            environment = self.config.environment().as_str(),
            "dispatching request"
        );

        let resp = req_builder.send().await.map_err(|e| {
            let err = Error::from_transport(&e);
            debug!(path = descriptor.path(), error = %err, "request failed without a response");
            err
        })?;

        let status = resp.status();
        if !status.is_success() {
            // The status decides the outcome; an unreadable error body only loses the message.
            let body = resp
                .bytes()
                .await
                .map(|bytes| parse_body(&bytes))
                .unwrap_or(Value::Null);
            let err = Error::from_response(status, &body);
            debug!(path = descriptor.path(), status = status.as_u16(), error = %err, "request rejected");
            return Err(err);
        }

        let bytes = resp.bytes().await.map_err(|e| Error::from_body_read(&e))?;
        Ok(parse_body(&bytes))
    }
}

/// Build the pooled HTTP client shared by every executor of one facade.
pub(crate) fn build_http_client(config: &ClientConfig) -> Result<reqwest::Client, Error> {
    let mut builder =
        reqwest::Client::builder().user_agent(concat!("woodcore-sdk/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| Error::Configuration(format!("HTTP client: {e}")))
}

/// Empty bodies read as `null`, non-JSON bodies as a JSON string.
fn parse_body(bytes: &Bytes) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
