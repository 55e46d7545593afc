use http::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Errors returned by WoodCore client operations.
///
/// Every failure of the executor and the page streams is one of these
/// variants. The type is `Clone` so callers joined onto the same in-flight
/// request all observe the same error value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The API answered with a non-success HTTP status.
    #[error("WoodCore API error: status={status}: {message}")]
    RemoteApi { status: StatusCode, message: String },

    /// No usable HTTP response was received: the connection failed, timed
    /// out, or the body of a successful response could not be read.
    #[error("Transport error ({code}): {message}")]
    Transport { code: &'static str, message: String },

    /// The client could not be configured. Raised before any request is built.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The call arguments could not be turned into a request.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl Error {
    /// Stable error name, matching the names exposed by the other WoodCore SDKs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Error::RemoteApi { .. } => "RemoteAPIError",
            Error::Transport { .. } => "TransportError",
            Error::Configuration(_) => "ConfigurationError",
            Error::InvalidRequest(_) => "InvalidRequestError",
        }
    }

    /// HTTP status for remote errors, transport code for transport errors.
    #[must_use]
    pub fn code(&self) -> Option<String> {
        match self {
            Error::RemoteApi { status, .. } => Some(status.as_u16().to_string()),
            Error::Transport { code, .. } => Some((*code).to_owned()),
            Error::Configuration(_) | Error::InvalidRequest(_) => None,
        }
    }

    /// HTTP status of a remote error.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::RemoteApi { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The human readable message without the variant prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Error::RemoteApi { message, .. }
            | Error::Transport { message, .. }
            | Error::Configuration(message)
            | Error::InvalidRequest(message) => message,
        }
    }

    /// Build a remote error from a non-success response and its parsed body.
    pub(crate) fn from_response(status: StatusCode, body: &Value) -> Self {
        let message = extract_message(body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or_default().to_owned());
        Error::RemoteApi { status, message }
    }

    /// Build a transport error from a reqwest failure that produced no response.
    pub(crate) fn from_transport(err: &reqwest::Error) -> Self {
        Error::Transport {
            code: transport_code(err),
            message: error_chain(err),
        }
    }

    /// Build a transport error for a successful response whose body could not be read.
    ///
    /// reqwest reports these as decode errors; they are classified as `body`.
    pub(crate) fn from_body_read(err: &reqwest::Error) -> Self {
        Error::Transport {
            code: if err.is_timeout() { "timeout" } else { "body" },
            message: error_chain(err),
        }
    }
}

/// Pull the message out of an error body.
///
/// The API reports either `{"message": "text"}` or
/// `{"message": {"message": "text", "error": "detail"}}`.
fn extract_message(body: &Value) -> Option<String> {
    match body.get("message")? {
        Value::String(message) => Some(message.clone()),
        Value::Object(inner) => {
            let message = inner.get("message").and_then(render_part);
            let error = inner.get("error").and_then(render_part);
            match (message, error) {
                (Some(message), Some(error)) => Some(format!("{message}: {error}")),
                (Some(part), None) | (None, Some(part)) => Some(part),
                (None, None) => Some(Value::Object(inner.clone()).to_string()),
            }
        }
        _ => None,
    }
}

fn render_part(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn transport_code(err: &reqwest::Error) -> &'static str {
    if err.is_timeout() {
        "timeout"
    } else if err.is_connect() {
        "connect"
    } else if err.is_redirect() {
        "redirect"
    } else if err.is_body() {
        "body"
    } else if err.is_decode() {
        "decode"
    } else if err.is_request() {
        "request"
    } else {
        "unknown"
    }
}
