//! Shared HTTP client, error types, and the request dispatcher.

use std::fmt::{self, Debug, Display, Formatter};
use std::io;

use anyhow::anyhow;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, warn};

use crate::output::Diagnostics;
use crate::registry::{OperationDescriptor, RegistryError};

pub(crate) const HEADER_API_KEY: &str = "x-api-key";
pub(crate) const EXIT_FAILURE: i32 = 1;

/// CLI-level error type; every variant is fatal and reported once.
#[derive(Debug)]
pub(crate) enum CliError {
    /// Missing or invalid flags and environment.
    Config(String),
    /// The HTTP client could not be constructed.
    Transport(anyhow::Error),
    /// The dispatched request did not produce a 2xx response.
    Request { action: String },
    /// The response body did not match the expected shape.
    Decode(anyhow::Error),
    /// The action passed validation but has no renderer.
    UnknownAction(String),
    /// Writing to stdout failed.
    Output(io::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub(crate) fn decode(error: impl Into<anyhow::Error>) -> Self {
        Self::Decode(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_)
            | Self::Transport(_)
            | Self::Request { .. }
            | Self::Decode(_)
            | Self::UnknownAction(_)
            | Self::Output(_) => EXIT_FAILURE,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Config(message) => message.clone(),
            Self::Transport(error) => format!("{error:#}"),
            Self::Request { action } => format!("Failed to call API: {action}"),
            Self::Decode(error) => format!("Error unmarshalling response: {error:#}"),
            Self::UnknownAction(action) => format!("Unknown action: {action}"),
            Self::Output(error) => format!("failed to write output: {error}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.display_message())
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(error: io::Error) -> Self {
        Self::Output(error)
    }
}

impl From<RegistryError> for CliError {
    fn from(error: RegistryError) -> Self {
        Self::Config(error.to_string())
    }
}

/// API key read from `--api-key` or `UNIFI_KEY`.
#[derive(Clone)]
pub(crate) struct ApiKeyCredential {
    key: String,
}

impl ApiKeyCredential {
    /// Rejects absent and empty keys.
    pub(crate) fn from_input(input: Option<String>) -> CliResult<Self> {
        input
            .filter(|key| !key.is_empty())
            .map(|key| Self { key })
            .ok_or_else(|| CliError::config("UNIFI_KEY environment variable not set"))
    }

    pub(crate) fn header_value(&self) -> &str {
        &self.key
    }
}

impl Debug for ApiKeyCredential {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ApiKeyCredential")
            .field("key", &"<redacted>")
            .finish()
    }
}

/// Application context passed to the dispatcher and renderers.
#[derive(Clone)]
pub(crate) struct AppContext {
    pub(crate) client: Client,
    pub(crate) base_url: Url,
    pub(crate) api_key: ApiKeyCredential,
    pub(crate) diagnostics: Diagnostics,
}

impl AppContext {
    /// Build the HTTP client; every request asks for JSON.
    pub(crate) fn new(
        base_url: Url,
        api_key: ApiKeyCredential,
        diagnostics: Diagnostics,
    ) -> CliResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(default_headers)
            .build()
            .map_err(|err| CliError::Transport(anyhow!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url,
            api_key,
            diagnostics,
        })
    }
}

/// Outcome of a single dispatched request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Dispatch {
    pub(crate) success: bool,
    pub(crate) status: Option<StatusCode>,
    pub(crate) body: String,
}

impl Dispatch {
    const fn failed(status: Option<StatusCode>) -> Self {
        Self {
            success: false,
            status,
            body: String::new(),
        }
    }
}

/// Issue one request for `operation`.
///
/// Never fails: transport and body-read errors are logged and reported as an
/// unsuccessful dispatch with an empty body.
pub(crate) async fn dispatch(ctx: &AppContext, operation: &OperationDescriptor) -> Dispatch {
    let url = match operation.url(&ctx.base_url) {
        Ok(url) => url,
        Err(err) => {
            warn!(action = operation.name, error = %err, "failed to build request URL");
            return Dispatch::failed(None);
        }
    };

    debug!(action = operation.name, method = %operation.method, url = %url, "dispatching request");

    let response = match ctx
        .client
        .request(operation.method.clone(), url.clone())
        .header(HEADER_API_KEY, ctx.api_key.header_value())
        .send()
        .await
    {
        Ok(response) => response,
        Err(err) => {
            warn!(action = operation.name, url = %url, error = %err, "request failed");
            return Dispatch::failed(None);
        }
    };

    let status = response.status();
    match response.text().await {
        Ok(body) => {
            debug!(action = operation.name, status = %status, bytes = body.len(), "response received");
            Dispatch {
                success: status.is_success(),
                status: Some(status),
                body,
            }
        }
        Err(err) => {
            warn!(action = operation.name, status = %status, error = %err, "failed to read response body");
            Dispatch::failed(Some(status))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn context_with(base_url: &str) -> AppContext {
        AppContext::new(
            base_url.parse().expect("valid URL"),
            ApiKeyCredential::from_input(Some("secret-key".to_string())).expect("key"),
            Diagnostics::default(),
        )
        .expect("client builds")
    }

    fn devices() -> OperationDescriptor {
        OperationDescriptor::get("GetDevices", "v1/devices", "devices")
    }

    #[tokio::test]
    async fn dispatch_sends_json_and_api_key_headers() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v1/devices")
                .header("accept", "application/json")
                .header(HEADER_API_KEY, "secret-key");
            then.status(200).body(r#"{"data":[]}"#);
        });

        let outcome = dispatch(&context_with(&server.base_url()), &devices()).await;

        mock.assert();
        assert!(outcome.success);
        assert_eq!(outcome.status, Some(StatusCode::OK));
        assert_eq!(outcome.body, r#"{"data":[]}"#);
    }

    #[tokio::test]
    async fn dispatch_keeps_base_url_path_prefix() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path("/unifi/v1/devices");
            then.status(200).body("{}");
        });

        let base = format!("{}/unifi", server.base_url());
        let outcome = dispatch(&context_with(&base), &devices()).await;

        mock.assert();
        assert!(outcome.success);
    }

    #[tokio::test]
    async fn dispatch_reports_non_success_status() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/v1/devices");
            then.status(404).body("not found");
        });

        let outcome = dispatch(&context_with(&server.base_url()), &devices()).await;

        assert!(!outcome.success);
        assert_eq!(outcome.status, Some(StatusCode::NOT_FOUND));
        assert_eq!(outcome.body, "not found");
    }

    #[tokio::test]
    async fn dispatch_treats_redirect_status_as_failure() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/v1/devices");
            then.status(304);
        });

        let outcome = dispatch(&context_with(&server.base_url()), &devices()).await;

        assert!(!outcome.success);
    }

    #[tokio::test]
    async fn dispatch_transport_failure_yields_empty_body() {
        let outcome = dispatch(&context_with("http://127.0.0.1:1"), &devices()).await;

        assert_eq!(outcome, Dispatch::failed(None));
    }

    #[test]
    fn api_key_requires_a_value() {
        for input in [None, Some(String::new())] {
            let err = ApiKeyCredential::from_input(input).expect_err("missing key");
            assert_eq!(err.display_message(), "UNIFI_KEY environment variable not set");
        }
        let key = ApiKeyCredential::from_input(Some("abc".into())).expect("key");
        assert_eq!(key.header_value(), "abc");
    }

    #[test]
    fn api_key_debug_output_is_redacted() {
        let key = ApiKeyCredential::from_input(Some("super-secret".into())).expect("key");
        let rendered = format!("{key:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("redacted"));
    }

    #[test]
    fn every_error_exits_with_failure() {
        let errors = [
            CliError::config("bad flag"),
            CliError::Transport(anyhow!("tls")),
            CliError::Request {
                action: "GetDevices".into(),
            },
            CliError::decode(anyhow!("eof")),
            CliError::UnknownAction("GetUsers".into()),
            CliError::from(io::Error::other("closed")),
        ];
        for err in errors {
            assert_eq!(err.exit_code(), EXIT_FAILURE, "{err}");
        }
    }

    #[test]
    fn error_messages_name_the_action() {
        let err = CliError::Request {
            action: "GetSites".into(),
        };
        assert_eq!(err.display_message(), "Failed to call API: GetSites");
        assert_eq!(
            CliError::UnknownAction("GetUsers".into()).display_message(),
            "Unknown action: GetUsers"
        );
        let duplicate = CliError::from(RegistryError::DuplicateName { name: "GetSites" });
        assert!(duplicate.display_message().contains("GetSites"));
    }
}
