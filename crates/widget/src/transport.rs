use futures::future::LocalBoxFuture;
use reqwest::header::CONTENT_TYPE;

use crate::error::{TransportError, TransportResult};

/// Raw HTTP outcome; classification happens in the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// HTTP seam for the chat endpoint.
///
/// Implementations must not retry, time out on their own, or interpret the
/// status code: every submission is exactly one request.
pub trait ChatTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> LocalBoxFuture<'a, TransportResult<TransportResponse>>;
}

/// `reqwest` transport. Uses rustls natively and the browser's fetch on wasm32.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn send(&self, url: &str, body: String) -> TransportResult<TransportResponse> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|source| TransportError::Network {
                stage: "send-chat-request",
                url: url.to_string(),
                source: Box::new(source),
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|source| TransportError::Network {
                stage: "read-chat-response",
                url: url.to_string(),
                source: Box::new(source),
            })?;

        Ok(TransportResponse { status, body })
    }
}

impl ChatTransport for ReqwestTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> LocalBoxFuture<'a, TransportResult<TransportResponse>> {
        Box::pin(self.send(url, body))
    }
}
