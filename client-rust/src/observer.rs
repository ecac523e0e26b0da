use crate::ApiError;
use reqwest::{Method, StatusCode};
use std::time::Duration;

/// An outgoing request as seen by an [`HttpObserver`].
#[derive(Debug, Clone, Copy)]
pub struct RequestInfo<'a> {
    pub method: &'a Method,
    pub url: &'a str,
    /// The JSON body, when one is sent.
    pub body: Option<&'a serde_json::Value>,
}

/// A received response as seen by an [`HttpObserver`].
#[derive(Debug, Clone, Copy)]
pub struct ResponseInfo<'a> {
    pub method: &'a Method,
    pub url: &'a str,
    pub status: StatusCode,
    pub elapsed: Duration,
}

/// Side channel notified of every request and response made by the client.
/// Callbacks run inline and must return quickly. They only see borrowed
/// data, so they cannot alter what is sent or received.
pub trait HttpObserver: Send + Sync {
    fn on_request(&self, request: &RequestInfo<'_>);
    fn on_response(&self, response: &ResponseInfo<'_>);
    /// Called when the request fails before a response is available or the
    /// status maps to an error.
    fn on_error(&self, request: &RequestInfo<'_>, error: &ApiError) {
        let _ = (request, error);
    }
}

/// Default observer: reports traffic through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl HttpObserver for TracingObserver {
    fn on_request(&self, request: &RequestInfo<'_>) {
        tracing::debug!(method = %request.method, url = request.url, body = ?request.body, "HTTP request");
    }

    fn on_response(&self, response: &ResponseInfo<'_>) {
        tracing::debug!(
            method = %response.method,
            url = response.url,
            status = response.status.as_u16(),
            elapsed = ?response.elapsed,
            "HTTP response"
        );
    }

    fn on_error(&self, request: &RequestInfo<'_>, error: &ApiError) {
        tracing::warn!(method = %request.method, url = request.url, %error, "HTTP request failed");
    }
}
