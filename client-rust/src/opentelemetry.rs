use crate::ApiResult;
use opentelemetry::trace::Status;
use reqwest::{Method, StatusCode};
use std::time::Instant;
use tracing::{info_span, Span};
use tracing_futures::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

pub struct RequestSpan {
    span: Span,
    start_time: Instant,
}

impl RequestSpan {
    pub fn new(method: &Method, path: &str) -> Self {
        let span = info_span!("blog_client.request");
        span.set_attribute("http.request.method", method.as_str().to_string());
        span.set_attribute("url.path", path.to_string());

        Self {
            span,
            start_time: Instant::now(),
        }
    }

    fn span(&self) -> Span {
        self.span.clone()
    }

    pub async fn instrument_future<F>(&self, future: F) -> F::Output
    where
        F: std::future::Future,
    {
        future.instrument(self.span()).await
    }

    pub fn on_error(&mut self, error: &(dyn std::error::Error + 'static)) {
        self.span
            .set_attribute("exception.message", error.to_string());
        self.span.set_status(Status::error(error.to_string()));
    }

    pub fn on_end(&mut self) {
        self.span.set_attribute(
            "blog_client.duration",
            self.start_time.elapsed().as_secs_f64(),
        );
    }
}

/// Record the response status on the span of the request being traced.
/// Must be called from within the future passed to [`trace_request`].
pub fn record_status(status: StatusCode) {
    Span::current().set_attribute("http.response.status_code", i64::from(status.as_u16()));
}

pub async fn trace_request<T, Fut>(method: &Method, path: &str, future: Fut) -> ApiResult<T>
where
    Fut: std::future::Future<Output = ApiResult<T>>,
{
    let mut span = RequestSpan::new(method, path);
    let result = span.instrument_future(future).await;

    if let Err(error) = &result {
        span.on_error(error);
    }

    span.on_end();
    result
}
