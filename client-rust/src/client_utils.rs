use crate::{
    observer::{HttpObserver, RequestInfo, ResponseInfo},
    opentelemetry, ApiError, ApiResult, ListResponse,
};
use reqwest::{Client, Method, Response, StatusCode, Url};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Instant;

const DEFAULT_BAD_REQUEST_MESSAGE: &str = "Bad request";

/// Everything needed to issue a request against the API.
#[derive(Clone, Copy)]
pub struct RequestContext<'a> {
    pub client: &'a Client,
    pub base_url: &'a str,
    pub observer: &'a dyn HttpObserver,
}

impl RequestContext<'_> {
    fn url(&self, path: &str, query: &[(&str, String)]) -> ApiResult<Url> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut parsed = Url::parse(&url).map_err(|error| {
            ApiError::InvalidInput(format!("Invalid request URL '{url}': {error}"))
        })?;
        if !query.is_empty() {
            parsed.query_pairs_mut().extend_pairs(query);
        }
        Ok(parsed)
    }
}

/// Send a request and return the raw response.
/// Non-success statuses are mapped to [`ApiError`]; transport failures pass
/// through as [`ApiError::Transport`].
async fn send(
    ctx: RequestContext<'_>,
    method: Method,
    path: &str,
    query: &[(&str, String)],
    body: Option<serde_json::Value>,
) -> ApiResult<Response> {
    let url = ctx.url(path, query)?;
    let request_info = RequestInfo {
        method: &method,
        url: url.as_str(),
        body: body.as_ref(),
    };
    ctx.observer.on_request(&request_info);

    let mut builder = ctx.client.request(method.clone(), url.clone());
    if let Some(body) = &body {
        builder = builder.json(body);
    }

    let start_time = Instant::now();
    let response = match builder.send().await {
        Ok(response) => response,
        Err(error) => {
            let error = ApiError::Transport(error);
            ctx.observer.on_error(&request_info, &error);
            return Err(error);
        }
    };

    let status = response.status();
    opentelemetry::record_status(status);
    ctx.observer.on_response(&ResponseInfo {
        method: &method,
        url: url.as_str(),
        status,
        elapsed: start_time.elapsed(),
    });

    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let error = map_status_error(status, &text);
    ctx.observer.on_error(&request_info, &error);
    Err(error)
}

fn to_json_body<T: Serialize>(data: &T) -> ApiResult<serde_json::Value> {
    serde_json::to_value(data)
        .map_err(|error| ApiError::InvalidInput(format!("Failed to serialize request: {error}")))
}

/// Create a JSON request, parse the JSON response.
pub async fn send_json<T: Serialize, R: DeserializeOwned>(
    ctx: RequestContext<'_>,
    method: Method,
    path: &str,
    data: Option<&T>,
) -> ApiResult<R> {
    let body = data.map(to_json_body).transpose()?;
    opentelemetry::trace_request(&method, path, async {
        let response = send(ctx, method.clone(), path, &[], body).await?;
        Ok(response.json::<R>().await?)
    })
    .await
}

/// GET a list endpoint, accepting both a pagination envelope and a bare array.
pub async fn get_list<R: DeserializeOwned>(
    ctx: RequestContext<'_>,
    path: &str,
    query: &[(&str, String)],
) -> ApiResult<Vec<R>> {
    opentelemetry::trace_request(&Method::GET, path, async {
        let response = send(ctx, Method::GET, path, query, None).await?;
        let list = response.json::<ListResponse<R>>().await?;
        Ok(list.into_items())
    })
    .await
}

/// Send a request whose response has no body worth reading.
pub async fn send_empty(ctx: RequestContext<'_>, method: Method, path: &str) -> ApiResult<()> {
    opentelemetry::trace_request(&method, path, async {
        send(ctx, method.clone(), path, &[], None).await?;
        Ok(())
    })
    .await
}

/// Map a non-success status and its body to an error.
pub fn map_status_error(status: StatusCode, body: &str) -> ApiError {
    if status == StatusCode::NOT_FOUND {
        ApiError::NotFound
    } else if status == StatusCode::BAD_REQUEST {
        ApiError::BadRequest(bad_request_message(body))
    } else if status.is_server_error() {
        ApiError::ServerUnavailable
    } else {
        ApiError::Status(status, body.to_string())
    }
}

/// The backend reports 400s as `{"message": ...}` or `{"detail": ...}`; field
/// validation errors carry neither.
fn bad_request_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["message", "detail"]
                .iter()
                .find_map(|key| value.get(key)?.as_str().map(str::to_string))
        })
        .unwrap_or_else(|| DEFAULT_BAD_REQUEST_MESSAGE.to_string())
}
