//! Adapters from `reqwest` messages to captured HTTP messages
//!
//! The diagram never performs network I/O itself. These helpers let a caller that already
//! drives a call chain with `reqwest` record the requests it sends and the responses it gets
//! back.

use crate::body::Body;
use crate::error::Result;
use crate::event::{HttpRequest, HttpResponse};
use tracing::debug;

/// Copy a `reqwest` request, leaving the original untouched so it can still be sent.
///
/// Bodies that are only available as a stream are not copied; the captured request then has
/// no body.
pub fn request_from_reqwest(request: &reqwest::Request) -> Result<HttpRequest> {
    let uri: http::Uri = request.url().as_str().parse()?;

    let body = request.body().map(|body| body.as_bytes());
    let body = match body {
        Some(Some(bytes)) => Some(Body::from(bytes)),
        Some(None) => {
            debug!("Request to {} has a streaming body, capturing without body", uri);
            None
        }
        None => None,
    };

    let mut captured = http::Request::new(body);
    *captured.method_mut() = request.method().clone();
    *captured.uri_mut() = uri;
    *captured.version_mut() = request.version();
    *captured.headers_mut() = request.headers().clone();

    Ok(captured)
}

/// Convert a `reqwest` response, reading its body into memory
pub async fn response_from_reqwest(response: reqwest::Response) -> Result<HttpResponse> {
    let status = response.status();
    let version = response.version();
    let headers = response.headers().clone();
    let bytes = response.bytes().await?;

    let mut captured = http::Response::new(Some(Body::from(bytes.to_vec())));
    *captured.status_mut() = status;
    *captured.version_mut() = version;
    *captured.headers_mut() = headers;

    Ok(captured)
}
