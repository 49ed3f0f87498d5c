//! Wire transcripts of captured requests and responses
//!
//! A [`TranscriptEntry`] pairs the header block of a message, as it would appear on the wire,
//! with a separate capture of its body. The header dump never includes the body. Bodies
//! declared with the configured JSON content type are pretty-printed; everything else is kept
//! as raw text.

use crate::body::Body;
use crate::error::DumpError;
use crate::event::{HttpRequest, HttpResponse};
use http::header::{HeaderMap, HeaderName, CONTENT_TYPE, HOST};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for body capture
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Number of spaces per indentation level for pretty-printed JSON bodies
    pub json_indent: usize,
    /// Content type that triggers pretty-printing. Compared as an exact string, so
    /// `application/json; charset=utf-8` does not match `application/json`.
    pub pretty_content_type: String,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            json_indent: 4,
            pretty_content_type: "application/json".to_string(),
        }
    }
}

/// Header dump and body capture for one exchange event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub header: String,
    pub body: String,
}

/// Capture the transcript of a request.
///
/// The body, if any, is drained into memory and stays readable through the request.
pub fn capture_request(
    request: &mut HttpRequest,
    config: &CaptureConfig,
) -> Result<TranscriptEntry, DumpError> {
    let header = dump_request_head(request)?;
    let content_type = content_type(request.headers()).map(str::to_owned);
    let body = capture_body(request.body_mut().as_mut(), content_type.as_deref(), config)?;

    Ok(TranscriptEntry { header, body })
}

/// Capture the transcript of a response.
///
/// The body, if any, is drained into memory and stays readable through the response.
pub fn capture_response(
    response: &mut HttpResponse,
    config: &CaptureConfig,
) -> Result<TranscriptEntry, DumpError> {
    let header = dump_response_head(response)?;
    let content_type = content_type(response.headers()).map(str::to_owned);
    let body = capture_body(response.body_mut().as_mut(), content_type.as_deref(), config)?;

    Ok(TranscriptEntry { header, body })
}

/// Dump the request line and headers, terminated by an empty line
pub fn dump_request_head<B>(request: &http::Request<B>) -> Result<String, DumpError> {
    let target = request.uri().path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    let mut out = format!("{} {} {:?}\r\n", request.method(), target, request.version());

    if !request.headers().contains_key(HOST) {
        if let Some(authority) = request.uri().authority() {
            out.push_str(&format!("Host: {}\r\n", authority));
        }
    }

    write_headers(&mut out, request.headers())?;
    out.push_str("\r\n");
    Ok(out)
}

/// Dump the status line and headers, terminated by an empty line
pub fn dump_response_head<B>(response: &http::Response<B>) -> Result<String, DumpError> {
    let status = response.status();
    let mut out = format!("{:?} {}", response.version(), status.as_u16());
    if let Some(reason) = status.canonical_reason() {
        out.push(' ');
        out.push_str(reason);
    }
    out.push_str("\r\n");

    write_headers(&mut out, response.headers())?;
    out.push_str("\r\n");
    Ok(out)
}

/// Format a body for display.
///
/// Only bodies whose content type equals the configured pretty content type are reformatted,
/// and only when they parse as JSON. Reformatting touches whitespace only: numbers, strings
/// and repeated keys are copied exactly as sent.
pub fn format_body(bytes: &[u8], content_type: Option<&str>, config: &CaptureConfig) -> String {
    if content_type == Some(config.pretty_content_type.as_str()) {
        match pretty_json(bytes, config.json_indent) {
            Ok(pretty) => return pretty,
            Err(e) => debug!("Body declared as JSON could not be parsed, keeping raw text: {}", e),
        }
    }
    String::from_utf8_lossy(bytes).into_owned()
}

fn content_type(headers: &HeaderMap) -> Option<&str> {
    headers.get(CONTENT_TYPE).and_then(|value| value.to_str().ok())
}

fn capture_body(
    body: Option<&mut Body>,
    content_type: Option<&str>,
    config: &CaptureConfig,
) -> Result<String, DumpError> {
    let Some(body) = body else {
        return Ok(String::new());
    };

    let bytes = body.buffer()?;
    Ok(format_body(bytes, content_type, config))
}

/// Re-indent a JSON document, copying every token verbatim
fn pretty_json(bytes: &[u8], indent: usize) -> Result<String, serde_json::Error> {
    serde_json::from_slice::<IgnoredAny>(bytes)?;

    let text = String::from_utf8_lossy(bytes);
    let unit = " ".repeat(indent);
    let mut out = String::with_capacity(text.len() * 2);
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '{' | '[' => {
                out.push(c);
                while chars.next_if(|c| c.is_ascii_whitespace()).is_some() {}
                // empty containers stay on one line
                if let Some(close) = chars.next_if(|c| *c == '}' || *c == ']') {
                    out.push(close);
                } else {
                    depth += 1;
                    push_newline(&mut out, &unit, depth);
                }
            }
            '}' | ']' => {
                depth = depth.saturating_sub(1);
                push_newline(&mut out, &unit, depth);
                out.push(c);
            }
            ',' => {
                out.push(c);
                push_newline(&mut out, &unit, depth);
            }
            ':' => out.push_str(": "),
            c if c.is_ascii_whitespace() => {}
            c => out.push(c),
        }
    }

    Ok(out)
}

fn push_newline(out: &mut String, unit: &str, depth: usize) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str(unit);
    }
}

fn write_headers(out: &mut String, headers: &HeaderMap) -> Result<(), DumpError> {
    for (name, value) in headers {
        let value = value.to_str().map_err(|_| DumpError::InvalidHeader {
            name: name.as_str().to_string(),
        })?;
        out.push_str(&format!("{}: {}\r\n", canonical_name(name), value));
    }
    Ok(())
}

/// `content-type` -> `Content-Type`
fn canonical_name(name: &HeaderName) -> String {
    let mut canonical = String::with_capacity(name.as_str().len());
    let mut upper = true;
    for c in name.as_str().chars() {
        if upper {
            canonical.extend(c.to_uppercase());
        } else {
            canonical.push(c);
        }
        upper = c == '-';
    }
    canonical
}
