//! Error types and result aliases for the http-sequence library.
//!
//! This module defines the top-level error type [`DiagramError`], the capture-level
//! [`DumpError`], and the [`Result`] type alias used throughout the library. Every failure
//! is surfaced to the caller of [`Diagram::render`](crate::Diagram::render) as-is: nothing
//! is retried, swallowed, or partially rendered.

use thiserror::Error;

/// Failure while producing the wire transcript of a single message.
#[derive(Error, Debug)]
pub enum DumpError {
    #[error("header `{name}` has a value that is not printable text")]
    InvalidHeader { name: String },

    #[error("failed to read body: {0}")]
    Body(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum DiagramError {
    /// Positions are 1-based, matching the `(N)` counter in the notation.
    #[error("failed to dump http event ({position}): {source}")]
    Dump {
        position: usize,
        #[source]
        source: DumpError,
    },

    #[error("http event ({position}) is `{type_name}`, not an http request or response")]
    Transform {
        position: usize,
        type_name: &'static str,
    },

    #[error("final http event ({position}) was not an http response")]
    NoTerminalResponse { position: usize },

    #[error("Invalid URI: {0}")]
    InvalidUri(#[from] http::uri::InvalidUri),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Page renderer error: {0}")]
    RenderError(String),
}

pub type Result<T> = std::result::Result<T, DiagramError>;
