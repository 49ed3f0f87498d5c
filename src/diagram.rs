//! Fluent builder for HTTP sequence diagrams
//!
//! [`Diagram`] collects a title, a subtitle, caller metadata, and the ordered exchange events
//! of a call chain. Rendering turns it into a [`RenderModel`] and hands that model to a
//! [`PageRenderer`], which owns all presentation concerns.
//!
//! # Examples
//!
//! ```
//! use http_sequence::{Body, Diagram, HttpRequest, HttpResponse, Tier};
//!
//! let request: HttpRequest = http::Request::builder()
//!     .method("POST")
//!     .uri("/orders")
//!     .header("content-type", "application/json")
//!     .body(Some(Body::from(r#"{"sku":"A-1"}"#)))
//!     .unwrap();
//! let response: HttpResponse = http::Response::builder().status(201).body(None).unwrap();
//!
//! let mut diagram = Diagram::new()
//!     .title("Place order")
//!     .request("web", "orders", request)
//!     .response("orders", "web", response);
//!
//! let model = diagram.render_model().unwrap();
//! assert_eq!(model.notation, "web->orders: (1) POST /orders\norders->>web: (2) 201\n");
//! assert_eq!(model.tier, Tier::Success);
//! ```

use crate::error::Result;
use crate::event::{Event, HttpRequest, HttpResponse, Participant};
use crate::notation::EventLog;
use crate::status::Tier;
use crate::transcript::{CaptureConfig, TranscriptEntry};
use serde::{Deserialize, Serialize};
use std::any::Any;
use tracing::{debug, info};

/// Structured output of a render, handed to a [`PageRenderer`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderModel {
    pub title: String,
    pub subtitle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub tier: Tier,
    pub badge_class: String,
    /// Final status code as text, `"-1"` when the log is empty
    pub status_code: String,
    pub transcripts: Vec<TranscriptEntry>,
    pub notation: String,
    /// Caller metadata, passed through verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_json: Option<String>,
}

/// Turns a finished [`RenderModel`] into displayable output
pub trait PageRenderer {
    type Output;

    fn render_page(&self, model: RenderModel) -> Result<Self::Output>;
}

/// Any closure taking a model can act as a renderer
impl<F, T> PageRenderer for F
where
    F: Fn(RenderModel) -> Result<T>,
{
    type Output = T;

    fn render_page(&self, model: RenderModel) -> Result<T> {
        self(model)
    }
}

/// Builder for an HTTP sequence diagram.
///
/// Setters never validate and always return the builder, so calls can be chained.
#[derive(Debug, Default)]
pub struct Diagram {
    title: String,
    subtitle: String,
    name: Option<String>,
    events: EventLog,
    meta_json: Option<String>,
    capture_config: CaptureConfig,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    /// Name identifying the diagram, e.g. the test that produced it
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Record a request sent from `source` to `target`
    pub fn request(
        mut self,
        source: impl Into<Participant>,
        target: impl Into<Participant>,
        request: HttpRequest,
    ) -> Self {
        self.events.push(Event::request(source, target, request));
        self
    }

    /// Record a response sent from `source` back to `target`
    pub fn response(
        mut self,
        source: impl Into<Participant>,
        target: impl Into<Participant>,
        response: HttpResponse,
    ) -> Self {
        self.events.push(Event::response(source, target, response));
        self
    }

    /// Record a type-erased message; see [`Event::from_message`].
    ///
    /// Messages that are neither an [`HttpRequest`] nor an [`HttpResponse`] are kept and make
    /// the next render fail.
    pub fn exchange<T: Any + Send>(
        mut self,
        source: impl Into<Participant>,
        target: impl Into<Participant>,
        message: T,
    ) -> Self {
        self.events.push(Event::from_message(source, target, message));
        self
    }

    /// Record an already constructed event
    pub fn event(mut self, event: impl Into<Event>) -> Self {
        self.events.push(event.into());
        self
    }

    /// Attach JSON metadata, passed to the renderer verbatim and never interpreted
    pub fn meta_json(mut self, meta_json: impl Into<String>) -> Self {
        self.meta_json = Some(meta_json.into());
        self
    }

    pub fn capture_config(mut self, config: CaptureConfig) -> Self {
        self.capture_config = config;
        self
    }

    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Build the render model.
    ///
    /// The final status is computed first, so a log ending in a request fails before any
    /// body is read. Rendering an unmodified diagram again yields an identical model.
    pub fn render_model(&mut self) -> Result<RenderModel> {
        let status = self.events.final_status()?;
        let transformed = self.events.transform(&self.capture_config)?;

        debug!(
            "Built render model with {} transcripts, final status {}",
            transformed.transcripts.len(),
            status.code
        );

        Ok(RenderModel {
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            name: self.name.clone(),
            tier: status.tier,
            badge_class: status.tier.badge_class().to_string(),
            status_code: status.code.to_string(),
            transcripts: transformed.transcripts,
            notation: transformed.notation,
            meta_json: self.meta_json.clone(),
        })
    }

    /// Build the render model and hand it to `renderer`
    pub fn render<R: PageRenderer>(&mut self, renderer: &R) -> Result<R::Output> {
        info!("Rendering sequence diagram '{}' with {} events", self.title, self.events.len());
        let model = self.render_model()?;
        renderer.render_page(model)
    }
}
