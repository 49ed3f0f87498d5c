//! Sequence diagrams and wire transcripts for chains of HTTP exchanges.
//!
//! Record the requests and responses that flow between named participants with a
//! [`Diagram`], then render it into a [`RenderModel`] holding a compact sequence notation,
//! one wire transcript per exchange, and a summary of the final status.

pub mod body;
pub mod diagram;
pub mod error;
pub mod event;
pub mod notation;
pub mod status;
pub mod transcript;
pub mod transport;

pub use body::Body;
pub use diagram::{Diagram, PageRenderer, RenderModel};
pub use error::{DiagramError, DumpError, Result};
pub use event::{Event, HttpRequest, HttpResponse, Participant};
pub use status::{FinalStatus, Tier};
pub use transcript::{CaptureConfig, TranscriptEntry};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::body::Body;
    pub use crate::diagram::{Diagram, PageRenderer, RenderModel};
    pub use crate::error::{DiagramError, Result};
    pub use crate::event::{Event, HttpRequest, HttpResponse};
    pub use crate::status::{FinalStatus, Tier};
    pub use crate::transcript::CaptureConfig;
    pub use crate::transport::{request_from_reqwest, response_from_reqwest};
}
