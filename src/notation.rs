//! Ordered event log and sequence notation generation
//!
//! The [`EventLog`] keeps exchange events in the order they were recorded. Transforming the
//! log produces one notation line and one transcript entry per event, index for index:
//!
//! ```text
//! one->two: (1) POST /x
//! two->>one: (2) 201
//! ```
//!
//! Requests use the `->` arrow and responses the `->>` arrow; the number in parentheses is
//! the 1-based position of the event in the log, shared by both kinds.

use crate::error::{DiagramError, Result};
use crate::event::{Event, RequestEvent, ResponseEvent};
use crate::status::FinalStatus;
use crate::transcript::{capture_request, capture_response, CaptureConfig, TranscriptEntry};
use tracing::debug;

/// Notation and transcripts derived from an event log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    pub notation: String,
    pub transcripts: Vec<TranscriptEntry>,
}

/// Append-only, ordered log of exchange events
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event. No structural validation happens here.
    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Status of the call chain, taken from the last event.
    ///
    /// An empty log yields [`FinalStatus::NO_RESPONSE`]. A non-empty log whose last event is
    /// not a response fails, even though [`transform`](Self::transform) accepts the same log.
    pub fn final_status(&self) -> Result<FinalStatus> {
        match self.events.last() {
            None => Ok(FinalStatus::NO_RESPONSE),
            Some(Event::Response(event)) => Ok(FinalStatus::from(event.response.status())),
            Some(_) => Err(DiagramError::NoTerminalResponse {
                position: self.events.len(),
            }),
        }
    }

    /// Produce the sequence notation and the wire transcripts of every event.
    ///
    /// Bodies are drained into memory on the first call and reused afterwards, so repeated
    /// calls return the same result. The first failing event aborts the whole transform.
    pub fn transform(&mut self, config: &CaptureConfig) -> Result<Transformed> {
        debug!("Transforming {} http events", self.events.len());

        let mut notation = String::new();
        let mut transcripts = Vec::with_capacity(self.events.len());

        for (index, event) in self.events.iter_mut().enumerate() {
            let position = index + 1;

            let (line, entry) = match event {
                Event::Request(event) => {
                    (request_line(position, event), capture_request(&mut event.request, config))
                }
                Event::Response(event) => {
                    (response_line(position, event), capture_response(&mut event.response, config))
                }
                Event::Unrecognized(event) => {
                    return Err(DiagramError::Transform {
                        position,
                        type_name: event.type_name,
                    });
                }
            };

            let entry = entry.map_err(|source| DiagramError::Dump { position, source })?;
            notation.push_str(&line);
            transcripts.push(entry);
        }

        Ok(Transformed {
            notation,
            transcripts,
        })
    }
}

impl FromIterator<Event> for EventLog {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

impl Extend<Event> for EventLog {
    fn extend<I: IntoIterator<Item = Event>>(&mut self, iter: I) {
        self.events.extend(iter);
    }
}

fn request_line(position: usize, event: &RequestEvent) -> String {
    format!(
        "{}->{}: ({}) {} {}\n",
        event.source,
        event.target,
        position,
        event.request.method(),
        event.request.uri()
    )
}

fn response_line(position: usize, event: &ResponseEvent) -> String {
    format!(
        "{}->>{}: ({}) {}\n",
        event.source,
        event.target,
        position,
        event.response.status().as_u16()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::tests::FailingReader;
    use crate::body::Body;
    use crate::event::{HttpRequest, HttpResponse};
    use crate::status::Tier;
    use http::header::CONTENT_TYPE;

    fn post(uri: &str, body: &str) -> HttpRequest {
        http::Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Some(Body::from(body)))
            .unwrap()
    }

    fn status(code: u16) -> HttpResponse {
        http::Response::builder().status(code).body(None).unwrap()
    }

    fn call_chain() -> EventLog {
        vec![
            Event::request("one", "two", post("/x", r#"{"email":"a@b.com"}"#)),
            Event::request("two", "three", post("/y", r#"{"id":1}"#)),
            Event::response("three", "two", status(200)),
            Event::response("two", "one", status(201)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_transform_call_chain() {
        let mut log = call_chain();

        let transformed = log.transform(&CaptureConfig::default()).unwrap();

        assert_eq!(
            transformed.notation,
            "one->two: (1) POST /x\ntwo->three: (2) POST /y\nthree->>two: (3) 200\ntwo->>one: (4) 201\n"
        );
        assert_eq!(transformed.transcripts.len(), 4);
    }

    #[test]
    fn test_transcripts_are_index_aligned() {
        let mut log = call_chain();

        let transformed = log.transform(&CaptureConfig::default()).unwrap();

        assert!(transformed.transcripts[0].header.starts_with("POST /x "));
        assert_eq!(transformed.transcripts[0].body, "{\n    \"email\": \"a@b.com\"\n}");
        assert!(transformed.transcripts[1].header.starts_with("POST /y "));
        assert!(transformed.transcripts[2].header.starts_with("HTTP/1.1 200 OK"));
        assert!(transformed.transcripts[3].header.starts_with("HTTP/1.1 201 Created"));
        assert_eq!(transformed.transcripts[3].body, "");
    }

    #[test]
    fn test_arrow_distinguishes_requests_and_responses() {
        let mut log = call_chain();

        let transformed = log.transform(&CaptureConfig::default()).unwrap();
        let lines: Vec<&str> = transformed.notation.lines().collect();

        assert_eq!(lines.len(), log.len());
        for (line, event) in lines.iter().zip(log.events()) {
            let arrow = format!("{}->>{}", event.source(), event.target());
            assert_eq!(line.starts_with(&arrow), event.is_response());
        }
    }

    #[test]
    fn test_transform_empty_log() {
        let mut log = EventLog::new();

        let transformed = log.transform(&CaptureConfig::default()).unwrap();

        assert_eq!(transformed.notation, "");
        assert!(transformed.transcripts.is_empty());
    }

    #[test]
    fn test_transform_is_repeatable() {
        let mut log = call_chain();

        let first = log.transform(&CaptureConfig::default()).unwrap();
        let second = log.transform(&CaptureConfig::default()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_transform_accepts_trailing_request() {
        let mut log = EventLog::new();
        log.push(Event::request("one", "two", post("http://two/x", "{}")));

        let transformed = log.transform(&CaptureConfig::default()).unwrap();

        assert_eq!(transformed.notation, "one->two: (1) POST http://two/x\n");
        assert!(log.final_status().is_err());
    }

    #[test]
    fn test_transform_rejects_unrecognized_event() {
        let mut log = call_chain();
        log.push(Event::from_message("two", "one", 42u32));

        let err = log.transform(&CaptureConfig::default()).unwrap_err();

        match err {
            DiagramError::Transform {
                position,
                type_name,
            } => {
                assert_eq!(position, 5);
                assert_eq!(type_name, "u32");
            }
            _ => panic!("Expected Transform error"),
        }
    }

    #[test]
    fn test_transform_aborts_on_body_failure() {
        let failing: HttpResponse =
            http::Response::builder().status(200).body(Some(Body::from_reader(FailingReader))).unwrap();
        let mut log = EventLog::new();
        log.push(Event::request("one", "two", post("/x", "{}")));
        log.push(Event::response("two", "one", failing));

        let err = log.transform(&CaptureConfig::default()).unwrap_err();

        match err {
            DiagramError::Dump { position, .. } => assert_eq!(position, 2),
            _ => panic!("Expected Dump error"),
        }
    }

    #[test]
    fn test_final_status_of_call_chain() {
        let log = call_chain();

        let status = log.final_status().unwrap();

        assert_eq!(status.code, 201);
        assert_eq!(status.tier, Tier::Success);
    }

    #[test]
    fn test_final_status_empty_log() {
        let log = EventLog::new();

        assert_eq!(log.final_status().unwrap(), FinalStatus::NO_RESPONSE);
    }

    #[test]
    fn test_final_status_trailing_request() {
        let mut log = call_chain();
        log.push(Event::request("one", "four", post("/z", "{}")));

        let err = log.final_status().unwrap_err();

        assert!(matches!(err, DiagramError::NoTerminalResponse { position: 5 }));
        assert!(err.to_string().contains("was not an http response"));
    }

    #[test]
    fn test_final_status_server_error() {
        let mut log = EventLog::new();
        log.extend([
            Event::request("one", "two", post("/x", "{}")),
            Event::response("two", "one", status(503)),
        ]);

        let status = log.final_status().unwrap();

        assert_eq!(status.code, 503);
        assert_eq!(status.tier, Tier::Danger);
    }
}
