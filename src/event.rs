//! Exchange events recorded between named participants
//!
//! An [`Event`] is one side of an HTTP exchange: a request sent from one participant to
//! another, or the response travelling back. The order in which events are recorded is the
//! chronological order of the call chain.

use crate::body::Body;
use std::any::{self, Any};

/// Free-text name of a participant in the call chain, e.g. a service name
pub type Participant = String;

/// HTTP request as captured by the diagram, with an optional body
pub type HttpRequest = http::Request<Option<Body>>;

/// HTTP response as captured by the diagram, with an optional body
pub type HttpResponse = http::Response<Option<Body>>;

/// A request sent from `source` to `target`
#[derive(Debug)]
pub struct RequestEvent {
    pub source: Participant,
    pub target: Participant,
    pub request: HttpRequest,
}

/// A response sent from `source` back to `target`
#[derive(Debug)]
pub struct ResponseEvent {
    pub source: Participant,
    pub target: Participant,
    pub response: HttpResponse,
}

/// A message that turned out to be neither a request nor a response.
///
/// Only produced by [`Event::from_message`]; rendering a log that contains one fails.
#[derive(Debug, Clone)]
pub struct UnrecognizedEvent {
    pub source: Participant,
    pub target: Participant,
    /// Rust type name of the rejected message
    pub type_name: &'static str,
}

/// One logged exchange event
#[derive(Debug)]
pub enum Event {
    Request(RequestEvent),
    Response(ResponseEvent),
    Unrecognized(UnrecognizedEvent),
}

impl Event {
    /// Create a request event
    pub fn request(
        source: impl Into<Participant>,
        target: impl Into<Participant>,
        request: HttpRequest,
    ) -> Self {
        Self::Request(RequestEvent {
            source: source.into(),
            target: target.into(),
            request,
        })
    }

    /// Create a response event
    pub fn response(
        source: impl Into<Participant>,
        target: impl Into<Participant>,
        response: HttpResponse,
    ) -> Self {
        Self::Response(ResponseEvent {
            source: source.into(),
            target: target.into(),
            response,
        })
    }

    /// Create an event from a type-erased message.
    ///
    /// `message` is recorded as a request if it is an [`HttpRequest`], as a response if it is
    /// an [`HttpResponse`], and as [`Event::Unrecognized`] otherwise.
    pub fn from_message<T: Any + Send>(
        source: impl Into<Participant>,
        target: impl Into<Participant>,
        message: T,
    ) -> Self {
        let message: Box<dyn Any + Send> = Box::new(message);

        let message = match message.downcast::<HttpRequest>() {
            Ok(request) => return Self::request(source, target, *request),
            Err(message) => message,
        };

        match message.downcast::<HttpResponse>() {
            Ok(response) => Self::response(source, target, *response),
            Err(_) => Self::Unrecognized(UnrecognizedEvent {
                source: source.into(),
                target: target.into(),
                type_name: any::type_name::<T>(),
            }),
        }
    }

    pub fn source(&self) -> &str {
        match self {
            Self::Request(event) => &event.source,
            Self::Response(event) => &event.source,
            Self::Unrecognized(event) => &event.source,
        }
    }

    pub fn target(&self) -> &str {
        match self {
            Self::Request(event) => &event.target,
            Self::Response(event) => &event.target,
            Self::Unrecognized(event) => &event.target,
        }
    }

    pub fn is_response(&self) -> bool {
        matches!(self, Self::Response(_))
    }
}

impl From<RequestEvent> for Event {
    fn from(event: RequestEvent) -> Self {
        Self::Request(event)
    }
}

impl From<ResponseEvent> for Event {
    fn from(event: ResponseEvent) -> Self {
        Self::Response(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    fn post(uri: &str) -> HttpRequest {
        http::Request::builder()
            .method("POST")
            .uri(uri)
            .body(Some(Body::from(r#"{"email":"a@b.com"}"#)))
            .unwrap()
    }

    fn created() -> HttpResponse {
        http::Response::builder().status(StatusCode::CREATED).body(None).unwrap()
    }

    #[test]
    fn test_request_event() {
        let event = Event::request("one", "two", post("/x"));

        assert_eq!(event.source(), "one");
        assert_eq!(event.target(), "two");
        assert!(!event.is_response());
        match event {
            Event::Request(req) => assert_eq!(req.request.uri(), "/x"),
            _ => panic!("Expected Request"),
        }
    }

    #[test]
    fn test_response_event() {
        let event = Event::response("two", "one", created());

        assert_eq!(event.source(), "two");
        assert_eq!(event.target(), "one");
        assert!(event.is_response());
    }

    #[test]
    fn test_from_message_request() {
        let event = Event::from_message("one", "two", post("/x"));
        assert!(matches!(event, Event::Request(_)));
    }

    #[test]
    fn test_from_message_response() {
        let event = Event::from_message("two", "one", created());
        match event {
            Event::Response(res) => assert_eq!(res.response.status(), StatusCode::CREATED),
            _ => panic!("Expected Response"),
        }
    }

    #[test]
    fn test_from_message_unrecognized() {
        let event = Event::from_message("one", "two", "GET /x".to_string());

        assert_eq!(event.source(), "one");
        assert_eq!(event.target(), "two");
        match event {
            Event::Unrecognized(other) => assert!(other.type_name.contains("String")),
            _ => panic!("Expected Unrecognized"),
        }
    }

    #[test]
    fn test_from_message_rejects_body_less_request_type() {
        // A request with a different body type is not an HttpRequest
        let request = http::Request::builder().uri("/x").body(()).unwrap();
        let event = Event::from_message("one", "two", request);
        assert!(matches!(event, Event::Unrecognized(_)));
    }

    #[test]
    fn test_from_typed_events() {
        let event: Event = RequestEvent {
            source: "a".to_string(),
            target: "b".to_string(),
            request: post("/y"),
        }
        .into();
        assert!(matches!(event, Event::Request(_)));

        let event: Event = ResponseEvent {
            source: "b".to_string(),
            target: "a".to_string(),
            response: created(),
        }
        .into();
        assert!(event.is_response());
    }
}
